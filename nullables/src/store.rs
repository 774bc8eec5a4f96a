//! Nullable store: thread-safe in-memory slot storage for testing.

use ballot_store::{PairedWrite, SlotStore, StoreError};
use ballot_types::SlotAddress;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// An in-memory [`SlotStore`].
///
/// One mutex guards the whole map, so every operation (including the
/// closure passed to the mutating calls) runs in a single exclusive section.
pub struct NullSlotStore {
    slots: Mutex<BTreeMap<SlotAddress, Vec<u8>>>,
}

impl NullSlotStore {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    /// Overwrite a slot unconditionally. Lets tests plant corrupt or
    /// foreign data that the program could never write itself.
    pub fn force_put(&self, slot: SlotAddress, data: Vec<u8>) -> Result<(), StoreError> {
        self.lock()?.insert(slot, data);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<SlotAddress, Vec<u8>>>, StoreError> {
        self.slots
            .lock()
            .map_err(|_| StoreError::Backend("null slot store mutex poisoned".into()))
    }
}

impl Default for NullSlotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotStore for NullSlotStore {
    fn create_if_absent(&self, slot: &SlotAddress, data: &[u8]) -> Result<(), StoreError> {
        let mut slots = self.lock()?;
        if slots.contains_key(slot) {
            return Err(StoreError::AlreadyExists(*slot));
        }
        slots.insert(*slot, data.to_vec());
        Ok(())
    }

    fn read(&self, slot: &SlotAddress) -> Result<Vec<u8>, StoreError> {
        self.lock()?
            .get(slot)
            .cloned()
            .ok_or(StoreError::NotFound(*slot))
    }

    fn exists(&self, slot: &SlotAddress) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(slot))
    }

    fn mutate_if_exists<E, F>(&self, slot: &SlotAddress, f: F) -> Result<(), E>
    where
        E: From<StoreError>,
        F: FnOnce(&[u8]) -> Result<Vec<u8>, E>,
    {
        let mut slots = self.lock()?;
        let current = slots.get(slot).ok_or(StoreError::NotFound(*slot))?;
        let updated = f(current)?;
        slots.insert(*slot, updated);
        Ok(())
    }

    fn create_and_mutate<E, F>(
        &self,
        created: &SlotAddress,
        existing: &SlotAddress,
        f: F,
    ) -> Result<(), E>
    where
        E: From<StoreError>,
        F: FnOnce(&[u8]) -> Result<PairedWrite, E>,
    {
        let mut slots = self.lock()?;
        if slots.contains_key(created) {
            return Err(StoreError::AlreadyExists(*created).into());
        }
        let current = slots.get(existing).ok_or(StoreError::NotFound(*existing))?;
        let write = f(current)?;
        slots.insert(*existing, write.updated);
        slots.insert(*created, write.created);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(SlotAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|(_, data)| data.starts_with(prefix))
            .map(|(addr, data)| (*addr, data.clone()))
            .collect())
    }

    fn slot_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock()?.len() as u64)
    }
}
