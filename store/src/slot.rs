//! The slot storage contract.

use ballot_types::SlotAddress;

use crate::StoreError;

/// Contents written by [`SlotStore::create_and_mutate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairedWrite {
    /// Replacement contents of the existing slot.
    pub updated: Vec<u8>,
    /// Contents of the newly created slot.
    pub created: Vec<u8>,
}

/// Create-if-absent / read / mutate-if-exists storage over derived slots.
///
/// Implementations must:
/// - never overwrite an occupied slot through `create_if_absent`;
/// - run each mutating call as one exclusive, all-or-nothing section, so
///   concurrent read-modify-write cycles on the same slot never lose updates;
/// - leave the store untouched when a closure returns `Err`.
///
/// Slots are never deleted.
pub trait SlotStore: Send + Sync {
    /// Write `data` to `slot` if and only if the slot is empty.
    ///
    /// Returns [`StoreError::AlreadyExists`] otherwise.
    fn create_if_absent(&self, slot: &SlotAddress, data: &[u8]) -> Result<(), StoreError>;

    /// Read the contents of `slot`, or [`StoreError::NotFound`].
    fn read(&self, slot: &SlotAddress) -> Result<Vec<u8>, StoreError>;

    fn exists(&self, slot: &SlotAddress) -> Result<bool, StoreError>;

    /// Atomically replace the contents of an existing slot with `f(current)`.
    ///
    /// Returns [`StoreError::NotFound`] (converted into `E`) if the slot is
    /// empty; `f` is not called in that case.
    fn mutate_if_exists<E, F>(&self, slot: &SlotAddress, f: F) -> Result<(), E>
    where
        E: From<StoreError>,
        F: FnOnce(&[u8]) -> Result<Vec<u8>, E>;

    /// Atomically create `created` and rewrite `existing` as one unit.
    ///
    /// Checked in order before `f` runs: `created` must be empty
    /// ([`StoreError::AlreadyExists`]) and `existing` must be occupied
    /// ([`StoreError::NotFound`]). `f` receives the current contents of
    /// `existing` and returns both new values; if it fails, nothing is written.
    fn create_and_mutate<E, F>(
        &self,
        created: &SlotAddress,
        existing: &SlotAddress,
        f: F,
    ) -> Result<(), E>
    where
        E: From<StoreError>,
        F: FnOnce(&[u8]) -> Result<PairedWrite, E>;

    /// All slots whose contents start with `prefix`, in address order.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(SlotAddress, Vec<u8>)>, StoreError>;

    /// Total number of occupied slots.
    fn slot_count(&self) -> Result<u64, StoreError>;
}
