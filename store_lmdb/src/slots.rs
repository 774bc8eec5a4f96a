//! LMDB implementation of SlotStore.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use ballot_store::{PairedWrite, SlotStore, StoreError};
use ballot_types::SlotAddress;

use crate::LmdbError;

pub struct LmdbSlotStore {
    pub(crate) env: Arc<Env>,
    pub(crate) slots_db: Database<Bytes, Bytes>,
}

fn backend(e: heed::Error) -> StoreError {
    LmdbError::from(e).into()
}

fn decode_key(key: &[u8]) -> Result<SlotAddress, StoreError> {
    let arr: [u8; 32] = key
        .try_into()
        .map_err(|_| StoreError::Corruption(format!("slot key of {} bytes", key.len())))?;
    Ok(SlotAddress::new(arr))
}

impl SlotStore for LmdbSlotStore {
    fn create_if_absent(&self, slot: &SlotAddress, data: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(backend)?;
        if self
            .slots_db
            .get(&wtxn, slot.as_bytes())
            .map_err(backend)?
            .is_some()
        {
            return Err(StoreError::AlreadyExists(*slot));
        }
        self.slots_db
            .put(&mut wtxn, slot.as_bytes(), data)
            .map_err(backend)?;
        wtxn.commit().map_err(backend)?;
        tracing::trace!(%slot, len = data.len(), "created slot");
        Ok(())
    }

    fn read(&self, slot: &SlotAddress) -> Result<Vec<u8>, StoreError> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        let val = self
            .slots_db
            .get(&rtxn, slot.as_bytes())
            .map_err(backend)?
            .ok_or(StoreError::NotFound(*slot))?;
        Ok(val.to_vec())
    }

    fn exists(&self, slot: &SlotAddress) -> Result<bool, StoreError> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        Ok(self
            .slots_db
            .get(&rtxn, slot.as_bytes())
            .map_err(backend)?
            .is_some())
    }

    fn mutate_if_exists<E, F>(&self, slot: &SlotAddress, f: F) -> Result<(), E>
    where
        E: From<StoreError>,
        F: FnOnce(&[u8]) -> Result<Vec<u8>, E>,
    {
        let mut wtxn = self.env.write_txn().map_err(backend)?;
        let current = self
            .slots_db
            .get(&wtxn, slot.as_bytes())
            .map_err(backend)?
            .ok_or(StoreError::NotFound(*slot))?
            .to_vec();

        // An Err here drops `wtxn`, which aborts the transaction.
        let updated = f(&current)?;

        self.slots_db
            .put(&mut wtxn, slot.as_bytes(), &updated)
            .map_err(backend)?;
        wtxn.commit().map_err(backend)?;
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
        let mut wtxn = self.env.write_txn().map_err(backend)?;
        if self
            .slots_db
            .get(&wtxn, created.as_bytes())
            .map_err(backend)?
            .is_some()
        {
            return Err(StoreError::AlreadyExists(*created).into());
        }
        let current = self
            .slots_db
            .get(&wtxn, existing.as_bytes())
            .map_err(backend)?
            .ok_or(StoreError::NotFound(*existing))?
            .to_vec();

        let write = f(&current)?;

        self.slots_db
            .put(&mut wtxn, existing.as_bytes(), &write.updated)
            .map_err(backend)?;
        self.slots_db
            .put(&mut wtxn, created.as_bytes(), &write.created)
            .map_err(backend)?;
        wtxn.commit().map_err(backend)?;
        tracing::trace!(%created, %existing, "committed paired write");
        Ok(())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(SlotAddress, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        let mut out = Vec::new();
        for entry in self.slots_db.iter(&rtxn).map_err(backend)? {
            let (key, val) = entry.map_err(backend)?;
            if val.starts_with(prefix) {
                out.push((decode_key(key)?, val.to_vec()));
            }
        }
        Ok(out)
    }

    fn slot_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(backend)?;
        self.slots_db.len(&rtxn).map_err(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LmdbEnvironment;
    use std::thread;
    use tempfile::TempDir;

    const MAP_SIZE: usize = 16 * 1024 * 1024;

    fn open() -> (TempDir, LmdbEnvironment) {
        let dir = TempDir::new().unwrap();
        let env = LmdbEnvironment::open(dir.path(), 4, MAP_SIZE).unwrap();
        (dir, env)
    }

    fn slot(n: u8) -> SlotAddress {
        SlotAddress::new([n; 32])
    }

    #[test]
    fn create_then_read() {
        let (_dir, env) = open();
        let store = env.slot_store();
        store.create_if_absent(&slot(1), b"proposal").unwrap();
        assert_eq!(store.read(&slot(1)).unwrap(), b"proposal");
        assert!(store.exists(&slot(1)).unwrap());
        assert_eq!(store.slot_count().unwrap(), 1);
    }

    #[test]
    fn create_refuses_occupied_slot() {
        let (_dir, env) = open();
        let store = env.slot_store();
        store.create_if_absent(&slot(1), b"first").unwrap();
        let err = store.create_if_absent(&slot(1), b"second").unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(s) if s == slot(1)));
        assert_eq!(store.read(&slot(1)).unwrap(), b"first");
    }

    #[test]
    fn read_missing_slot_is_not_found() {
        let (_dir, env) = open();
        let err = env.slot_store().read(&slot(9)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn mutate_requires_existing_slot() {
        let (_dir, env) = open();
        let store = env.slot_store();
        let result: Result<(), StoreError> =
            store.mutate_if_exists(&slot(2), |_| Ok(b"x".to_vec()));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(!store.exists(&slot(2)).unwrap());
    }

    #[test]
    fn failed_mutation_writes_nothing() {
        let (_dir, env) = open();
        let store = env.slot_store();
        store.create_if_absent(&slot(2), b"v1").unwrap();
        let result: Result<(), StoreError> = store.mutate_if_exists(&slot(2), |_| {
            Err(StoreError::Serialization("rejected".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.read(&slot(2)).unwrap(), b"v1");
    }

    #[test]
    fn paired_write_is_all_or_nothing() {
        let (_dir, env) = open();
        let store = env.slot_store();
        store.create_if_absent(&slot(1), b"tally:0").unwrap();

        let result: Result<(), StoreError> = store.create_and_mutate(&slot(2), &slot(1), |_| {
            Err(StoreError::Serialization("validator rejected".into()))
        });
        assert!(result.is_err());
        assert!(!store.exists(&slot(2)).unwrap());
        assert_eq!(store.read(&slot(1)).unwrap(), b"tally:0");

        store
            .create_and_mutate::<StoreError, _>(&slot(2), &slot(1), |current| {
                assert_eq!(current, b"tally:0");
                Ok(PairedWrite {
                    updated: b"tally:1".to_vec(),
                    created: b"ballot".to_vec(),
                })
            })
            .unwrap();
        assert_eq!(store.read(&slot(1)).unwrap(), b"tally:1");
        assert_eq!(store.read(&slot(2)).unwrap(), b"ballot");
    }

    #[test]
    fn paired_write_rejects_existing_target_before_running_closure() {
        let (_dir, env) = open();
        let store = env.slot_store();
        store.create_if_absent(&slot(1), b"proposal").unwrap();
        store.create_if_absent(&slot(2), b"ballot").unwrap();

        let result: Result<(), StoreError> = store.create_and_mutate(&slot(2), &slot(1), |_| {
            panic!("closure must not run for an occupied slot")
        });
        assert!(matches!(result, Err(StoreError::AlreadyExists(s)) if s == slot(2)));
    }

    #[test]
    fn paired_write_requires_existing_slot() {
        let (_dir, env) = open();
        let store = env.slot_store();
        let result: Result<(), StoreError> = store.create_and_mutate(&slot(2), &slot(1), |_| {
            Ok(PairedWrite {
                updated: vec![],
                created: vec![],
            })
        });
        assert!(matches!(result, Err(StoreError::NotFound(s)) if s == slot(1)));
        assert!(!store.exists(&slot(2)).unwrap());
    }

    #[test]
    fn scan_filters_by_prefix() {
        let (_dir, env) = open();
        let store = env.slot_store();
        store.create_if_absent(&slot(3), b"PPPPPPPP-a").unwrap();
        store.create_if_absent(&slot(1), b"VVVVVVVV-b").unwrap();
        store.create_if_absent(&slot(2), b"PPPPPPPP-c").unwrap();

        let found = store.scan_prefix(b"PPPPPPPP").unwrap();
        let addrs: Vec<SlotAddress> = found.iter().map(|(a, _)| *a).collect();
        assert_eq!(addrs, vec![slot(2), slot(3)]);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let (_dir, env) = open();
        let target = slot(1);
        env.slot_store()
            .create_if_absent(&target, &0u64.to_le_bytes())
            .unwrap();

        let env = Arc::new(env);
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let env = Arc::clone(&env);
                thread::spawn(move || {
                    let store = env.slot_store();
                    for j in 0..25u8 {
                        let mut key = [0u8; 32];
                        key[0] = 100 + i;
                        key[1] = j;
                        let created = SlotAddress::new(key);
                        store
                            .create_and_mutate::<StoreError, _>(&created, &target, |current| {
                                let n = u64::from_le_bytes(current.try_into().unwrap());
                                Ok(PairedWrite {
                                    updated: (n + 1).to_le_bytes().to_vec(),
                                    created: vec![i],
                                })
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let store = env.slot_store();
        let total = u64::from_le_bytes(store.read(&target).unwrap().try_into().unwrap());
        assert_eq!(total, 200);
        assert_eq!(store.slot_count().unwrap(), 201);
    }

    #[test]
    fn reopen_preserves_slots_and_schema() {
        let dir = TempDir::new().unwrap();
        {
            let env = LmdbEnvironment::open(dir.path(), 4, MAP_SIZE).unwrap();
            env.slot_store().create_if_absent(&slot(5), b"kept").unwrap();
        }
        let env = LmdbEnvironment::open(dir.path(), 4, MAP_SIZE).unwrap();
        assert_eq!(env.slot_store().read(&slot(5)).unwrap(), b"kept");
        assert_eq!(
            env.meta_store().get_schema_version().unwrap(),
            crate::migration::CURRENT_SCHEMA_VERSION
        );
    }

    #[test]
    fn program_binding_is_sticky() {
        let (_dir, env) = open();
        let a = ballot_types::ProgramId::new([1u8; 32]);
        let b = ballot_types::ProgramId::new([2u8; 32]);
        env.bind_program(&a).unwrap();
        env.bind_program(&a).unwrap();
        assert!(matches!(
            env.bind_program(&b),
            Err(LmdbError::ProgramMismatch { .. })
        ));
    }
}
