//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use ballot_types::ProgramId;

use crate::meta::LmdbMetaStore;
use crate::migration::Migrator;
use crate::slots::LmdbSlotStore;
use crate::LmdbError;

const SLOTS_DB: &str = "slots";
const META_DB: &str = "meta";

/// Wraps the LMDB environment and its database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    slots_db: Database<Bytes, Bytes>,
    meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given directory, then bring
    /// its schema up to date.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the directory is opened once per process by this type and
        // never memory-mapped through any other handle.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let slots_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some(SLOTS_DB))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some(META_DB))?;
        wtxn.commit()?;

        let environment = Self {
            env: Arc::new(env),
            slots_db,
            meta_db,
        };
        Migrator::run(&environment.meta_store())?;

        tracing::info!(path = %path.display(), map_size, "opened ledger environment");
        Ok(environment)
    }

    /// Tie this ledger directory to `program_id`.
    ///
    /// The first call records the id; later opens must present the same one,
    /// since slot addresses derived under another program would never match.
    pub fn bind_program(&self, program_id: &ProgramId) -> Result<(), LmdbError> {
        let meta = self.meta_store();
        match meta.get_program_id()? {
            None => {
                meta.set_program_id(program_id)?;
                tracing::info!(%program_id, "bound ledger to program");
                Ok(())
            }
            Some(stored) if stored == *program_id => Ok(()),
            Some(stored) => Err(LmdbError::ProgramMismatch {
                stored,
                requested: *program_id,
            }),
        }
    }

    pub fn slot_store(&self) -> LmdbSlotStore {
        LmdbSlotStore {
            env: Arc::clone(&self.env),
            slots_db: self.slots_db,
        }
    }

    pub fn meta_store(&self) -> LmdbMetaStore {
        LmdbMetaStore {
            env: Arc::clone(&self.env),
            meta_db: self.meta_db,
        }
    }
}
