//! Ledger metadata: schema version and the owning program id.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};

use ballot_types::ProgramId;

use crate::LmdbError;

const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";
const PROGRAM_ID_KEY: &[u8] = b"program_id";

pub struct LmdbMetaStore {
    pub(crate) env: Arc<Env>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbMetaStore {
    /// Stored schema version, or 0 for a fresh database.
    pub fn get_schema_version(&self) -> Result<u32, LmdbError> {
        let rtxn = self.env.read_txn()?;
        match self.meta_db.get(&rtxn, SCHEMA_VERSION_KEY)? {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("schema_version has unexpected byte length".into())
                })?;
                Ok(u32::from_le_bytes(arr))
            }
            None => Ok(0),
        }
    }

    pub fn set_schema_version(&self, version: u32) -> Result<(), LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        self.meta_db
            .put(&mut wtxn, SCHEMA_VERSION_KEY, &version.to_le_bytes())?;
        wtxn.commit()?;
        Ok(())
    }

    pub fn get_program_id(&self) -> Result<Option<ProgramId>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        match self.meta_db.get(&rtxn, PROGRAM_ID_KEY)? {
            Some(bytes) => {
                let arr: [u8; 32] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization("program_id has unexpected byte length".into())
                })?;
                Ok(Some(ProgramId::new(arr)))
            }
            None => Ok(None),
        }
    }

    pub fn set_program_id(&self, program_id: &ProgramId) -> Result<(), LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        self.meta_db
            .put(&mut wtxn, PROGRAM_ID_KEY, program_id.as_bytes())?;
        wtxn.commit()?;
        Ok(())
    }
}
