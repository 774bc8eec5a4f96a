//! Database schema versioning.
//!
//! Tracks a monotonically increasing schema version in the meta database and
//! refuses to open a ledger written by newer code.

use crate::meta::LmdbMetaStore;
use crate::LmdbError;

/// The schema version that the current code expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

pub struct Migrator;

impl Migrator {
    /// Check the stored schema version and run any needed migrations.
    ///
    /// Version 0 means a fresh database. A stored version above
    /// [`CURRENT_SCHEMA_VERSION`] is an error.
    pub fn run(meta_store: &LmdbMetaStore) -> Result<(), LmdbError> {
        let current = meta_store.get_schema_version()?;

        if current == CURRENT_SCHEMA_VERSION {
            tracing::debug!(version = current, "ledger schema is up to date");
            return Ok(());
        }

        if current > CURRENT_SCHEMA_VERSION {
            return Err(LmdbError::SchemaTooNew {
                found: current,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }

        for version in current..CURRENT_SCHEMA_VERSION {
            tracing::info!(from = version, to = version + 1, "running migration");
            run_migration(version, version + 1)?;
        }

        meta_store.set_schema_version(CURRENT_SCHEMA_VERSION)?;
        Ok(())
    }
}

fn run_migration(from: u32, to: u32) -> Result<(), LmdbError> {
    match (from, to) {
        // Initial schema: the slots and meta databases are created on open.
        (0, 1) => Ok(()),
        _ => Err(LmdbError::Heed(format!(
            "no migration path from schema {} to {}",
            from, to
        ))),
    }
}
