use ballot_types::SlotAddress;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Create-if-absent hit an occupied slot: duplicate proposal or double vote.
    #[error("slot {0} already exists")]
    AlreadyExists(SlotAddress),

    /// Read or mutate of a slot that was never created.
    #[error("slot {0} not found")]
    NotFound(SlotAddress),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database is corrupted: {0}")]
    Corruption(String),
}
