//! Abstract slot storage for the ballot ledger.
//!
//! The ledger is a content-addressed key-value space: every key is a derived
//! [`SlotAddress`](ballot_types::SlotAddress) and every value is an encoded
//! record. Backends (LMDB, in-memory for testing) implement [`SlotStore`]; the
//! voting program depends only on the trait and never holds ledger state of
//! its own.

pub mod error;
pub mod slot;

pub use error::StoreError;
pub use slot::{PairedWrite, SlotStore};
