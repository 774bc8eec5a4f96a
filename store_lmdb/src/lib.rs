//! LMDB storage backend for the ballot ledger.
//!
//! Implements [`SlotStore`](ballot_store::SlotStore) using the `heed` LMDB
//! bindings. LMDB allows a single writer per environment, so every mutating
//! slot operation runs inside one write transaction and is serialized against
//! all other writers, in this process or any other.

pub mod environment;
pub mod error;
pub mod meta;
pub mod migration;
pub mod slots;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use slots::LmdbSlotStore;
