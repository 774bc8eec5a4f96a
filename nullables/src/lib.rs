//! Nullable infrastructure for deterministic testing.
//!
//! The ledger core never reads the wall clock and never touches storage
//! directly; both are passed in. This crate provides stand-ins that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap `LmdbSlotStore` and `Timestamp::now()` for these in tests.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullSlotStore;
