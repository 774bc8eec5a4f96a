//! Fundamental types for the ballot ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! slot addresses, program ids, participant keys, and timestamps.

pub mod address;
pub mod error;
pub mod keys;
pub mod time;

pub use address::{ProgramId, SlotAddress};
pub use error::ParseError;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;
