//! Cryptographic primitives for the ballot ledger.
//!
//! - **SHA-256** for title digests, slot derivation, and record discriminators
//! - **Slot addresses** derived from seeds, a program id, and a bump that
//!   pushes the result off the Ed25519 curve
//! - **Ed25519** for signing and verifying submitted instructions

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{
    create_slot_address, derive_proposal_address, derive_vote_address, find_slot_address,
    is_on_curve, proposal_address_with_bump, vote_address_with_bump,
};
pub use error::{AddressError, SignatureError};
pub use hash::{sha256, sha256_multi, title_digest};
pub use keys::{keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
