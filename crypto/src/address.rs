//! Deterministic slot address derivation.
//!
//! A slot address is `SHA-256(seed_1 ‖ … ‖ seed_n ‖ program_id ‖ "ProgramDerivedAddress")`,
//! accepted only if the 32 bytes do NOT decode as an Ed25519 point, so no
//! private key can ever sign for the slot. [`find_slot_address`] appends a
//! one-byte bump as the last seed and walks it down from 255 until the result
//! falls off the curve; the first bump that works is the canonical one.
//!
//! Two logical entities map onto slots:
//!
//! | Entity   | Seeds                                              |
//! |----------|----------------------------------------------------|
//! | Proposal | `"PROPOSAL_SEED"`, SHA-256(title), proposer key    |
//! | Vote     | `"VOTE_SEED"`, voter key, proposal slot address    |
//!
//! Identical inputs always land on the identical slot, which is what lets the
//! ledger refuse a second proposal with the same (proposer, title) or a second
//! vote from the same voter on the same proposal.

use ballot_types::{ProgramId, PublicKey, SlotAddress};
use ed25519_dalek::VerifyingKey;

use crate::error::AddressError;
use crate::hash::{sha256_multi, title_digest};

/// Maximum number of seeds, bump included.
pub const MAX_SEEDS: usize = 16;
/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

pub const PROPOSAL_SEED: &[u8] = b"PROPOSAL_SEED";
pub const VOTE_SEED: &[u8] = b"VOTE_SEED";

const SLOT_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Whether `bytes` decompress to a point on the Ed25519 curve.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    VerifyingKey::from_bytes(bytes).is_ok()
}

/// Compute the slot address for a complete seed list (bump included).
///
/// Fails with [`AddressError::OnCurve`] if the seeds hash onto the curve; a
/// stored bump can therefore be re-verified without repeating the search.
pub fn create_slot_address(
    seeds: &[&[u8]],
    program_id: &ProgramId,
) -> Result<SlotAddress, AddressError> {
    if seeds.len() > MAX_SEEDS {
        return Err(AddressError::TooManySeeds {
            count: seeds.len(),
            max: MAX_SEEDS,
        });
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(AddressError::SeedTooLong {
                index,
                len: seed.len(),
            });
        }
    }

    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 2);
    parts.extend_from_slice(seeds);
    parts.push(program_id.as_bytes());
    parts.push(SLOT_MARKER);
    let hash = sha256_multi(&parts);

    if is_on_curve(&hash) {
        return Err(AddressError::OnCurve);
    }
    Ok(SlotAddress::new(hash))
}

/// Find the canonical slot address and bump for `seeds`.
pub fn find_slot_address(
    seeds: &[&[u8]],
    program_id: &ProgramId,
) -> Result<(SlotAddress, u8), AddressError> {
    if seeds.len() >= MAX_SEEDS {
        return Err(AddressError::TooManySeeds {
            count: seeds.len() + 1,
            max: MAX_SEEDS,
        });
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = seeds.to_vec();
        with_bump.push(&bump_seed);
        match create_slot_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(AddressError::OnCurve) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(AddressError::NoViableBump)
}

/// Slot of the proposal `proposer` created under `title`.
pub fn derive_proposal_address(
    program_id: &ProgramId,
    proposer: &PublicKey,
    title: &str,
) -> Result<(SlotAddress, u8), AddressError> {
    let digest = title_digest(title);
    find_slot_address(&[PROPOSAL_SEED, &digest, proposer.as_bytes()], program_id)
}

/// Recompute a proposal slot from its stored bump.
pub fn proposal_address_with_bump(
    program_id: &ProgramId,
    proposer: &PublicKey,
    title: &str,
    bump: u8,
) -> Result<SlotAddress, AddressError> {
    let digest = title_digest(title);
    create_slot_address(
        &[PROPOSAL_SEED, &digest, proposer.as_bytes(), &[bump]],
        program_id,
    )
}

/// Slot of `voter`'s ballot on the proposal at `proposal`.
pub fn derive_vote_address(
    program_id: &ProgramId,
    voter: &PublicKey,
    proposal: &SlotAddress,
) -> Result<(SlotAddress, u8), AddressError> {
    find_slot_address(&[VOTE_SEED, voter.as_bytes(), proposal.as_bytes()], program_id)
}

/// Recompute a vote slot from its stored bump.
pub fn vote_address_with_bump(
    program_id: &ProgramId,
    voter: &PublicKey,
    proposal: &SlotAddress,
    bump: u8,
) -> Result<SlotAddress, AddressError> {
    create_slot_address(
        &[VOTE_SEED, voter.as_bytes(), proposal.as_bytes(), &[bump]],
        program_id,
    )
}
