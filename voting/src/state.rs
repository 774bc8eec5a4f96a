//! Ledger records: proposals and votes.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use ballot_types::{PublicKey, SlotAddress, Timestamp};

use crate::codec::AccountRecord;
use crate::phase::ProposalPhase;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 600;
pub const MIN_CANDIDATES: usize = 2;
pub const MAX_CANDIDATES: usize = 12;
pub const MAX_CANDIDATE_ID_LEN: usize = 50;

/// One option on a proposal and its running tally.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Candidate {
    pub id: String,
    pub vote_count: u64,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vote_count: 0,
        }
    }
}

/// A proposal stored at the slot derived from (proposer, title).
///
/// After creation only `candidates[*].vote_count` ever changes.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct ProposalRecord {
    pub title: String,
    pub description: String,
    pub candidates: Vec<Candidate>,
    /// Votes are admitted while `now < closes_at`.
    pub closes_at: Timestamp,
    pub proposer: PublicKey,
    pub bump: u8,
}

impl ProposalRecord {
    pub fn phase(&self, now: Timestamp) -> ProposalPhase {
        ProposalPhase::at(self.closes_at, now)
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }
}

impl AccountRecord for ProposalRecord {
    const NAME: &'static str = "Proposal";
    // sha256("account:Proposal")[..8]
    const DISCRIMINATOR: [u8; 8] = [0x1a, 0x5e, 0xbd, 0xbb, 0x74, 0x88, 0x35, 0x21];
}

/// A ballot stored at the slot derived from (voter, proposal).
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct VoteRecord {
    pub proposal: SlotAddress,
    pub voter: PublicKey,
    /// Chosen candidate ids in submission order.
    pub chosen_candidate_ids: Vec<String>,
    pub bump: u8,
}

impl AccountRecord for VoteRecord {
    const NAME: &'static str = "Vote";
    // sha256("account:Vote")[..8]
    const DISCRIMINATOR: [u8; 8] = [0x60, 0x5b, 0x68, 0x39, 0x91, 0x23, 0xac, 0x9b];
}
