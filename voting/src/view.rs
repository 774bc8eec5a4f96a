use serde::{Deserialize, Serialize};

use ballot_types::{PublicKey, SlotAddress, Timestamp};

use crate::phase::ProposalPhase;
use crate::state::{Candidate, ProposalRecord};
use crate::tally;

/// Read-side summary of a proposal at a given instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalView {
    pub address: SlotAddress,
    pub proposer: PublicKey,
    pub title: String,
    pub description: String,
    pub closes_at: Timestamp,
    pub phase: ProposalPhase,
    pub secs_remaining: u64,
    pub total_choices: u64,
    /// Candidates by descending count, ties in creation order.
    pub ranked: Vec<Candidate>,
    pub leader: Option<String>,
}

impl ProposalView {
    pub fn build(address: SlotAddress, record: &ProposalRecord, now: Timestamp) -> Self {
        Self {
            address,
            proposer: record.proposer,
            title: record.title.clone(),
            description: record.description.clone(),
            closes_at: record.closes_at,
            phase: record.phase(now),
            secs_remaining: record.closes_at.secs_until(now),
            total_choices: tally::total_choices(&record.candidates),
            ranked: tally::ranked(&record.candidates),
            leader: tally::leader(&record.candidates).map(|c| c.id.clone()),
        }
    }
}
