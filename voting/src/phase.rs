use serde::{Deserialize, Serialize};
use std::fmt;

use ballot_types::Timestamp;

/// Where a proposal is in its lifecycle. Derived from `closes_at` and the
/// current time; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalPhase {
    /// Accepting votes.
    Open,
    /// Deadline reached; the tally is final.
    Closed,
}

impl ProposalPhase {
    pub fn at(closes_at: Timestamp, now: Timestamp) -> Self {
        if now < closes_at {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ProposalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}
