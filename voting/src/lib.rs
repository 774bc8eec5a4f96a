//! The voting program.
//!
//! Two mutating operations run against a [`SlotStore`](ballot_store::SlotStore):
//! creating a proposal and casting a vote. Both derive their target slot from
//! content (proposer + title, voter + proposal), so a duplicate proposal or a
//! second vote collides on an occupied slot and is refused by the store.
//!
//! Proposal lifecycle: Open (`now < closes_at`) → Closed. The phase is never
//! stored; it is recomputed from the caller-supplied `now` at every decision.
//!
//! The program holds no mutable state. All serialization of concurrent votes
//! happens inside the store's exclusive write section.

pub mod codec;
pub mod error;
pub mod instruction;
pub mod phase;
pub mod program;
pub mod state;
pub mod tally;
pub mod validation;
pub mod view;

pub use codec::{AccountRecord, CodecError};
pub use error::{ProgramError, VotingError};
pub use instruction::{Instruction, Outcome, SignedInstruction};
pub use phase::ProposalPhase;
pub use program::VotingProgram;
pub use state::{Candidate, ProposalRecord, VoteRecord};
pub use view::ProposalView;
