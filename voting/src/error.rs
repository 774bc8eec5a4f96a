use ballot_crypto::AddressError;
use ballot_store::StoreError;
use ballot_types::{PublicKey, SlotAddress};
use thiserror::Error;

use crate::codec::CodecError;

/// Validation failures of the voting program.
///
/// Each variant carries a stable numeric code (its discriminant) and a stable
/// name; clients match on either, never on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[repr(u32)]
pub enum VotingError {
    #[error("cannot create proposal, title must be 1 to 100 bytes")]
    TitleTooLong = 6000,

    #[error("cannot create proposal, description must be 1 to 600 bytes")]
    DescriptionTooLong = 6001,

    #[error("cannot create proposal, more than 12 candidates")]
    TooManyCandidates = 6002,

    #[error("cannot create proposal, fewer than 2 candidates")]
    NotEnoughCandidates = 6003,

    #[error("cannot create proposal, candidate id longer than 50 bytes")]
    CandidateIdTooLong = 6004,

    #[error("cannot create proposal, closing time is not in the future")]
    InvalidProposalTime = 6005,

    #[error("cannot cast vote, no candidates chosen")]
    NotEnoughCandidateVotes = 6006,

    #[error("cannot cast vote, more choices than candidates")]
    TooManyCandidateVotes = 6007,

    #[error("duplicate candidate ids")]
    DuplicateCandidates = 6008,

    #[error("cannot cast vote, unknown candidate id")]
    InvalidCandidateId = 6009,

    #[error("cannot cast vote, proposal is closed")]
    ProposalClosed = 6010,

    #[error("cannot cast vote, candidate tally would overflow")]
    TallyOverflow = 6011,
}

impl VotingError {
    pub const ALL: [VotingError; 12] = [
        Self::TitleTooLong,
        Self::DescriptionTooLong,
        Self::TooManyCandidates,
        Self::NotEnoughCandidates,
        Self::CandidateIdTooLong,
        Self::InvalidProposalTime,
        Self::NotEnoughCandidateVotes,
        Self::TooManyCandidateVotes,
        Self::DuplicateCandidates,
        Self::InvalidCandidateId,
        Self::ProposalClosed,
        Self::TallyOverflow,
    ];

    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TitleTooLong => "TitleTooLong",
            Self::DescriptionTooLong => "DescriptionTooLong",
            Self::TooManyCandidates => "TooManyCandidates",
            Self::NotEnoughCandidates => "NotEnoughCandidates",
            Self::CandidateIdTooLong => "CandidateIdTooLong",
            Self::InvalidProposalTime => "InvalidProposalTime",
            Self::NotEnoughCandidateVotes => "NotEnoughCandidateVotes",
            Self::TooManyCandidateVotes => "TooManyCandidateVotes",
            Self::DuplicateCandidates => "DuplicateCandidates",
            Self::InvalidCandidateId => "InvalidCandidateId",
            Self::ProposalClosed => "ProposalClosed",
            Self::TallyOverflow => "TallyOverflow",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }
}

/// Everything that can stop a program operation.
///
/// Whatever the variant, a failed operation has left the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Voting(#[from] VotingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("address derivation failed: {0}")]
    Address(#[from] AddressError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("instruction signature does not verify for signer {0}")]
    InvalidSignature(PublicKey),

    #[error("slot {0} does not hold a proposal derived under this program")]
    ProposalMismatch(SlotAddress),

    #[error("slot {0} does not hold the ballot its seeds derive")]
    VoteMismatch(SlotAddress),
}

impl ProgramError {
    /// The validation error behind this failure, if any.
    pub fn voting(&self) -> Option<VotingError> {
        match self {
            Self::Voting(e) => Some(*e),
            _ => None,
        }
    }
}
