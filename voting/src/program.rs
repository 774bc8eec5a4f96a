//! The voting program: creation, vote admission, and the read path.

use tracing::{debug, info, warn};

use ballot_crypto::{
    derive_proposal_address, derive_vote_address, proposal_address_with_bump,
    vote_address_with_bump, AddressError,
};
use ballot_store::{PairedWrite, SlotStore};
use ballot_types::{ProgramId, PublicKey, SlotAddress, Timestamp};

use crate::codec::AccountRecord;
use crate::error::ProgramError;
use crate::instruction::{Instruction, Outcome, SignedInstruction};
use crate::state::{Candidate, ProposalRecord, VoteRecord};
use crate::tally::apply_vote;
use crate::validation::{validate_proposal, validate_vote, ProposalDraft, VoteDraft};
use crate::view::ProposalView;

/// Runs voting operations against a slot store.
///
/// Holds no mutable state: every decision reads the store, and the caller
/// supplies `now`.
pub struct VotingProgram<S: SlotStore> {
    program_id: ProgramId,
    store: S,
}

impl<S: SlotStore> VotingProgram<S> {
    pub fn new(program_id: ProgramId, store: S) -> Self {
        Self { program_id, store }
    }

    pub fn program_id(&self) -> &ProgramId {
        &self.program_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Verify a signed instruction and run it with the signer as proposer
    /// or voter.
    pub fn process(
        &self,
        signed: &SignedInstruction,
        now: Timestamp,
    ) -> Result<Outcome, ProgramError> {
        if let Err(e) = signed.verify(&self.program_id) {
            warn!(signer = %signed.signer, "rejected unsigned instruction");
            return Err(e);
        }
        match &signed.instruction {
            Instruction::CreateProposal {
                title,
                description,
                candidate_ids,
                closes_at,
            } => {
                let proposal = self.create_proposal(
                    &signed.signer,
                    title,
                    description,
                    candidate_ids,
                    *closes_at,
                    now,
                )?;
                Ok(Outcome::ProposalCreated { proposal })
            }
            Instruction::CastVote {
                proposal,
                chosen_candidate_ids,
            } => {
                let vote = self.cast_vote(&signed.signer, proposal, chosen_candidate_ids, now)?;
                Ok(Outcome::VoteCast {
                    vote,
                    proposal: *proposal,
                })
            }
        }
    }

    /// Create a proposal at the slot derived from `(proposer, title)`.
    ///
    /// `proposer` must already be authenticated. A second proposal with the
    /// same proposer and title fails with `StoreError::AlreadyExists`.
    pub fn create_proposal(
        &self,
        proposer: &PublicKey,
        title: &str,
        description: &str,
        candidate_ids: &[String],
        closes_at: Timestamp,
        now: Timestamp,
    ) -> Result<SlotAddress, ProgramError> {
        self.try_create_proposal(proposer, title, description, candidate_ids, closes_at, now)
            .inspect_err(|e| warn!(%proposer, title, error = %e, "proposal rejected"))
    }

    fn try_create_proposal(
        &self,
        proposer: &PublicKey,
        title: &str,
        description: &str,
        candidate_ids: &[String],
        closes_at: Timestamp,
        now: Timestamp,
    ) -> Result<SlotAddress, ProgramError> {
        let (address, bump) = derive_proposal_address(&self.program_id, proposer, title)?;
        debug!(%address, bump, "derived proposal slot");

        validate_proposal(&ProposalDraft {
            title,
            description,
            candidate_ids,
            closes_at,
            now,
        })?;

        let record = ProposalRecord {
            title: title.to_string(),
            description: description.to_string(),
            candidates: candidate_ids.iter().map(Candidate::new).collect(),
            closes_at,
            proposer: *proposer,
            bump,
        };
        self.store.create_if_absent(&address, &record.encode()?)?;

        info!(
            event = "proposal_created",
            %address,
            %proposer,
            candidates = candidate_ids.len(),
            %closes_at,
            "proposal created"
        );
        Ok(address)
    }

    /// Cast `voter`'s ballot on the proposal at `proposal`.
    ///
    /// The vote slot is checked first: a voter who already voted gets
    /// `StoreError::AlreadyExists` whatever they chose this time. The proposal
    /// is then decoded, re-verified against its stored bump, validated, and
    /// its tallies incremented in the same store section that creates the
    /// vote record.
    pub fn cast_vote(
        &self,
        voter: &PublicKey,
        proposal: &SlotAddress,
        chosen: &[String],
        now: Timestamp,
    ) -> Result<SlotAddress, ProgramError> {
        self.try_cast_vote(voter, proposal, chosen, now)
            .inspect_err(|e| warn!(%voter, %proposal, error = %e, "vote rejected"))
    }

    fn try_cast_vote(
        &self,
        voter: &PublicKey,
        proposal: &SlotAddress,
        chosen: &[String],
        now: Timestamp,
    ) -> Result<SlotAddress, ProgramError> {
        let (vote_address, bump) = derive_vote_address(&self.program_id, voter, proposal)?;
        debug!(vote = %vote_address, bump, "derived vote slot");

        let ballot = VoteRecord {
            proposal: *proposal,
            voter: *voter,
            chosen_candidate_ids: chosen.to_vec(),
            bump,
        };
        let created = ballot.encode()?;

        let mut counts = Vec::new();
        self.store
            .create_and_mutate::<ProgramError, _>(&vote_address, proposal, |current| {
                let mut record = ProposalRecord::decode(current)?;
                self.verify_proposal_slot(proposal, &record)?;
                validate_vote(&VoteDraft {
                    chosen,
                    proposal: &record,
                    now,
                })?;
                apply_vote(&mut record.candidates, chosen)?;
                counts = record.candidates.clone();
                Ok(PairedWrite {
                    updated: record.encode()?,
                    created,
                })
            })?;

        info!(
            event = "vote_cast",
            vote = %vote_address,
            %proposal,
            %voter,
            choices = chosen.len(),
            "vote cast"
        );
        for c in &counts {
            debug!(%proposal, candidate = %c.id, count = c.vote_count, "tally");
        }
        Ok(vote_address)
    }

    /// Confirm `record` really lives at the slot its own seeds derive.
    fn verify_proposal_slot(
        &self,
        slot: &SlotAddress,
        record: &ProposalRecord,
    ) -> Result<(), ProgramError> {
        match proposal_address_with_bump(
            &self.program_id,
            &record.proposer,
            &record.title,
            record.bump,
        ) {
            Ok(derived) if derived == *slot => Ok(()),
            Ok(_) | Err(AddressError::OnCurve) => Err(ProgramError::ProposalMismatch(*slot)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_proposal(&self, address: &SlotAddress) -> Result<ProposalRecord, ProgramError> {
        Ok(ProposalRecord::decode(&self.store.read(address)?)?)
    }

    /// The ballot `voter` cast on `proposal`, with its slot address.
    pub fn get_vote(
        &self,
        voter: &PublicKey,
        proposal: &SlotAddress,
    ) -> Result<(SlotAddress, VoteRecord), ProgramError> {
        let (address, _) = derive_vote_address(&self.program_id, voter, proposal)?;
        let record = VoteRecord::decode(&self.store.read(&address)?)?;
        if record.voter != *voter || record.proposal != *proposal {
            return Err(ProgramError::VoteMismatch(address));
        }
        match vote_address_with_bump(&self.program_id, voter, proposal, record.bump) {
            Ok(derived) if derived == address => Ok((address, record)),
            Ok(_) | Err(AddressError::OnCurve) => Err(ProgramError::VoteMismatch(address)),
            Err(e) => Err(e.into()),
        }
    }

    /// Every proposal in the store, in slot-address order.
    pub fn list_proposals(&self) -> Result<Vec<(SlotAddress, ProposalRecord)>, ProgramError> {
        let raw = self.store.scan_prefix(&ProposalRecord::DISCRIMINATOR)?;
        debug!(found = raw.len(), "scanned proposal slots");
        raw.into_iter()
            .map(|(address, data)| {
                ProposalRecord::decode(&data)
                    .map(|record| (address, record))
                    .map_err(ProgramError::from)
            })
            .collect()
    }

    pub fn view_proposal(
        &self,
        address: &SlotAddress,
        now: Timestamp,
    ) -> Result<ProposalView, ProgramError> {
        let record = self.get_proposal(address)?;
        Ok(ProposalView::build(*address, &record, now))
    }
}
