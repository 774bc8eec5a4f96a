//! Signed instructions submitted to the program.
//!
//! The signed message is `program_id ‖ borsh(instruction)`, so a signature
//! only authorizes the instruction against one deployment.

use borsh::{BorshDeserialize, BorshSerialize};

use ballot_crypto::{sign_message, verify_signature};
use ballot_types::{KeyPair, ProgramId, PublicKey, Signature, SlotAddress, Timestamp};

use crate::codec::CodecError;
use crate::error::ProgramError;

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum Instruction {
    CreateProposal {
        title: String,
        description: String,
        candidate_ids: Vec<String>,
        closes_at: Timestamp,
    },
    CastVote {
        proposal: SlotAddress,
        chosen_candidate_ids: Vec<String>,
    },
}

impl Instruction {
    /// Bytes covered by the signer's signature.
    pub fn signing_message(&self, program_id: &ProgramId) -> Result<Vec<u8>, CodecError> {
        let mut msg = program_id.as_bytes().to_vec();
        self.serialize(&mut msg).map_err(|e| CodecError::Encode {
            kind: "Instruction",
            reason: e.to_string(),
        })?;
        Ok(msg)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SignedInstruction {
    pub signer: PublicKey,
    pub signature: Signature,
    pub instruction: Instruction,
}

impl SignedInstruction {
    pub fn sign(
        program_id: &ProgramId,
        instruction: Instruction,
        keypair: &KeyPair,
    ) -> Result<Self, CodecError> {
        let msg = instruction.signing_message(program_id)?;
        Ok(Self {
            signer: keypair.public,
            signature: sign_message(&msg, &keypair.private),
            instruction,
        })
    }

    pub fn verify(&self, program_id: &ProgramId) -> Result<(), ProgramError> {
        let msg = self.instruction.signing_message(program_id)?;
        verify_signature(&msg, &self.signature, &self.signer)
            .map_err(|_| ProgramError::InvalidSignature(self.signer))
    }
}

/// What an admitted instruction did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    ProposalCreated {
        proposal: SlotAddress,
    },
    VoteCast {
        vote: SlotAddress,
        proposal: SlotAddress,
    },
}
