//! Subcommand implementations. Each returns the JSON document to print.

use clap::Subcommand;
use serde_json::{json, Value};

use ballot_crypto::keypair_from_seed;
use ballot_store::SlotStore;
use ballot_types::{PublicKey, SlotAddress, Timestamp};
use ballot_utils::format_remaining;
use ballot_voting::{Instruction, Outcome, ProposalView, SignedInstruction, VotingProgram};

use crate::error::CliError;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the public key for a 32-byte hex seed.
    Keygen {
        #[arg(long, value_parser = parse_seed)]
        seed_hex: [u8; 32],
    },

    /// Create a proposal signed by the seed's key.
    CreateProposal {
        #[arg(long, value_parser = parse_seed, env = "BALLOT_SEED_HEX")]
        seed_hex: [u8; 32],

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Candidate ids, repeated or comma-separated.
        #[arg(long = "candidate", value_delimiter = ',', required = true)]
        candidates: Vec<String>,

        /// Seconds from now until voting closes.
        #[arg(long, conflicts_with = "closes_at")]
        closes_in: Option<i64>,

        /// Absolute closing time in Unix seconds.
        #[arg(long)]
        closes_at: Option<i64>,
    },

    /// Cast a vote signed by the seed's key.
    CastVote {
        #[arg(long, value_parser = parse_seed, env = "BALLOT_SEED_HEX")]
        seed_hex: [u8; 32],

        #[arg(long)]
        proposal: SlotAddress,

        /// Chosen candidate ids, repeated or comma-separated.
        #[arg(long = "choice", value_delimiter = ',')]
        choices: Vec<String>,
    },

    /// List every proposal with its current tally.
    List,

    /// Show one proposal with its ranked tally.
    Show {
        #[arg(long)]
        proposal: SlotAddress,
    },

    /// Show the ballot a voter cast on a proposal.
    VoteOf {
        #[arg(long)]
        voter: PublicKey,

        #[arg(long)]
        proposal: SlotAddress,
    },
}

pub fn parse_seed(s: &str) -> Result<[u8; 32], String> {
    let bytes = hex::decode(s).map_err(|e| e.to_string())?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("seed must be 32 bytes, got {}", b.len()))
}

pub fn keygen(seed: &[u8; 32]) -> Value {
    let kp = keypair_from_seed(seed);
    json!({ "public_key": kp.public.to_string() })
}

fn view_json(view: &ProposalView) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(view)?;
    value["status"] = Value::String(format_remaining(view.secs_remaining));
    Ok(value)
}

/// Run a ledger subcommand at time `now`.
pub fn run<S: SlotStore>(
    program: &VotingProgram<S>,
    command: Command,
    now: Timestamp,
) -> Result<Value, CliError> {
    match command {
        Command::Keygen { seed_hex } => Ok(keygen(&seed_hex)),

        Command::CreateProposal {
            seed_hex,
            title,
            description,
            candidates,
            closes_in,
            closes_at,
        } => {
            let closes_at = match (closes_at, closes_in) {
                (Some(at), _) => Timestamp::new(at),
                (None, Some(secs)) => now.plus_secs(secs),
                (None, None) => {
                    return Err(CliError::invalid(
                        "deadline",
                        "one of --closes-in or --closes-at is required",
                    ))
                }
            };
            let signer = keypair_from_seed(&seed_hex);
            let instruction = Instruction::CreateProposal {
                title,
                description,
                candidate_ids: candidates,
                closes_at,
            };
            let signed = SignedInstruction::sign(program.program_id(), instruction, &signer)
                .map_err(ballot_voting::ProgramError::from)?;
            match program.process(&signed, now)? {
                Outcome::ProposalCreated { proposal } => {
                    tracing::debug!(%proposal, "created via cli");
                    Ok(json!({ "proposal": proposal.to_string() }))
                }
                other => Err(CliError::invalid("outcome", format!("{other:?}"))),
            }
        }

        Command::CastVote {
            seed_hex,
            proposal,
            choices,
        } => {
            let signer = keypair_from_seed(&seed_hex);
            let instruction = Instruction::CastVote {
                proposal,
                chosen_candidate_ids: choices,
            };
            let signed = SignedInstruction::sign(program.program_id(), instruction, &signer)
                .map_err(ballot_voting::ProgramError::from)?;
            match program.process(&signed, now)? {
                Outcome::VoteCast { vote, proposal } => Ok(json!({
                    "vote": vote.to_string(),
                    "proposal": proposal.to_string(),
                })),
                other => Err(CliError::invalid("outcome", format!("{other:?}"))),
            }
        }

        Command::List => {
            let views = program
                .list_proposals()?
                .into_iter()
                .map(|(address, record)| view_json(&ProposalView::build(address, &record, now)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(views))
        }

        Command::Show { proposal } => view_json(&program.view_proposal(&proposal, now)?),

        Command::VoteOf { voter, proposal } => {
            let (address, record) = program.get_vote(&voter, &proposal)?;
            let mut value = serde_json::to_value(&record)?;
            value["address"] = Value::String(address.to_string());
            Ok(value)
        }
    }
}
