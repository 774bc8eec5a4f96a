use ballot_voting::ProgramError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid {what}: {reason}")]
    InvalidArgument { what: &'static str, reason: String },

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid(what: &'static str, reason: impl ToString) -> Self {
        Self::InvalidArgument {
            what,
            reason: reason.to_string(),
        }
    }
}
