//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ballot_types::ProgramId;
use ballot_utils::LogFormat;

use crate::error::CliError;

/// Seed hashed into the program id used when none is configured.
const DEFAULT_PROGRAM_SEED: &[u8] = b"ballot-voting-program";

/// Configuration for a local ledger.
///
/// Loaded from a TOML file via [`LedgerConfig::from_toml_file`]; command-line
/// flags and environment variables override individual fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    #[serde(default = "default_max_dbs")]
    pub max_dbs: u32,

    /// Program id as 64 hex characters. Namespaces every derived slot.
    #[serde(default = "default_program_id")]
    pub program_id: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log filter, e.g. "info" or "warn,ballot_voting=debug".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./ballot_data")
}

fn default_map_size_mb() -> usize {
    256
}

fn default_max_dbs() -> u32 {
    4
}

fn default_program_id() -> String {
    ProgramId::new(ballot_crypto::sha256(DEFAULT_PROGRAM_SEED)).to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CliError> {
        toml::from_str(s).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn program_id(&self) -> Result<ProgramId, CliError> {
        self.program_id
            .parse()
            .map_err(|e| CliError::Config(format!("program_id: {e}")))
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            max_dbs: default_max_dbs(),
            program_id: default_program_id(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
