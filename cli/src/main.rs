//! ballot: command-line driver for a local voting ledger.

mod commands;
mod config;
mod error;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use ballot_store_lmdb::LmdbEnvironment;
use ballot_types::Timestamp;
use ballot_utils::{init_logging, LogFormat};
use ballot_voting::VotingProgram;

use crate::commands::Command;
use crate::config::LedgerConfig;

#[derive(Parser)]
#[command(name = "ballot", version, about = "Voting proposals on a local ledger")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and environment variables override them.
    #[arg(long, env = "BALLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "BALLOT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Program id (64 hex characters).
    #[arg(long, env = "BALLOT_PROGRAM_ID")]
    program_id: Option<String>,

    /// Log filter: "trace", "debug", "info", "warn", "error", or a directive list.
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<LedgerConfig> {
        let mut config = match &self.config {
            Some(path) => LedgerConfig::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => LedgerConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(id) = &self.program_id {
            config.program_id = id.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(config.log_format, &config.log_level)?;

    if let Command::Keygen { seed_hex } = &cli.command {
        println!("{}", serde_json::to_string_pretty(&commands::keygen(seed_hex))?);
        return Ok(());
    }

    let program_id = config.program_id()?;
    let env = LmdbEnvironment::open(&config.data_dir, config.max_dbs, config.map_size_bytes())
        .with_context(|| format!("opening ledger at {}", config.data_dir.display()))?;
    env.bind_program(&program_id)?;
    tracing::info!(data_dir = %config.data_dir.display(), %program_id, "ledger ready");

    let program = VotingProgram::new(program_id, env.slot_store());
    let output = commands::run(&program, cli.command, Timestamp::now())?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
