//! Shared utilities for the ballot ledger binaries.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use time::{format_duration, format_remaining};
