//! Timestamp type used by proposals and vote admission.
//!
//! Timestamps are signed Unix epoch seconds (UTC), matching the 64-bit signed
//! width of the on-ledger encoding. Decisions never read the clock
//! themselves; callers pass `now` in.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(secs: i64) -> Self {
        Self(secs)
    }

    /// Read the system clock. Only the outermost driver should call this.
    pub fn now() -> Self {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => Self(d.as_secs() as i64),
            Err(e) => Self(-(e.duration().as_secs() as i64)),
        }
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    /// This timestamp shifted by `secs` (saturating).
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds from `now` until this timestamp, or 0 if it has passed.
    pub fn secs_until(&self, now: Timestamp) -> u64 {
        if self.0 > now.0 {
            self.0.abs_diff(now.0)
        } else {
            0
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
