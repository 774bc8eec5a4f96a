//! Record wire format.
//!
//! Every stored record is an 8-byte discriminator followed by its Borsh
//! encoding: strings and sequences carry a u32 LE length prefix, integers are
//! little-endian, keys and slot addresses are 32 raw bytes. The discriminator
//! is the first 8 bytes of `SHA-256("account:<Name>")`, which lets a scan
//! pick out one record kind without decoding anything else.

use borsh::{BorshDeserialize, BorshSerialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("not a {expected} record (discriminator {found:02x?})")]
    WrongDiscriminator {
        expected: &'static str,
        found: [u8; 8],
    },

    #[error("{0} record is shorter than its discriminator")]
    Truncated(&'static str),

    #[error("{count} trailing bytes after {kind} record")]
    TrailingBytes { kind: &'static str, count: usize },

    #[error("malformed {kind} record: {reason}")]
    Malformed { kind: &'static str, reason: String },

    #[error("failed to encode {kind} record: {reason}")]
    Encode { kind: &'static str, reason: String },
}

/// A record type that lives in a ledger slot.
pub trait AccountRecord: BorshSerialize + BorshDeserialize {
    /// Record name; the discriminator is derived from `"account:" + NAME`.
    const NAME: &'static str;
    const DISCRIMINATOR: [u8; 8];

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Self::DISCRIMINATOR.to_vec();
        self.serialize(&mut out).map_err(|e| CodecError::Encode {
            kind: Self::NAME,
            reason: e.to_string(),
        })?;
        Ok(out)
    }

    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let Some((disc, mut body)) = data.split_first_chunk::<8>() else {
            return Err(CodecError::Truncated(Self::NAME));
        };
        if *disc != Self::DISCRIMINATOR {
            return Err(CodecError::WrongDiscriminator {
                expected: Self::NAME,
                found: *disc,
            });
        }
        // Borsh reports a short body as malformed input, not as EOF.
        let record = Self::deserialize(&mut body).map_err(|e| CodecError::Malformed {
            kind: Self::NAME,
            reason: e.to_string(),
        })?;
        if !body.is_empty() {
            return Err(CodecError::TrailingBytes {
                kind: Self::NAME,
                count: body.len(),
            });
        }
        Ok(record)
    }
}
