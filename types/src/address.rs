//! Slot addresses and program ids.
//!
//! Both are opaque 32-byte identifiers. A [`SlotAddress`] names the single
//! location in the ledger where one record may live; it is always derived from
//! seed material, never allocated. A [`ProgramId`] namespaces those derivations
//! so that two deployments of the voting program never share slots.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// A 32-byte ledger slot identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
pub struct SlotAddress([u8; 32]);

impl SlotAddress {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SlotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotAddress({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for SlotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl FromStr for SlotAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode_32(s).map(Self)
    }
}

impl AsRef<[u8]> for SlotAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for SlotAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity of a deployed voting program. Mixed into every slot derivation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId([u8; 32]);

impl ProgramId {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProgramId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl FromStr for ProgramId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode_32(s).map(Self)
    }
}

// Inline hex codec to avoid adding the `hex` crate as a dependency of types.
pub(crate) mod hex {
    use crate::ParseError;

    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn decode_32(s: &str) -> Result<[u8; 32], ParseError> {
        let mut out = [0u8; 32];
        decode_into(s, &mut out)?;
        Ok(out)
    }

    pub fn decode_into(s: &str, out: &mut [u8]) -> Result<(), ParseError> {
        let expected = out.len() * 2;
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != expected {
            return Err(ParseError::InvalidLength {
                expected,
                actual: chars.len(),
            });
        }
        for (i, byte) in out.iter_mut().enumerate() {
            let hi = nibble(chars[2 * i])?;
            let lo = nibble(chars[2 * i + 1])?;
            *byte = (hi << 4) | lo;
        }
        Ok(())
    }

    fn nibble(c: char) -> Result<u8, ParseError> {
        c.to_digit(16)
            .map(|d| d as u8)
            .ok_or(ParseError::InvalidHex(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_roundtrip() {
        let addr = SlotAddress::new([0xab; 32]);
        let text = addr.to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(text.parse::<SlotAddress>().unwrap(), addr);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = "abcd".parse::<SlotAddress>().unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidLength {
                expected: 64,
                actual: 4
            }
        );
    }

    #[test]
    fn parse_rejects_non_hex() {
        let text = format!("zz{}", "0".repeat(62));
        assert_eq!(
            text.parse::<SlotAddress>().unwrap_err(),
            ParseError::InvalidHex('z')
        );
    }

    #[test]
    fn borsh_is_raw_bytes() {
        let addr = SlotAddress::new([7u8; 32]);
        let bytes = borsh::to_vec(&addr).unwrap();
        assert_eq!(bytes, vec![7u8; 32]);
    }

    #[test]
    fn json_is_hex_string() {
        let addr = SlotAddress::new([0x1f; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", "1f".repeat(32)));
        assert_eq!(serde_json::from_str::<SlotAddress>(&json).unwrap(), addr);
        assert!(serde_json::from_str::<SlotAddress>("\"abcd\"").is_err());
        assert!(serde_json::from_str::<SlotAddress>("42").is_err());
    }
}
