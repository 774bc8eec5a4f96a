use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("too many seeds: {count} (max {max})")]
    TooManySeeds { count: usize, max: usize },

    #[error("seed {index} is {len} bytes, limit is 32")]
    SeedTooLong { index: usize, len: usize },

    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    #[error("no bump yields an off-curve address")]
    NoViableBump,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("public key is not a valid ed25519 point")]
    MalformedKey,

    #[error("signature does not verify against the signer key")]
    Mismatch,
}
