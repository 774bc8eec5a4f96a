//! Ed25519 signing and verification of submitted instructions.

use ballot_types::{PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

use crate::error::SignatureError;

/// Sign a message with a private key.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify `signature` over `message` by `public_key`.
///
/// Uses strict verification: small-order keys and non-canonical signatures
/// are rejected.
pub fn verify_signature(
    message: &[u8],
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<(), SignatureError> {
    let verifying_key =
        VerifyingKey::from_bytes(&public_key.0).map_err(|_| SignatureError::MalformedKey)?;
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key
        .verify_strict(message, &dalek_sig)
        .map_err(|_| SignatureError::Mismatch)
}
