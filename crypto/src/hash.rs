//! SHA-256 hashing.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    sha256_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Full 32-byte digest of a proposal title, used as seed material.
///
/// Titles may be up to 100 bytes but a single seed is capped at 32, so the
/// title is never used raw.
pub fn title_digest(title: &str) -> [u8; 32] {
    sha256(title.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        let h = sha256(b"abc");
        assert_eq!(
            h[..4],
            [0xba, 0x78, 0x16, 0xbf],
            "SHA-256(\"abc\") starts with ba7816bf"
        );
    }

    #[test]
    fn sha256_multi_equivalent() {
        assert_eq!(sha256(b"helloworld"), sha256_multi(&[b"hello", b"world"]));
    }

    #[test]
    fn title_digest_is_full_width() {
        let long = "x".repeat(100);
        let d = title_digest(&long);
        assert_eq!(d.len(), 32);
        assert_ne!(d, title_digest(&"x".repeat(99)));
    }
}
