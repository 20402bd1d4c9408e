//! Content hashing with a selectable digest algorithm.

use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

use crate::{CodecError, Result};

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-1 (40 hex chars)
    Sha1,
    /// SHA-224 (56 hex chars)
    Sha224,
    /// SHA-256 (64 hex chars)
    #[default]
    Sha256,
    /// SHA-384 (96 hex chars)
    Sha384,
    /// SHA-512 (128 hex chars)
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Length of the hex digest in characters.
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha224 => 56,
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Sha384 => 96,
            HashAlgorithm::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CodecError;

    /// Parse an algorithm name; case and dashes are ignored (`SHA-256`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == normalized)
            .ok_or_else(|| CodecError::UnsupportedHashAlgorithm(s.to_string()))
    }
}

/// Hash bytes and return the lowercase hex digest.
///
/// # Example
/// ```
/// use filekit_codec::{digest_hex, HashAlgorithm};
///
/// let digest = digest_hex(HashAlgorithm::Sha1, b"test");
/// assert_eq!(digest, "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3");
/// ```
pub fn digest_hex(algorithm: HashAlgorithm, bytes: &[u8]) -> String {
    match algorithm {
        HashAlgorithm::Sha1 => hex_digest::<Sha1>(bytes),
        HashAlgorithm::Sha224 => hex_digest::<Sha224>(bytes),
        HashAlgorithm::Sha256 => hex_digest::<Sha256>(bytes),
        HashAlgorithm::Sha384 => hex_digest::<Sha384>(bytes),
        HashAlgorithm::Sha512 => hex_digest::<Sha512>(bytes),
    }
}

fn hex_digest<D: Digest>(bytes: &[u8]) -> String {
    let mut hasher = D::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            digest_hex(HashAlgorithm::Sha256, b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_digest_lengths() {
        for alg in HashAlgorithm::ALL {
            let digest = digest_hex(alg, b"hello");
            assert_eq!(digest.len(), alg.hex_len(), "{}", alg);
            assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("sha256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("SHA-512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
        assert_eq!(" sha1 ".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "whirlpool".parse::<HashAlgorithm>(),
            Err(CodecError::UnsupportedHashAlgorithm("whirlpool".to_string()))
        );
    }

    #[test]
    fn test_different_content_different_digest() {
        assert_ne!(
            digest_hex(HashAlgorithm::default(), b"hello"),
            digest_hex(HashAlgorithm::default(), b"world")
        );
    }
}
