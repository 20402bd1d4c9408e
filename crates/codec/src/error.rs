//! Error types for the codec crate.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while decoding payloads or hashing content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Strict base64 decoding rejected the input
    #[error("Invalid base64 encoded data")]
    InvalidBase64Data,

    /// A hex payload contained non-hex characters or an odd digit count
    #[error("Malformed hex payload: {0}")]
    MalformedHexPayload(String),

    /// The requested hash algorithm is not available
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedHashAlgorithm(String),
}
