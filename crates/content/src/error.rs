//! Error types for content objects.

use filekit_codec::CodecError;
use filekit_image::ImageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for content operations.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors that can occur while building or inspecting content objects.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Payload decoding or hashing failed
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The classifier exhausted every known input shape
    #[error("Unsupported input type: {0}")]
    UnsupportedInputType(String),

    /// The handle is not a plain file or stream
    #[error("Unsupported handle kind: {0}")]
    UnsupportedHandleKind(String),

    /// Path does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Path exists but cannot be read
    #[error("Unreadable file {}: {source}", .path.display())]
    Unreadable {
        /// The offending path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// No MIME sniffer is configured
    #[error("MIME detection unavailable")]
    MimeDetectionUnavailable,

    /// Conversion to an image object was requested for non-image content
    #[error("Not an image: {mime}")]
    NotAnImage {
        /// The resolved MIME type
        mime: String,
    },

    /// The image decoder could not read the content
    #[error("Undecodable image: {0}")]
    UndecodableImage(#[source] ImageError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Whether this error is a strict base64 decoding failure.
    pub fn is_invalid_base64(&self) -> bool {
        matches!(self, ContentError::Codec(CodecError::InvalidBase64Data))
    }

    /// Whether this error is a malformed hex payload.
    pub fn is_malformed_hex(&self) -> bool {
        matches!(self, ContentError::Codec(CodecError::MalformedHexPayload(_)))
    }
}
