//! Error types for the image crate.

use thiserror::Error;

use crate::ImageFormat;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur during image inspection.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Unknown image format
    #[error("Unknown image format")]
    UnknownFormat,

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),

    /// The format was recognized but its header could not be read
    #[error("Truncated or unsupported {0:?} header")]
    UnreadableHeader(ImageFormat),

    /// Image decoding error
    #[cfg(feature = "processing")]
    #[error("Image decoding error: {0}")]
    DecodingError(#[from] image::ImageError),
}
