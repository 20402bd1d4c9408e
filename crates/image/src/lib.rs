//! Image inspection utilities for filekit.
//!
//! This crate provides:
//! - Format detection from magic bytes
//! - Header metadata extraction (dimensions, channels, bit depth)
//! - The [`ImageDecoder`] seam used by image content objects

#![warn(missing_docs)]

mod decoder;
mod detect;
mod metadata;
mod error;

pub use decoder::{HeaderDecoder, ImageDecoder};
pub use detect::{detect_format, ImageFormat};
pub use metadata::{extract_metadata, ImageMetadata};
pub use error::{ImageError, Result};
