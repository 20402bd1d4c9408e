//! Payload codecs for filekit.
//!
//! This crate provides:
//! - The protocol-wrapper grammar (`scheme:mime[;base64],payload`)
//! - Strict base64 decoding and RFC 2045 chunked encoding
//! - Validated hex decoding
//! - Content hashing with selectable algorithms

#![warn(missing_docs)]

mod base64_impl;
mod hash;
mod hex_impl;
mod wrapper;
mod error;

pub use base64_impl::{
    base64_decode_strict, base64_encode, base64_encode_with, is_base64, DEFAULT_LINE_LENGTH,
};
pub use hash::{digest_hex, HashAlgorithm};
pub use hex_impl::{decode_hex, encode_hex, is_hex};
pub use wrapper::{
    decode_payload, is_wrapped, is_wrapped_base64, is_wrapped_hex, unwrap, unwrap_within, wrap,
    Unwrapped, WrapperInfo, DEFAULT_SCHEME, PROBE_LEN,
};
pub use error::{CodecError, Result};
