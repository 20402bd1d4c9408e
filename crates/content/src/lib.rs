//! Uniform content objects for filekit.
//!
//! Accepts file paths, open handles, raw buffers, base64 text and
//! protocol-wrapped strings (`data:image/png;base64,...`), and exposes each
//! as a [`ContentObject`] with the same accessors:
//!
//! - **Raw bytes and base64**, decoded on demand
//! - **MIME type**, from the wrapper annotation or sniffed from the bytes
//! - **Hashes**, of the content or of its name
//! - **Extension and obfuscated name**, for content-addressed storage
//!
//! # Example
//!
//! ```rust
//! use filekit_content::ContentWrapper;
//!
//! let wrapper = ContentWrapper::default();
//! let object = wrapper.from_best_guess(b"test and stuff", Some("notes.txt")).unwrap();
//!
//! assert_eq!(object.resolve_mime().unwrap(), "text/plain");
//! assert_eq!(object.extension(true).unwrap(), ".txt");
//! assert!(object.obfuscated_name(true).unwrap().ends_with(".txt"));
//! ```

#![warn(missing_docs)]

mod builder;
mod classify;
pub mod config;
mod error;
mod kind;
mod object;
pub mod resolve;
mod sniff;

pub use builder::ContentWrapper;
pub use classify::{classify_text, is_readable_file, Handle, Input, ReadSeek, Representation};
pub use config::{ResolverConfig, DEFAULT_NAME, FALLBACK_MIME};
pub use error::{ContentError, Result};
pub use kind::{Content, ContentKind, ImageObject};
pub use object::{ContentObject, StorageKind};
pub use sniff::{MagicSniffer, MimeSniffer, EMPTY_MIME, TEXT_MIME};

pub use filekit_codec::{HashAlgorithm, WrapperInfo};
pub use filekit_image::{ImageDecoder, ImageFormat, ImageMetadata};
