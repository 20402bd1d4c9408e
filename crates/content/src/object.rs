//! The content object: one value per piece of content, whatever its source.

use crate::builder::ContentWrapper;
use crate::error::{ContentError, Result};
use crate::resolve;
use filekit_codec::{base64_encode_with, decode_payload, digest_hex, HashAlgorithm, WrapperInfo};
use once_cell::sync::OnceCell;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Where a content object's bytes live.
#[derive(Debug, Clone)]
pub(crate) enum Storage {
    /// A readable regular file, read on demand
    FilePath(PathBuf),
    /// A protocol-wrapped string with a validated payload
    Wrapped {
        text: String,
        info: WrapperInfo,
        payload_start: usize,
    },
    /// An in-memory copy taken from a handle
    TemporaryBuffer(Arc<[u8]>),
}

/// Kind of storage backing a content object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Filesystem reference
    FilePath,
    /// Protocol-wrapped string
    ProtocolWrapped,
    /// In-memory copy
    TemporaryBuffer,
}

/// File-like content with uniform access to raw bytes, base64, hash and MIME type.
///
/// Built through [`ContentWrapper`]. The bytes never change after
/// construction; only the name and the MIME type can be overridden.
#[derive(Clone)]
pub struct ContentObject {
    name: String,
    mime_type: OnceCell<String>,
    storage: Storage,
    wrapper: ContentWrapper,
}

impl fmt::Debug for ContentObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentObject")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type.get())
            .field("storage", &self.storage_kind())
            .field("wrapper_info", &self.wrapper_info())
            .finish()
    }
}

impl ContentObject {
    pub(crate) fn new(name: String, storage: Storage, wrapper: ContentWrapper) -> Self {
        Self {
            name,
            mime_type: OnceCell::new(),
            storage,
            wrapper,
        }
    }

    pub(crate) fn with_detected_mime(mut self, mime: String) -> Self {
        self.mime_type = OnceCell::with_value(mime);
        self
    }

    pub(crate) fn wrapper(&self) -> &ContentWrapper {
        &self.wrapper
    }

    /// Get the name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// The MIME type resolved so far, or set by the caller.
    ///
    /// Does not trigger resolution; see [`ContentObject::resolve_mime`].
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.get().map(String::as_str)
    }

    /// Override the MIME type
    pub fn set_mime_type(&mut self, mime_type: impl Into<String>) -> &mut Self {
        self.mime_type = OnceCell::with_value(mime_type.into());
        self
    }

    /// Kind of storage backing this object.
    pub fn storage_kind(&self) -> StorageKind {
        match self.storage {
            Storage::FilePath(_) => StorageKind::FilePath,
            Storage::Wrapped { .. } => StorageKind::ProtocolWrapped,
            Storage::TemporaryBuffer(_) => StorageKind::TemporaryBuffer,
        }
    }

    /// Referenced path, for path-backed objects.
    pub fn path(&self) -> Option<&Path> {
        match &self.storage {
            Storage::FilePath(path) => Some(path),
            _ => None,
        }
    }

    /// Wrapped text, for wrapper-backed objects.
    pub fn wrapped(&self) -> Option<&str> {
        match &self.storage {
            Storage::Wrapped { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Wrapper header, present only for wrapper-backed objects.
    pub fn wrapper_info(&self) -> Option<&WrapperInfo> {
        match &self.storage {
            Storage::Wrapped { info, .. } => Some(info),
            _ => None,
        }
    }

    /// Whether the storage is a protocol-wrapped string.
    pub fn is_wrapped(&self) -> bool {
        self.wrapper_info().is_some()
    }

    /// Whether the storage is wrapped with a base64 payload.
    pub fn is_wrapped_base64(&self) -> bool {
        self.wrapper_info().is_some_and(|info| info.is_base64)
    }

    /// Whether the storage is wrapped with a hex payload.
    pub fn is_wrapped_hex(&self) -> bool {
        self.wrapper_info().is_some_and(|info| !info.is_base64)
    }

    /// Canonical decoded bytes.
    ///
    /// Path-backed and wrapper-backed objects decode on every call; this can
    /// be expensive for large content.
    pub fn raw(&self) -> Result<Cow<'_, [u8]>> {
        match &self.storage {
            Storage::FilePath(path) => std::fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| ContentError::Unreadable {
                    path: path.clone(),
                    source,
                }),
            Storage::Wrapped {
                text,
                info,
                payload_start,
            } => Ok(Cow::Owned(decode_payload(&text[*payload_start..], info.is_base64)?)),
            Storage::TemporaryBuffer(bytes) => Ok(Cow::Borrowed(&bytes[..])),
        }
    }

    /// Base64 of the raw bytes, optionally chunked per RFC 2045.
    pub fn base64(&self, chunked: bool) -> Result<String> {
        let line_length = if chunked {
            self.wrapper.config().base64_line_length
        } else {
            0
        };
        Ok(base64_encode_with(&self.raw()?, line_length))
    }

    /// Resolve the MIME type.
    ///
    /// Precedence: a non-empty wrapper annotation, then the cached or
    /// caller-set value, then sniffing the raw bytes, then the configured
    /// fallback. The sniffed result is cached.
    pub fn resolve_mime(&self) -> Result<&str> {
        if let Some(info) = self.wrapper_info() {
            if !info.mime.is_empty() {
                return Ok(&info.mime);
            }
        }

        self.mime_type
            .get_or_try_init(|| {
                let raw = self.raw()?;
                let mime = self.wrapper.sniff_or_fallback(&raw);
                debug!(name = %self.name, mime = %mime, "Resolved MIME type");
                Ok(mime)
            })
            .map(String::as_str)
    }

    /// Sniff the raw bytes now, ignoring annotations and the cache.
    pub fn detect_mime_type(&self) -> Result<String> {
        Ok(self.wrapper.sniff_or_fallback(&self.raw()?))
    }

    /// Whether the resolved MIME type is an image type.
    pub fn is_image(&self) -> Result<bool> {
        Ok(resolve::mime_top_level(self.resolve_mime()?) == "image")
    }

    /// Hash of the raw bytes under the configured algorithm.
    pub fn hash(&self) -> Result<String> {
        self.hash_using(self.wrapper.config().hash_algorithm)
    }

    /// Hash of the raw bytes under a named algorithm (`"sha1"`, `"SHA-512"`, ...).
    pub fn hash_with(&self, algorithm: &str) -> Result<String> {
        self.hash_using(algorithm.parse::<HashAlgorithm>()?)
    }

    /// Hash of the raw bytes under a given algorithm.
    pub fn hash_using(&self, algorithm: HashAlgorithm) -> Result<String> {
        Ok(digest_hex(algorithm, &self.raw()?))
    }

    /// Hash of the name under the configured algorithm.
    pub fn name_hash(&self) -> String {
        digest_hex(self.wrapper.config().hash_algorithm, self.name.as_bytes())
    }

    /// File extension from the name, else from the MIME subtype.
    pub fn extension(&self, with_dot: bool) -> Result<String> {
        if resolve::extension_from_name(&self.name).is_some() {
            return Ok(resolve::resolve_extension(&self.name, "", with_dot));
        }
        Ok(resolve::resolve_extension(&self.name, self.resolve_mime()?, with_dot))
    }

    /// Content-addressed file name: the content hash, optionally with `.ext`.
    pub fn obfuscated_name(&self, with_extension: bool) -> Result<String> {
        let hash = self.hash()?;
        if with_extension {
            Ok(hash + &self.extension(true)?)
        } else {
            Ok(hash)
        }
    }
}
