//! Content construction: one entry point per input shape, plus best-guess
//! classification.

use crate::classify::{Handle, Input, Representation};
use crate::config::ResolverConfig;
use crate::error::{ContentError, Result};
use crate::object::{ContentObject, Storage};
use crate::resolve::mime_essence;
use crate::sniff::{MagicSniffer, MimeSniffer};
use filekit_codec::{base64_decode_strict, unwrap_within, wrap, WrapperInfo};
use filekit_image::{HeaderDecoder, ImageDecoder};
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds [`ContentObject`]s and carries the collaborators they resolve
/// metadata with.
///
/// Cloning is cheap; every object keeps a clone of the wrapper that built it.
///
/// # Example
/// ```
/// use filekit_content::ContentWrapper;
///
/// let wrapper = ContentWrapper::default();
/// let object = wrapper.from_best_guess("data:text/plain;base64,dGVzdA==", None).unwrap();
///
/// assert_eq!(object.raw().unwrap().as_ref(), b"test");
/// assert_eq!(object.resolve_mime().unwrap(), "text/plain");
/// ```
#[derive(Clone)]
pub struct ContentWrapper {
    config: Arc<ResolverConfig>,
    sniffer: Option<Arc<dyn MimeSniffer>>,
    image_decoder: Arc<dyn ImageDecoder>,
}

impl Default for ContentWrapper {
    fn default() -> Self {
        Self {
            config: Arc::new(ResolverConfig::default()),
            sniffer: Some(Arc::new(MagicSniffer)),
            image_decoder: Arc::new(HeaderDecoder),
        }
    }
}

impl fmt::Debug for ContentWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentWrapper")
            .field("config", &self.config)
            .field("sniffer", &self.sniffer.is_some())
            .finish_non_exhaustive()
    }
}

impl ContentWrapper {
    /// Create a wrapper with a validated configuration and default collaborators
    pub fn new(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            ..Self::default()
        })
    }

    /// Use a custom MIME sniffer
    pub fn with_sniffer(mut self, sniffer: impl MimeSniffer + 'static) -> Self {
        self.sniffer = Some(Arc::new(sniffer));
        self
    }

    /// Disable MIME sniffing; resolution falls back to the configured type
    pub fn without_sniffer(mut self) -> Self {
        self.sniffer = None;
        self
    }

    /// Use a custom image metadata decoder
    pub fn with_image_decoder(mut self, decoder: impl ImageDecoder + 'static) -> Self {
        self.image_decoder = Arc::new(decoder);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub(crate) fn image_decoder(&self) -> &dyn ImageDecoder {
        self.image_decoder.as_ref()
    }

    /// Sniff a MIME type; `Ok(None)` means indeterminate.
    pub fn sniff(&self, bytes: &[u8]) -> Result<Option<String>> {
        match &self.sniffer {
            Some(sniffer) => Ok(sniffer.sniff(bytes)),
            None => Err(ContentError::MimeDetectionUnavailable),
        }
    }

    /// Sniff a MIME type, falling back to the configured generic type.
    ///
    /// Parameters are stripped, so every construction path reports the same
    /// bare `type/subtype` for the same bytes. A type too long to fit a
    /// wrapper header inside the probe window is replaced by the fallback.
    pub fn sniff_or_fallback(&self, bytes: &[u8]) -> String {
        let sniffed = match self.sniff(bytes) {
            Ok(Some(mime)) => mime,
            Ok(None) => {
                debug!(len = bytes.len(), "MIME type indeterminate, using fallback");
                return self.config.fallback_mime.clone();
            }
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %self.config.fallback_mime,
                    "Using fallback MIME type"
                );
                return self.config.fallback_mime.clone();
            }
        };

        let essence = mime_essence(&sniffed);
        if essence.is_empty() || !self.fits_wrapper_header(essence) {
            debug!(sniffed = %sniffed, "Sniffed MIME type unusable, using fallback");
            return self.config.fallback_mime.clone();
        }

        essence.to_string()
    }

    /// Whether `<scheme>:<mime>,` lies within the wrapper probe window.
    fn fits_wrapper_header(&self, mime: &str) -> bool {
        let header_chars = self.config.wrapper_scheme.chars().count() + mime.chars().count() + 2;
        header_chars <= self.config.wrapper_probe_len
    }

    fn name_or_default(&self, name: Option<&str>) -> String {
        name.map_or_else(|| self.config.default_name.clone(), str::to_string)
    }

    /// Reference a readable regular file; its bytes are read on demand.
    ///
    /// The object is named after the file.
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<ContentObject> {
        let path = path.as_ref();

        let metadata = std::fs::metadata(path).map_err(|e| path_error(path, e))?;
        if !metadata.is_file() {
            return Err(ContentError::Unreadable {
                path: path.to_path_buf(),
                source: io::Error::other("not a regular file"),
            });
        }
        File::open(path).map_err(|e| path_error(path, e))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.default_name.clone());

        debug!(path = %path.display(), "Content references file");
        Ok(ContentObject::new(name, Storage::FilePath(path.to_path_buf()), self.clone()))
    }

    /// Copy a handle's entire contents into a temporary buffer and sniff
    /// its MIME type. The handle's read position is restored.
    pub fn from_handle(&self, handle: Handle<'_>, name: Option<&str>) -> Result<ContentObject> {
        let bytes = match handle {
            Handle::File(file) => {
                let file_type = file.metadata()?.file_type();
                if !file_type.is_file() {
                    let kind = if file_type.is_dir() { "directory" } else { "special file" };
                    return Err(ContentError::UnsupportedHandleKind(kind.to_string()));
                }
                copy_restoring_position(file)?
            }
            Handle::Stream(stream) => copy_restoring_position(stream)?,
        };

        let mime = self.sniff_or_fallback(&bytes);
        debug!(len = bytes.len(), mime = %mime, "Copied handle into temporary buffer");

        let storage = Storage::TemporaryBuffer(Arc::from(bytes));
        Ok(ContentObject::new(self.name_or_default(name), storage, self.clone())
            .with_detected_mime(mime))
    }

    /// Wrap raw bytes as `<scheme>:<sniffed mime>,<hex>`.
    ///
    /// The wrapped text always parses again through
    /// [`from_wrapped`](Self::from_wrapped).
    pub fn from_buffer(&self, bytes: &[u8], name: Option<&str>) -> ContentObject {
        let scheme = &self.config.wrapper_scheme;
        let annotation = self.sniff_or_fallback(bytes);

        let text = wrap(scheme, &annotation, bytes);
        let payload_start = scheme.len() + annotation.len() + 2;
        let info = WrapperInfo {
            scheme: scheme.clone(),
            mime: annotation.clone(),
            is_base64: false,
        };

        let storage = Storage::Wrapped {
            text,
            info,
            payload_start,
        };
        ContentObject::new(self.name_or_default(name), storage, self.clone())
            .with_detected_mime(annotation)
    }

    /// Decode strict base64 text, then wrap the bytes as
    /// [`from_buffer`](Self::from_buffer) does.
    pub fn from_base64(&self, text: &str, name: Option<&str>) -> Result<ContentObject> {
        let decoded = base64_decode_strict(text)?;
        Ok(self.from_buffer(&decoded, name))
    }

    /// Reference a protocol-wrapped string in place.
    ///
    /// The payload is validated now, so a bad payload fails here rather than
    /// on first access.
    pub fn from_wrapped(
        &self,
        text: impl Into<String>,
        name: Option<&str>,
    ) -> Result<ContentObject> {
        let text = text.into();

        let (info, payload_start) = {
            let unwrapped =
                unwrap_within(&text, self.config.wrapper_probe_len).ok_or_else(|| {
                    ContentError::UnsupportedInputType(
                        "string does not match the wrapper grammar".into(),
                    )
                })?;
            unwrapped.decode()?;
            (unwrapped.info(), text.len() - unwrapped.payload.len())
        };

        let storage = Storage::Wrapped {
            text,
            info,
            payload_start,
        };
        Ok(ContentObject::new(self.name_or_default(name), storage, self.clone()))
    }

    /// Classify the input and construct accordingly.
    ///
    /// Handles are copied; text naming a readable file or matching the
    /// wrapper grammar is referenced in place; text that decodes as strict
    /// base64 is decoded; anything else is wrapped as opaque bytes.
    pub fn from_best_guess<'a>(
        &self,
        input: impl Into<Input<'a>>,
        name: Option<&str>,
    ) -> Result<ContentObject> {
        let input = input.into();
        let representation = input.classify(self.config.wrapper_probe_len);
        debug!(?representation, "Classified input");

        match input {
            Input::Handle(handle) => self.from_handle(handle, name),
            Input::Text(text) => self.from_text(text, representation, name),
            Input::Bytes(bytes) => match std::str::from_utf8(&bytes) {
                Ok(text) => self.from_text(text, representation, name),
                Err(_) => Ok(self.from_buffer(&bytes, name)),
            },
        }
    }

    /// Best-guess construction from a JSON value.
    pub fn from_json(&self, value: &Value, name: Option<&str>) -> Result<ContentObject> {
        self.from_best_guess(Input::try_from(value)?, name)
    }

    fn from_text(
        &self,
        text: &str,
        representation: Representation,
        name: Option<&str>,
    ) -> Result<ContentObject> {
        match representation {
            Representation::FilePath => {
                let mut object = self.from_path(text)?;
                if let Some(name) = name {
                    object.set_name(name);
                }
                Ok(object)
            }
            Representation::Wrapped => self.from_wrapped(text, name),
            Representation::Base64 => self.from_base64(text, name),
            Representation::Binary | Representation::Handle => {
                Ok(self.from_buffer(text.as_bytes(), name))
            }
        }
    }
}

fn path_error(path: &Path, source: io::Error) -> ContentError {
    if source.kind() == io::ErrorKind::NotFound {
        ContentError::NotFound(path.to_path_buf())
    } else {
        ContentError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read everything from the start, then seek back to where the caller was.
fn copy_restoring_position<R: Read + Seek + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let original = reader.stream_position()?;
    reader.seek(SeekFrom::Start(0))?;

    let mut bytes = Vec::new();
    let copied = reader.read_to_end(&mut bytes);
    reader.seek(SeekFrom::Start(original))?;
    copied?;

    Ok(bytes)
}
