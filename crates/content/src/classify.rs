//! Representation classifier: decides how an input becomes a content object.
//!
//! The order of checks matters. Structural shapes (a readable path, the
//! wrapper grammar) are tested before the loose base64 probe, because short
//! strings and many binary buffers happen to decode as base64.

use crate::error::{ContentError, Result};
use filekit_codec::{is_base64, unwrap_within};
use serde_json::Value;
use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Longest string probed as a filesystem path (Linux `PATH_MAX`).
const MAX_PATH_PROBE_LEN: usize = 4096;

/// Readable and seekable stream.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// An open handle the caller keeps ownership of.
///
/// Its read position is restored after the contents are copied.
pub enum Handle<'a> {
    /// An open file; must refer to a regular file
    File(&'a mut File),
    /// Any seekable stream (cursors, spooled buffers, ...)
    Stream(&'a mut dyn ReadSeek),
}

/// Any value accepted by
/// [`ContentWrapper::from_best_guess`](crate::ContentWrapper::from_best_guess).
pub enum Input<'a> {
    /// An open handle
    Handle(Handle<'a>),
    /// Text: a path, a wrapped string, base64, or plain content
    Text(&'a str),
    /// Bytes; valid UTF-8 is classified like text
    Bytes(Cow<'a, [u8]>),
}

/// Shape an input was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Open handle, copied into a temporary buffer
    Handle,
    /// Existing readable file, referenced in place
    FilePath,
    /// Protocol-wrapped string, referenced in place
    Wrapped,
    /// Base64 text, decoded
    Base64,
    /// Opaque bytes
    Binary,
}

impl Input<'_> {
    /// Classify this input, inspecting at most `probe_len` characters for a
    /// wrapper header.
    pub fn classify(&self, probe_len: usize) -> Representation {
        match self {
            Input::Handle(_) => Representation::Handle,
            Input::Text(text) => classify_text(text, probe_len),
            Input::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => classify_text(text, probe_len),
                Err(_) => Representation::Binary,
            },
        }
    }
}

/// Classify text: path, then wrapper, then base64, then opaque.
pub fn classify_text(text: &str, probe_len: usize) -> Representation {
    if is_readable_file(text) {
        Representation::FilePath
    } else if unwrap_within(text, probe_len).is_some() {
        Representation::Wrapped
    } else if is_base64(text) {
        Representation::Base64
    } else {
        Representation::Binary
    }
}

/// Whether the text names an existing regular file that can be opened.
pub fn is_readable_file(text: &str) -> bool {
    if text.is_empty() || text.len() > MAX_PATH_PROBE_LEN || text.contains('\0') {
        return false;
    }

    let path = Path::new(text);
    path.metadata().is_ok_and(|m| m.is_file()) && File::open(path).is_ok()
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Input::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Input::Bytes(Cow::Borrowed(bytes))
    }
}

impl From<Vec<u8>> for Input<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(Cow::Owned(bytes))
    }
}

impl<'a> From<Handle<'a>> for Input<'a> {
    fn from(handle: Handle<'a>) -> Self {
        Input::Handle(handle)
    }
}

impl<'a> From<&'a mut File> for Input<'a> {
    fn from(file: &'a mut File) -> Self {
        Input::Handle(Handle::File(file))
    }
}

impl<'a> TryFrom<&'a Value> for Input<'a> {
    type Error = ContentError;

    /// Strings become text, arrays of 0..=255 integers become bytes; any
    /// other JSON value is unsupported.
    fn try_from(value: &'a Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Input::Text(text)),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_u64().and_then(|n| u8::try_from(n).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(|bytes| Input::Bytes(Cow::Owned(bytes)))
                .ok_or_else(|| {
                    ContentError::UnsupportedInputType("array with non-byte elements".into())
                }),
            Value::Null => Err(ContentError::UnsupportedInputType("null".into())),
            Value::Bool(_) => Err(ContentError::UnsupportedInputType("boolean".into())),
            Value::Number(_) => Err(ContentError::UnsupportedInputType("number".into())),
            Value::Object(_) => Err(ContentError::UnsupportedInputType("object".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekit_codec::{base64_encode, PROBE_LEN};
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_classify_wrapped() {
        assert_eq!(classify_text("data://image/jpeg,ffd8ffe0", PROBE_LEN), Representation::Wrapped);
        assert_eq!(
            classify_text("data:text/plain;base64,dGVzdA==", PROBE_LEN),
            Representation::Wrapped
        );
    }

    #[test]
    fn test_classify_base64() {
        let encoded = base64_encode(b"test", false);
        assert_eq!(classify_text(&encoded, PROBE_LEN), Representation::Base64);
    }

    #[test]
    fn test_classify_binary() {
        assert_eq!(classify_text("this is a test", PROBE_LEN), Representation::Binary);
        let input = Input::from(&[0xFFu8, 0xD8, 0xFF, 0xE0]);
        assert_eq!(input.classify(PROBE_LEN), Representation::Binary);
    }

    #[test]
    fn test_empty_string_is_base64() {
        // Loose probe, kept after the structural checks
        assert_eq!(classify_text("", PROBE_LEN), Representation::Base64);
    }

    #[test]
    fn test_classify_path_before_wrapper_and_base64() {
        let dir = tempfile::tempdir().unwrap();
        // A file whose name is itself valid base64
        let path = dir.path().join("dGVzdA==");
        std::fs::write(&path, b"contents").unwrap();

        let text = path.to_str().unwrap();
        assert_eq!(classify_text(text, PROBE_LEN), Representation::FilePath);
    }

    #[test]
    fn test_directory_is_not_a_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_readable_file(dir.path().to_str().unwrap()));
    }

    #[test]
    fn test_overlong_text_is_not_probed_as_path() {
        assert!(!is_readable_file(&"a".repeat(MAX_PATH_PROBE_LEN + 1)));
    }

    #[test]
    fn test_classify_handle() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        let input = Input::Handle(Handle::Stream(&mut cursor));
        assert_eq!(input.classify(PROBE_LEN), Representation::Handle);
    }

    #[test]
    fn test_json_inputs() {
        let text = json!("data:,00ff");
        assert!(matches!(Input::try_from(&text), Ok(Input::Text("data:,00ff"))));

        let bytes = json!([0, 255, 16]);
        match Input::try_from(&bytes).unwrap() {
            Input::Bytes(b) => assert_eq!(b.as_ref(), &[0u8, 255, 16]),
            _ => panic!("expected bytes"),
        }

        let unsupported_values = [
            json!(null),
            json!(true),
            json!(42),
            json!({"a": 1}),
            json!([256]),
            json!(["x"]),
        ];
        for unsupported in unsupported_values {
            assert!(matches!(
                Input::try_from(&unsupported),
                Err(ContentError::UnsupportedInputType(_))
            ));
        }
    }
}
