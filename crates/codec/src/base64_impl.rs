//! Strict base64 decoding and RFC 2045 chunked encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{CodecError, Result};

/// Line length for chunked output, per RFC 2045.
pub const DEFAULT_LINE_LENGTH: usize = 76;

const LINE_BREAK: &str = "\r\n";

/// Decode base64 text, rejecting invalid alphabet or padding.
///
/// Embedded line breaks are removed first so that chunked and unchunked
/// encodings of the same bytes decode identically.
///
/// # Example
/// ```
/// use filekit_codec::base64_decode_strict;
///
/// assert_eq!(base64_decode_strict("dGVz\r\ndA==").unwrap(), b"test");
/// assert!(base64_decode_strict("not base64!").is_err());
/// ```
pub fn base64_decode_strict(s: &str) -> Result<Vec<u8>> {
    let decoded = if s.contains(['\r', '\n']) {
        let joined: String = s.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
        STANDARD.decode(joined)
    } else {
        STANDARD.decode(s)
    };

    decoded.map_err(|_| CodecError::InvalidBase64Data)
}

/// Check whether a string survives strict base64 decoding.
///
/// This is a loose probe: empty strings and many short words pass it.
pub fn is_base64(s: &str) -> bool {
    base64_decode_strict(s).is_ok()
}

/// Encode bytes as base64.
///
/// With `chunked` set, a CRLF follows every 76 encoded characters,
/// including the last (possibly shorter) line.
pub fn base64_encode(raw: &[u8], chunked: bool) -> String {
    if chunked {
        base64_encode_with(raw, DEFAULT_LINE_LENGTH)
    } else {
        STANDARD.encode(raw)
    }
}

/// Encode bytes as chunked base64 with a custom line length.
///
/// A `line_length` of zero disables chunking.
pub fn base64_encode_with(raw: &[u8], line_length: usize) -> String {
    let encoded = STANDARD.encode(raw);
    if line_length == 0 || encoded.is_empty() {
        return encoded;
    }

    let lines = encoded.len().div_ceil(line_length);
    let mut chunked = String::with_capacity(encoded.len() + lines * LINE_BREAK.len());

    // Encoded output is pure ASCII, so byte chunks are valid str slices
    for line in encoded.as_bytes().chunks(line_length) {
        chunked.extend(line.iter().map(|&b| b as char));
        chunked.push_str(LINE_BREAK);
    }

    chunked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_simple() {
        assert_eq!(base64_decode_strict("dGVzdA==").unwrap(), b"test");
    }

    #[test]
    fn test_decode_rejects_bad_alphabet() {
        assert_eq!(base64_decode_strict("dGV*dA=="), Err(CodecError::InvalidBase64Data));
    }

    #[test]
    fn test_decode_rejects_bad_padding() {
        assert!(base64_decode_strict("dGVzdA=").is_err());
        assert!(base64_decode_strict("dGVzdA").is_err());
    }

    #[test]
    fn test_empty_is_base64() {
        // Known false positive of the loose probe
        assert!(is_base64(""));
        assert_eq!(base64_decode_strict("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_binary_is_not_base64() {
        let jpeg_header = String::from_utf8_lossy(&[0xFF, 0xD8, 0xFF, 0xE0]).into_owned();
        assert!(!is_base64(&jpeg_header));
    }

    #[test]
    fn test_chunked_line_length() {
        let raw = vec![0xABu8; 200];
        let chunked = base64_encode(&raw, true);
        let lines: Vec<&str> = chunked.split("\r\n").collect();

        // Trailing CRLF leaves an empty final element
        assert_eq!(lines.last(), Some(&""));
        for line in &lines[..lines.len() - 2] {
            assert_eq!(line.len(), DEFAULT_LINE_LENGTH);
        }
        assert!(lines[lines.len() - 2].len() <= DEFAULT_LINE_LENGTH);
    }

    #[test]
    fn test_unchunked_is_single_line() {
        let raw = vec![0x11u8; 200];
        assert!(!base64_encode(&raw, false).contains('\n'));
    }

    #[test]
    fn test_empty_encodes_empty() {
        assert_eq!(base64_encode(b"", true), "");
        assert_eq!(base64_encode(b"", false), "");
    }

    #[test]
    fn test_zero_line_length_disables_chunking() {
        let raw = vec![0x22u8; 100];
        assert_eq!(base64_encode_with(&raw, 0), base64_encode(&raw, false));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_independent_of_chunking(
            raw in proptest::collection::vec(any::<u8>(), 0..512)
        ) {
            prop_assert_eq!(base64_decode_strict(&base64_encode(&raw, true)).unwrap(), raw.clone());
            prop_assert_eq!(base64_decode_strict(&base64_encode(&raw, false)).unwrap(), raw);
        }
    }
}
