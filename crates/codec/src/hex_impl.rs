//! Hex payload encoding with validation ahead of decoding.

use crate::{CodecError, Result};

/// Check that every character is an ASCII hex digit.
///
/// The empty string passes, since it encodes zero bytes.
pub fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Encode bytes as lowercase hex.
pub fn encode_hex(raw: &[u8]) -> String {
    hex::encode(raw)
}

/// Decode a hex payload.
///
/// # Errors
/// Returns [`CodecError::MalformedHexPayload`] if any character is not a hex
/// digit or if the digit count is odd.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    if let Some((pos, c)) = s.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(CodecError::MalformedHexPayload(format!(
            "non-hex character {:?} at offset {}",
            c, pos
        )));
    }

    if s.len() % 2 != 0 {
        return Err(CodecError::MalformedHexPayload(format!(
            "odd digit count ({})",
            s.len()
        )));
    }

    hex::decode(s).map_err(|e| CodecError::MalformedHexPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hex() {
        assert!(is_hex("ffd8ffe0"));
        assert!(is_hex("FFD8FFE0"));
        assert!(is_hex(""));
        assert!(!is_hex("ffd8.ffe0"));
        assert!(!is_hex("this is a test"));
    }

    #[test]
    fn test_decode_mixed_case() {
        assert_eq!(decode_hex("FfD8").unwrap(), vec![0xFF, 0xD8]);
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        let err = decode_hex("ff.d").unwrap_err();
        assert!(matches!(err, CodecError::MalformedHexPayload(msg) if msg.contains("offset 2")));
    }

    #[test]
    fn test_decode_rejects_odd_length() {
        assert!(matches!(decode_hex("fff"), Err(CodecError::MalformedHexPayload(_))));
    }

    #[test]
    fn test_encode_is_lowercase() {
        assert_eq!(encode_hex(&[0xAB, 0x01]), "ab01");
    }
}
