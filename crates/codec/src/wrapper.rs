//! Protocol-wrapped strings: `<scheme>:[/]*<mime>[;<extra>],<payload>`.
//!
//! A non-empty `extra` segment marks a base64 payload; otherwise the payload
//! is hex. Binary content is always wrapped as hex, whose alphabet cannot
//! collide with the grammar's delimiters.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{base64_decode_strict, decode_hex, encode_hex, is_hex, Result};

/// Scheme used when wrapping raw bytes.
pub const DEFAULT_SCHEME: &str = "data";

/// Number of leading characters inspected when probing for a wrapper header.
pub const PROBE_LEN: usize = 100;

static WRAPPER_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9]+):/*(.*?)(?:;([^,]*))?,").expect("wrapper header pattern is valid")
});

/// Owned description of a wrapper header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperInfo {
    /// Scheme tag, e.g. `data`
    pub scheme: String,
    /// MIME annotation, possibly empty
    pub mime: String,
    /// Whether the payload is base64 (otherwise hex)
    pub is_base64: bool,
}

/// A parsed wrapped string, borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unwrapped<'a> {
    /// Scheme tag
    pub scheme: &'a str,
    /// MIME annotation, possibly empty
    pub mime: &'a str,
    /// Parameters between the first `;` and the comma
    pub extra: Option<&'a str>,
    /// Everything after the header's comma
    pub payload: &'a str,
}

impl<'a> Unwrapped<'a> {
    /// Whether the payload is declared as base64.
    pub fn is_base64(&self) -> bool {
        self.extra.is_some_and(|extra| !extra.is_empty())
    }

    /// Owned header description.
    pub fn info(&self) -> WrapperInfo {
        WrapperInfo {
            scheme: self.scheme.to_string(),
            mime: self.mime.to_string(),
            is_base64: self.is_base64(),
        }
    }

    /// Decode the payload to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_payload(self.payload, self.is_base64())
    }
}

/// Wrap raw bytes as `<scheme>:<mime>,<hex>`.
///
/// # Example
/// ```
/// use filekit_codec::{wrap, DEFAULT_SCHEME};
///
/// assert_eq!(wrap(DEFAULT_SCHEME, "image/jpeg", &[0xFF, 0xD8]), "data:image/jpeg,ffd8");
/// ```
pub fn wrap(scheme: &str, mime: &str, raw: &[u8]) -> String {
    let payload = encode_hex(raw);
    let mut wrapped = String::with_capacity(scheme.len() + mime.len() + payload.len() + 2);
    wrapped.push_str(scheme);
    wrapped.push(':');
    wrapped.push_str(mime);
    wrapped.push(',');
    wrapped.push_str(&payload);
    wrapped
}

/// Parse a wrapped string, inspecting at most [`PROBE_LEN`] characters for
/// the header.
///
/// Returns `None` when the header grammar does not match.
pub fn unwrap(s: &str) -> Option<Unwrapped<'_>> {
    unwrap_within(s, PROBE_LEN)
}

/// Parse a wrapped string whose header must lie in the first `probe_len`
/// characters.
pub fn unwrap_within(s: &str, probe_len: usize) -> Option<Unwrapped<'_>> {
    let window_end = s.char_indices().nth(probe_len).map_or(s.len(), |(i, _)| i);
    let caps = WRAPPER_HEADER.captures(&s[..window_end])?;
    let header_end = caps.get(0)?.end();

    Some(Unwrapped {
        scheme: caps.get(1)?.as_str(),
        mime: caps.get(2).map_or("", |m| m.as_str()),
        extra: caps.get(3).map(|m| m.as_str()),
        payload: &s[header_end..],
    })
}

/// Decode a wrapper payload as base64 or as hex.
pub fn decode_payload(payload: &str, is_base64: bool) -> Result<Vec<u8>> {
    if is_base64 {
        base64_decode_strict(payload)
    } else {
        decode_hex(payload)
    }
}

/// Whether the string matches the wrapper grammar.
pub fn is_wrapped(s: &str) -> bool {
    unwrap(s).is_some()
}

/// Whether the string is wrapped and declares a base64 payload.
///
/// Only the header is checked; the payload is validated on decode.
pub fn is_wrapped_base64(s: &str) -> bool {
    unwrap(s).is_some_and(|u| u.is_base64())
}

/// Whether the string is wrapped with a payload made only of hex digits.
pub fn is_wrapped_hex(s: &str) -> bool {
    unwrap(s).is_some_and(|u| !u.is_base64() && is_hex(u.payload))
}
