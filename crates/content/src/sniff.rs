//! Best-effort MIME sniffing over decoded bytes.

/// MIME type reported for zero-length content.
pub const EMPTY_MIME: &str = "application/x-empty";

/// MIME type reported for content that reads as plain text.
pub const TEXT_MIME: &str = "text/plain";

/// Bytes inspected by the text heuristic.
const TEXT_SAMPLE_LEN: usize = 8192;

/// Derives a MIME type from content bytes.
///
/// `None` means indeterminate; the resolver then falls back to its
/// configured generic type.
pub trait MimeSniffer: Send + Sync {
    /// Sniff the MIME type of `bytes`.
    fn sniff(&self, bytes: &[u8]) -> Option<String>;
}

impl<F> MimeSniffer for F
where
    F: Fn(&[u8]) -> Option<String> + Send + Sync,
{
    fn sniff(&self, bytes: &[u8]) -> Option<String> {
        self(bytes)
    }
}

/// Magic-number sniffer: image signatures, then the `infer` table, then a
/// plain-text heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct MagicSniffer;

impl MimeSniffer for MagicSniffer {
    fn sniff(&self, bytes: &[u8]) -> Option<String> {
        if bytes.is_empty() {
            return Some(EMPTY_MIME.to_string());
        }

        if let Ok(format) = filekit_image::detect_format(bytes) {
            return Some(format.mime_type().to_string());
        }

        if let Some(kind) = infer::get(bytes) {
            return Some(kind.mime_type().to_string());
        }

        looks_like_text(bytes).then(|| TEXT_MIME.to_string())
    }
}

/// UTF-8 without control characters other than tab, LF, CR and FF.
fn looks_like_text(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(TEXT_SAMPLE_LEN)];

    let text = match std::str::from_utf8(sample) {
        Ok(text) => text,
        // A multi-byte sequence cut by the sample boundary is fine
        Err(e) if e.error_len().is_none() && sample.len() < bytes.len() => {
            match std::str::from_utf8(&sample[..e.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return false,
            }
        }
        Err(_) => return false,
    };

    text.chars()
        .all(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r' | '\x0C'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
        assert_eq!(MagicSniffer.sniff(&data).as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_sniff_pdf_through_infer() {
        let data = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n1 0 obj";
        assert_eq!(MagicSniffer.sniff(data).as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_sniff_text() {
        assert_eq!(MagicSniffer.sniff(b"test and stuff").as_deref(), Some("text/plain"));
        assert_eq!(MagicSniffer.sniff("größe\r\n\tok".as_bytes()).as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_sniff_empty() {
        assert_eq!(MagicSniffer.sniff(b"").as_deref(), Some(EMPTY_MIME));
    }

    #[test]
    fn test_sniff_binary_is_indeterminate() {
        assert_eq!(MagicSniffer.sniff(&[0x00, 0x01, 0x02, 0x03, 0xFE]), None);
    }

    #[test]
    fn test_text_sample_boundary_inside_multibyte_char() {
        let mut text = "a".repeat(TEXT_SAMPLE_LEN - 1);
        text.push('é');
        text.push_str("tail");
        assert!(looks_like_text(text.as_bytes()));
    }

    #[test]
    fn test_closure_sniffer() {
        let sniffer = |_: &[u8]| Some("text/donkey".to_string());
        assert_eq!(sniffer.sniff(b"anything").as_deref(), Some("text/donkey"));
    }
}
