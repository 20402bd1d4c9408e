//! Pluggable image metadata decoding.

use crate::{extract_metadata, ImageMetadata, Result};

/// Decodes image metadata from raw bytes.
///
/// Content objects hold a decoder behind `Arc<dyn ImageDecoder>`, so
/// implementations must be shareable across threads.
pub trait ImageDecoder: Send + Sync {
    /// Decode width, height, format and color metadata.
    fn decode(&self, data: &[u8]) -> Result<ImageMetadata>;
}

/// Default decoder backed by [`extract_metadata`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderDecoder;

impl ImageDecoder for HeaderDecoder {
    fn decode(&self, data: &[u8]) -> Result<ImageMetadata> {
        extract_metadata(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageFormat;

    #[test]
    fn test_header_decoder_as_trait_object() {
        let decoder: Box<dyn ImageDecoder> = Box::new(HeaderDecoder);
        let meta = decoder.decode(b"GIF87a\x02\x00\x03\x00\x80\x00\x00").unwrap();
        assert_eq!(meta.format, ImageFormat::Gif);
        assert_eq!((meta.width, meta.height), (2, 3));
    }

    #[test]
    fn test_header_decoder_rejects_text() {
        assert!(HeaderDecoder.decode(b"plain text").is_err());
    }
}
