//! Image metadata extraction.

use crate::{detect_format, ImageError, ImageFormat, Result};
use serde::{Deserialize, Serialize};

/// Image metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Content size in bytes
    pub size_bytes: usize,
    /// Color channels (3 for RGB, 4 for CMYK or RGBA), when the header states it
    pub channels: Option<u8>,
    /// Bits per channel, when the header states it
    pub bits: Option<u8>,
}

impl ImageMetadata {
    /// MIME type of the detected format.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Dimensions as HTML attributes, e.g. `width="120" height="80"`.
    pub fn dimensions_string(&self) -> String {
        format!("width=\"{}\" height=\"{}\"", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    width: u32,
    height: u32,
    channels: Option<u8>,
    bits: Option<u8>,
}

/// Extract metadata from image data.
///
/// JPEG, PNG and GIF headers are parsed directly. Other formats are decoded
/// with the `image` crate when the `processing` feature is enabled.
pub fn extract_metadata(data: &[u8]) -> Result<ImageMetadata> {
    let format = detect_format(data)?;

    let header = match format {
        ImageFormat::Jpeg => jpeg_header(data),
        ImageFormat::Png => png_header(data),
        ImageFormat::Gif => gif_header(data),
        _ => None,
    };

    let header = match header {
        Some(header) => header,
        None => decode_header(data, format)?,
    };

    Ok(ImageMetadata {
        width: header.width,
        height: header.height,
        format,
        size_bytes: data.len(),
        channels: header.channels,
        bits: header.bits,
    })
}

#[cfg(feature = "processing")]
fn decode_header(data: &[u8], _format: ImageFormat) -> Result<Header> {
    use image::GenericImageView;

    let img = image::load_from_memory(data)?;
    let (width, height) = img.dimensions();
    let color = img.color();
    let channels = color.channel_count();
    let bits = u8::try_from(color.bits_per_pixel() / u16::from(channels.max(1))).ok();

    Ok(Header {
        width,
        height,
        channels: Some(channels),
        bits,
    })
}

#[cfg(not(feature = "processing"))]
fn decode_header(_data: &[u8], format: ImageFormat) -> Result<Header> {
    Err(ImageError::UnreadableHeader(format))
}

/// Read dimensions, precision and component count from the first SOF marker.
fn jpeg_header(data: &[u8]) -> Option<Header> {
    // Skip SOI marker
    let mut i = 2;

    while i + 4 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }

        let marker = data[i + 1];

        // SOF markers: FF Cx, length, precision, height, width, components
        if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
            if i + 9 < data.len() {
                return Some(Header {
                    bits: Some(data[i + 4]),
                    height: u32::from(u16::from_be_bytes([data[i + 5], data[i + 6]])),
                    width: u32::from(u16::from_be_bytes([data[i + 7], data[i + 8]])),
                    channels: Some(data[i + 9]),
                });
            }
            return None;
        }

        // Standalone markers carry no length
        if marker == 0xD8 || marker == 0xD9 || marker == 0xFF || (0xD0..=0xD7).contains(&marker) {
            i += if marker == 0xFF { 1 } else { 2 };
        } else {
            let length = usize::from(u16::from_be_bytes([data[i + 2], data[i + 3]]));
            i += 2 + length;
        }
    }

    None
}

/// Read the IHDR chunk.
fn png_header(data: &[u8]) -> Option<Header> {
    // 8-byte signature, then IHDR: length, "IHDR", width, height, depth, color type
    if data.len() < 26 || &data[12..16] != b"IHDR" {
        return None;
    }

    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    let channels = match data[25] {
        0 => Some(1),
        2 | 3 => Some(3),
        4 => Some(2),
        6 => Some(4),
        _ => None,
    };

    Some(Header {
        width,
        height,
        channels,
        bits: Some(data[24]),
    })
}

/// Read the logical screen descriptor.
fn gif_header(data: &[u8]) -> Option<Header> {
    // 6-byte signature, width, height (LE), packed fields
    if data.len() < 11 {
        return None;
    }

    let width = u32::from(u16::from_le_bytes([data[6], data[7]]));
    let height = u32::from(u16::from_le_bytes([data[8], data[9]]));

    Some(Header {
        width,
        height,
        channels: Some(3),
        bits: Some((data[10] & 0x07) + 1),
    })
}
