//! Content kinds: specialized views chosen at construction time.

use crate::error::{ContentError, Result};
use crate::object::ContentObject;
use filekit_image::{ImageFormat, ImageMetadata};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use tracing::debug;

/// Requested specialization of a content object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Plain content object
    #[default]
    Generic,
    /// Image content with decoded dimensions
    Image,
}

impl ContentKind {
    /// Specialize an object, failing if it does not fit this kind.
    pub fn build(self, object: ContentObject) -> Result<Content> {
        match self {
            ContentKind::Generic => Ok(Content::Generic(object)),
            ContentKind::Image => ImageObject::try_from_object(object).map(Content::Image),
        }
    }
}

/// A content object in one of its specialized forms.
#[derive(Debug, Clone)]
pub enum Content {
    /// Plain content
    Generic(ContentObject),
    /// Image content
    Image(ImageObject),
}

impl Content {
    /// Kind of this content.
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Generic(_) => ContentKind::Generic,
            Content::Image(_) => ContentKind::Image,
        }
    }

    /// The underlying content object.
    pub fn object(&self) -> &ContentObject {
        match self {
            Content::Generic(object) => object,
            Content::Image(image) => &image.object,
        }
    }

    /// Consume into the underlying content object.
    pub fn into_object(self) -> ContentObject {
        match self {
            Content::Generic(object) => object,
            Content::Image(image) => image.object,
        }
    }

    /// The image view, if this is image content.
    pub fn as_image(&self) -> Option<&ImageObject> {
        match self {
            Content::Image(image) => Some(image),
            Content::Generic(_) => None,
        }
    }
}

/// Image content. Dimensions are decoded lazily and cached.
///
/// Dereferences to the underlying [`ContentObject`].
#[derive(Debug, Clone)]
pub struct ImageObject {
    object: ContentObject,
    metadata: OnceCell<ImageMetadata>,
}

impl ImageObject {
    /// Wrap an object whose resolved MIME type is `image/*`.
    pub fn try_from_object(object: ContentObject) -> Result<Self> {
        if !object.is_image()? {
            return Err(ContentError::NotAnImage {
                mime: object.resolve_mime()?.to_string(),
            });
        }

        Ok(Self {
            object,
            metadata: OnceCell::new(),
        })
    }

    /// Decoded image metadata.
    pub fn metadata(&self) -> Result<&ImageMetadata> {
        self.metadata.get_or_try_init(|| {
            let raw = self.object.raw()?;
            let metadata = self
                .object
                .wrapper()
                .image_decoder()
                .decode(&raw)
                .map_err(ContentError::UndecodableImage)?;
            debug!(
                name = %self.object.name(),
                width = metadata.width,
                height = metadata.height,
                "Decoded image metadata"
            );
            Ok(metadata)
        })
    }

    /// Width in pixels
    pub fn width(&self) -> Result<u32> {
        Ok(self.metadata()?.width)
    }

    /// Height in pixels
    pub fn height(&self) -> Result<u32> {
        Ok(self.metadata()?.height)
    }

    /// Decoded format
    pub fn format(&self) -> Result<ImageFormat> {
        Ok(self.metadata()?.format)
    }

    /// MIME type of the decoded format, which may differ from the annotated one.
    pub fn mime(&self) -> Result<&'static str> {
        Ok(self.metadata()?.mime_type())
    }

    /// Color channels, if the format states them
    pub fn channels(&self) -> Result<Option<u8>> {
        Ok(self.metadata()?.channels)
    }

    /// Bits per channel, if the format states them
    pub fn bits(&self) -> Result<Option<u8>> {
        Ok(self.metadata()?.bits)
    }

    /// `width="W" height="H"`
    pub fn dimensions_string(&self) -> Result<String> {
        Ok(self.metadata()?.dimensions_string())
    }

    /// Consume into the underlying content object.
    pub fn into_object(self) -> ContentObject {
        self.object
    }
}

impl Deref for ImageObject {
    type Target = ContentObject;

    fn deref(&self) -> &ContentObject {
        &self.object
    }
}

impl ContentObject {
    /// Convert into an image object; fails with [`ContentError::NotAnImage`]
    /// unless the resolved MIME type is `image/*`.
    pub fn into_image(self) -> Result<ImageObject> {
        ImageObject::try_from_object(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ContentWrapper;
    use filekit_image::ImageDecoder;

    const GIF: &[u8] = b"GIF89a\x20\x00\x10\x00\xF7\x00\x00";

    #[test]
    fn test_generic_kind() {
        let object = ContentWrapper::default().from_buffer(b"hello", None);
        let content = ContentKind::default().build(object).unwrap();
        assert_eq!(content.kind(), ContentKind::Generic);
        assert!(content.as_image().is_none());
        assert_eq!(content.object().raw().unwrap().as_ref(), b"hello");
    }

    #[test]
    fn test_image_kind() {
        let object = ContentWrapper::default().from_buffer(GIF, Some("pixel.gif"));
        let content = ContentKind::Image.build(object).unwrap();
        let image = content.as_image().unwrap();

        assert_eq!(image.width().unwrap(), 32);
        assert_eq!(image.height().unwrap(), 16);
        assert_eq!(image.format().unwrap(), ImageFormat::Gif);
        assert_eq!(image.mime().unwrap(), "image/gif");
        assert_eq!(image.dimensions_string().unwrap(), "width=\"32\" height=\"16\"");
        assert_eq!(image.name(), "pixel.gif");
    }

    #[test]
    fn test_non_image_rejected() {
        let object = ContentWrapper::default().from_buffer(b"just text", None);
        let err = object.into_image().unwrap_err();
        assert!(matches!(err, ContentError::NotAnImage { mime } if mime == "text/plain"));
    }

    #[test]
    fn test_undecodable_image() {
        let object = ContentWrapper::default()
            .from_wrapped("data:image/png,00010203", None)
            .unwrap();
        let image = object.into_image().unwrap();
        assert!(matches!(image.width(), Err(ContentError::UndecodableImage(_))));
    }

    struct FixedDecoder;

    impl ImageDecoder for FixedDecoder {
        fn decode(&self, data: &[u8]) -> filekit_image::Result<ImageMetadata> {
            Ok(ImageMetadata {
                width: 7,
                height: 9,
                format: ImageFormat::Png,
                size_bytes: data.len(),
                channels: None,
                bits: None,
            })
        }
    }

    #[test]
    fn test_custom_decoder() {
        let wrapper = ContentWrapper::default().with_image_decoder(FixedDecoder);
        let image = wrapper
            .from_wrapped("data:image/png,00", None)
            .unwrap()
            .into_image()
            .unwrap();
        assert_eq!((image.width().unwrap(), image.height().unwrap()), (7, 9));
        assert_eq!(image.channels().unwrap(), None);
    }

    #[test]
    fn test_kind_from_config_string() {
        let kind: ContentKind = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(kind, ContentKind::Image);
    }
}
