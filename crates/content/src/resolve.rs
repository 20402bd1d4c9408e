//! Pure helpers for MIME and extension resolution.

use filekit_image::ImageFormat;

/// Strip parameters and whitespace from a MIME type (`text/plain; a=b` →
/// `text/plain`), leaving a value safe to embed in a wrapper header.
pub fn mime_essence(mime: &str) -> &str {
    mime.split([';', ',']).next().unwrap_or_default().trim()
}

/// Top-level type of a MIME type (`image/jpeg` → `image`).
pub fn mime_top_level(mime: &str) -> &str {
    mime_essence(mime).split('/').next().unwrap_or_default()
}

/// Extension embedded in a name: the text after the last `.`.
///
/// Names without a dot, or ending in one, have none.
pub fn extension_from_name(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Extension derived from a MIME type.
///
/// Known image types use their format's preferred extension, matched
/// case-insensitively (`IMAGE/JPEG` gives `jpeg`). Otherwise the subtype is
/// the text after the last `/`; everything up to and including its first
/// `-` or `.` is dropped, so `text/x-c++` gives `c++` and `image/svg+xml`
/// stays `svg+xml`.
pub fn extension_from_mime(mime: &str) -> &str {
    let preferred = ImageFormat::from_mime_type(mime)
        .and_then(|format| format.extensions().first().copied());
    if let Some(ext) = preferred {
        return ext;
    }

    let essence = mime_essence(mime);
    let subtype = essence.rsplit_once('/').map_or(essence, |(_, subtype)| subtype);

    match subtype.find(['-', '.']) {
        Some(pos) => &subtype[pos + 1..],
        None => subtype,
    }
}

/// Prefer the name's extension, falling back to the MIME subtype.
pub fn resolve_extension(name: &str, mime: &str, with_dot: bool) -> String {
    let ext = extension_from_name(name).unwrap_or_else(|| extension_from_mime(mime));

    if with_dot {
        format!(".{}", ext)
    } else {
        ext.to_string()
    }
}
