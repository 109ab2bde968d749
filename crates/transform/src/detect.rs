use crate::ImageKind;
use image::ImageFormat;

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const GIF_MAGIC: [u8; 4] = [0x47, 0x49, 0x46, 0x38];
const RIFF_MAGIC: [u8; 4] = [0x52, 0x49, 0x46, 0x46];
const WEBP_TAG: [u8; 4] = [0x57, 0x45, 0x42, 0x50];

impl ImageKind {
    /// Detect the format from a declared MIME content type.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            "image/webp" => Some(ImageKind::WebP),
            "image/gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    /// Detect the format from magic bytes.
    ///
    /// Returns `None` if no magic bytes match or if the input is too short
    /// to detect any format.
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&JPEG_MAGIC) {
            return Some(ImageKind::Jpeg);
        }
        if bytes.starts_with(&PNG_MAGIC) {
            return Some(ImageKind::Png);
        }
        if bytes.starts_with(&GIF_MAGIC) {
            return Some(ImageKind::Gif);
        }
        // WebP is a RIFF container with a "WEBP" tag at offset 8.
        if bytes.starts_with(&RIFF_MAGIC) && bytes.get(8..12) == Some(&WEBP_TAG) {
            return Some(ImageKind::WebP);
        }
        None
    }

    /// Output format selection for one file: declared content type first,
    /// magic bytes second, JPEG as the lossy default.
    #[must_use]
    pub fn resolve(declared: Option<&str>, bytes: &[u8]) -> Self {
        declared
            .and_then(Self::from_content_type)
            .or_else(|| Self::from_magic_bytes(bytes))
            .unwrap_or_default()
    }

    /// File extension conventionally used for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::WebP => "webp",
            ImageKind::Gif => "gif",
        }
    }

    pub(crate) fn image_format(&self) -> ImageFormat {
        match self {
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
            ImageKind::WebP => ImageFormat::WebP,
            ImageKind::Gif => ImageFormat::Gif,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ImageKind;
    use rstest::rstest;

    #[rstest]
    #[case("image/jpeg", Some(ImageKind::Jpeg))]
    #[case("image/jpg", Some(ImageKind::Jpeg))]
    #[case("IMAGE/PNG", Some(ImageKind::Png))]
    #[case("image/webp", Some(ImageKind::WebP))]
    #[case("image/gif", Some(ImageKind::Gif))]
    #[case("image/tiff", None)]
    #[case("text/plain", None)]
    fn test_from_content_type(#[case] test: &str, #[case] expected: Option<ImageKind>) {
        assert_eq!(ImageKind::from_content_type(test), expected);
    }

    #[rstest]
    #[case(&[0xFF, 0xD8, 0xFF, 0xE0], Some(ImageKind::Jpeg))]
    #[case(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], Some(ImageKind::Png))]
    #[case(b"GIF89a", Some(ImageKind::Gif))]
    #[case(b"RIFF\x00\x00\x00\x00WEBPVP8 ", Some(ImageKind::WebP))]
    #[case(b"RIFF\x00\x00\x00\x00WAVE", None)]
    #[case(b"", None)]
    #[case(b"<!DOCTYPE html>", None)]
    fn test_from_magic_bytes(#[case] bytes: &[u8], #[case] expected: Option<ImageKind>) {
        assert_eq!(ImageKind::from_magic_bytes(bytes), expected);
    }

    #[test]
    fn resolve_prefers_declared_type_over_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(ImageKind::resolve(Some("image/webp"), &png_header), ImageKind::WebP);
        assert_eq!(ImageKind::resolve(None, &png_header), ImageKind::Png);
        assert_eq!(ImageKind::resolve(None, b"mystery"), ImageKind::Jpeg);
    }
}
