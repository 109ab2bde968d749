//! Transform Operations

use crate::ImageKind;
use crate::config::TransformConfig;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::{instrument, warn};

impl TransformConfig {
    /// Applies this configuration to one file's bytes.
    ///
    /// With both knobs off the input is returned unchanged, byte for byte.
    /// Otherwise the image is decoded, downscaled if its longer side exceeds
    /// the configured bound, and re-encoded (at the configured quality when
    /// compression is on). Failures of any kind fall back to the original
    /// bytes so a single bad file cannot abort a batch.
    #[instrument(skip_all, fields(input_size = bytes.len(), output_size))]
    pub fn apply(&self, bytes: &[u8], declared: Option<&str>) -> Vec<u8> {
        let output = if self.is_passthrough() {
            bytes.to_vec()
        } else {
            match self.process(bytes, declared) {
                Ok(output) => output,
                Err(error) => {
                    warn!(error = ?error, "transform failed, keeping original bytes");
                    bytes.to_vec()
                },
            }
        };
        tracing::Span::current().record("output_size", output.len());
        output
    }

    /// Fallible inner path behind [`apply`](Self::apply).
    ///
    /// # Errors
    /// [`ErrorKind::Decode`] when the input is not a decodable image,
    /// [`ErrorKind::Encode`] when re-encoding fails.
    pub fn process(&self, bytes: &[u8], declared: Option<&str>) -> Result<Vec<u8>> {
        let kind = ImageKind::resolve(declared, bytes);
        let img = image::load_from_memory(bytes).or_raise(|| ErrorKind::Decode)?;

        let resized = match self.max_dimension {
            // resize() fits the image inside the square bound, keeping the
            // aspect ratio; only invoked when the image actually overflows it.
            Some(max) if img.width().max(img.height()) > max => Some(img.resize(max, max, FilterType::Lanczos3)),
            _ => None,
        };
        if resized.is_none() && self.quality.is_none() {
            // Already within bounds and no re-encode requested.
            return Ok(bytes.to_vec());
        }
        let img = resized.unwrap_or(img);
        encode(&img, kind, self.quality)
    }
}

// What JpegEncoder::new would pick; used when only a resize was requested.
const DEFAULT_JPEG_QUALITY: u8 = 75;

fn encode(img: &DynamicImage, kind: ImageKind, quality: Option<u8>) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    match (kind, quality) {
        (ImageKind::Jpeg, quality) => {
            // JPEG has no alpha channel; flatten before encoding.
            let flattened = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.unwrap_or(DEFAULT_JPEG_QUALITY));
            flattened.write_with_encoder(encoder).or_raise(|| ErrorKind::Encode)?;
        },
        // PNG is lossless; the quality knob maps to the encoder's default
        // compression effort rather than a quality fraction.
        (ImageKind::Png, Some(_)) => {
            let encoder = PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, PngFilterType::Adaptive);
            img.write_with_encoder(encoder).or_raise(|| ErrorKind::Encode)?;
        },
        (ImageKind::Png, None) => img.write_to(&mut buffer, ImageFormat::Png).or_raise(|| ErrorKind::Encode)?,
        (ImageKind::WebP, _) | (ImageKind::Gif, _) => {
            img.write_to(&mut buffer, kind.image_format()).or_raise(|| ErrorKind::Encode)?
        },
    }
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageKind;
    use image::{Rgb, RgbImage};
    use std::ops::Deref;

    fn solid_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([120, 80, 40])))
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        solid_image(width, height).write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn passthrough_is_byte_identical() {
        let input = b"definitely not an image, and it must not matter".to_vec();
        let output = TransformConfig::new().apply(&input, None);
        assert_eq!(output, input);
    }

    #[test]
    fn undecodable_input_falls_back_to_original_bytes() {
        let input = b"garbage".to_vec();
        let config = TransformConfig::new().with_quality(50);
        assert_eq!(config.apply(&input, Some("image/jpeg")), input);
        assert!(matches!(config.process(&input, None).unwrap_err().deref(), ErrorKind::Decode));
    }

    #[test]
    fn resize_bounds_the_longer_side() {
        let input = png_bytes(100, 40);
        let output = TransformConfig::new().with_max_dimension(50).apply(&input, Some("image/png"));
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (50, 20));
    }

    #[test]
    fn resize_preserves_aspect_within_rounding() {
        let input = png_bytes(99, 40);
        let output = TransformConfig::new().with_max_dimension(50).apply(&input, Some("image/png"));
        let decoded = image::load_from_memory(&output).unwrap();
        assert!(decoded.width().max(decoded.height()) <= 50);
        let ratio = f64::from(decoded.width()) / f64::from(decoded.height());
        assert!((ratio - 99.0 / 40.0).abs() < 0.2);
    }

    #[test]
    fn image_within_bounds_is_left_alone() {
        let input = png_bytes(30, 20);
        let output = TransformConfig::new().with_max_dimension(50).apply(&input, Some("image/png"));
        assert_eq!(output, input);
    }

    #[test]
    fn quality_reencode_keeps_dimensions_and_format() {
        let mut buffer = Cursor::new(Vec::new());
        solid_image(32, 16).write_to(&mut buffer, ImageFormat::Jpeg).unwrap();
        let input = buffer.into_inner();

        let output = TransformConfig::new().with_quality(60).apply(&input, Some("image/jpeg"));
        assert_eq!(ImageKind::from_magic_bytes(&output), Some(ImageKind::Jpeg));
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }

    #[test]
    fn resize_and_quality_compose() {
        let input = png_bytes(100, 100);
        let config = TransformConfig::new().with_quality(70).with_max_dimension(10);
        let output = config.apply(&input, Some("image/png"));
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (10, 10));
        assert_eq!(ImageKind::from_magic_bytes(&output), Some(ImageKind::Png));
    }
}
