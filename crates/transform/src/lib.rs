//! Optional per-export image processing: aspect-preserving downscale and
//! quality re-encoding.
//!
//! The two knobs on [`TransformConfig`] are independent and both default to
//! off. With both off, [`apply`](TransformConfig::apply) is a byte-identical
//! passthrough. With either on, the image is decoded, optionally resized so
//! its longer side fits the configured bound, and re-encoded in its own
//! format ([`ImageKind`]: declared content type first, magic bytes second,
//! JPEG as the lossy default).
//!
//! A file that cannot be decoded or re-encoded keeps its original bytes; one
//! bad file must never abort a batch export.

pub mod error;

mod config;
mod detect;
mod ops;

pub use crate::config::TransformConfig;

/// A supported output image format.
///
/// This steers re-encoding only; decoding accepts anything the `image` crate
/// recognizes. Defaults to [`Jpeg`](Self::Jpeg), the standard lossy type
/// used when an input declares no content type at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageKind {
    #[default]
    Jpeg,
    Png,
    WebP,
    Gif,
}
