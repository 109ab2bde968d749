//! Error types for image transforms.
//!
//! Structured errors using `exn` for automatic location tracking. Callers of
//! [`TransformConfig::apply`](crate::TransformConfig::apply) never see these:
//! the transform recovers by falling back to the original bytes. The inner
//! fallible path is exposed for tests and for callers that want the failure.

use derive_more::{Display, Error};

/// A transform error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input bytes could not be decoded as an image.
    #[display("could not decode input image")]
    Decode,
    /// Re-encoding the processed image failed.
    #[display("could not encode output image")]
    Encode,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            _ => false,
        }
    }
}
