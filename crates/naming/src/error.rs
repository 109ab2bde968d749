//! Error types for filename generation.
//!
//! Structured errors using `exn` for automatic location tracking.

use derive_more::{Display, Error};

/// A naming error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for naming operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The shared token is blank; every pattern embeds it, so nothing can be
    /// named until one is supplied.
    #[display("shared token is empty")]
    EmptyToken,
    /// The requested pattern name is not one of the supported set.
    #[display("unknown naming pattern: {_0}")]
    UnknownPattern(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            _ => false,
        }
    }
}
