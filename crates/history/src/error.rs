//! Error types for the history store.
//!
//! Structured errors using `exn` for automatic location tracking.

use derive_more::{Display, Error};

/// A history error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for history operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced position does not exist in the record sequence.
    #[display("no history record at position {_0}")]
    InvalidIndex(#[error(not(source))] usize),
    /// The record sequence could not be serialized.
    #[display("could not serialize history")]
    Serialize,
    /// Reading or writing the history file failed.
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Io)
    }
}
