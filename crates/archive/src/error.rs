//! Error types for archive construction.
//!
//! Structured errors using `exn` for automatic location tracking.

use derive_more::{Display, Error};

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The entry name could not be stored in a container header.
    #[display("invalid archive entry name: {_0}")]
    EntryName(#[error(not(source))] String),
    /// Container data being read back is corrupt or truncated.
    #[display("invalid or corrupted archive")]
    InvalidData,
    /// An I/O operation failed while encoding the container.
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Io)
    }
}
