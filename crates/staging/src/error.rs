//! Error types for working-set operations.
//!
//! Structured errors using `exn` for automatic location tracking.

use derive_more::{Display, Error};

/// A staging error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for staging operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced position does not exist in the working set.
    #[display("no staged file at position {_0}")]
    InvalidIndex(#[error(not(source))] usize),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            _ => false,
        }
    }
}
