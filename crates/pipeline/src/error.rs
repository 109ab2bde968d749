//! Error types for the export pipeline.
//!
//! Uses [`exn`] for automatic location tracking and error tree construction.
//! Validation kinds are raised before any work happens; `Archive` aborts a
//! batch atomically (no records are emitted, nothing is downloaded).

use derive_more::{Display, Error};

/// An export error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Nothing is staged, so there is nothing to export.
    #[display("working set is empty")]
    EmptyWorkingSet,
    /// The naming configuration cannot produce names (blank shared token).
    #[display("naming configuration is not exportable")]
    Naming,
    /// The download container could not be constructed.
    #[display("could not construct batch archive")]
    Archive,
    /// A background transform task failed to complete.
    #[display("background task failed")]
    Task,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Task)
    }
}
