//! Deterministic filename generation for renamed image batches.
//!
//! Every output name in a batch is derived from a shared text token, the
//! file's position or metadata, and a wall-clock timestamp captured **once**
//! per export. Threading the captured time through explicitly (rather than
//! reading the clock per file) keeps a batch internally consistent: two files
//! exported together can never straddle a second boundary and disagree about
//! the date-stamp component.
//!
//! [`NamingPattern::render`] is a pure function of its arguments, so the same
//! inputs always produce the same name.

pub mod error;

mod config;
mod parse;
mod render;

pub use crate::config::{ARCHIVE_EXTENSION, DEFAULT_ARCHIVE_SUFFIX, NamingConfig};

/// A supported output-naming rule.
///
/// The set is closed: patterns are selected from a fixed menu, not composed
/// from a template language. Defaults to [`SourceNumber`](Self::SourceNumber).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NamingPattern {
    /// `{token}-{NNNNNN}.{ext}`, using the last six digits of the file's
    /// last-modified time in Unix milliseconds.
    #[default]
    SourceNumber,
    /// `{token}-{NNN}.{ext}`, using the file's one-based batch position,
    /// zero-padded to three digits.
    Sequence,
    /// `{token}.{ext}`: every file in the batch shares one stem. Collisions
    /// are accepted; inside an archive the last entry wins.
    TokenOnly,
    /// `{YYYYMMDD}_{HHMMSS}_{token}.{ext}`, stamped with the captured batch
    /// time, not per-file time.
    DateStamp,
}
