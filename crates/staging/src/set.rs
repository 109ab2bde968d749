//! The ordered collection of staged files awaiting export.

use crate::error::{ErrorKind, Result};
use crate::file::StagedFile;
use crate::guard::{self, TOTAL_SIZE_LIMIT};
use exn::OptionExt;
use tracing::debug;

/// Remaining headroom classification for the working set.
///
/// `Warning` begins at 80% of [`TOTAL_SIZE_LIMIT`]; `Full` at or beyond the
/// limit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Available,
    Warning,
    Full,
}

/// Counts reported back to the caller after a batch admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmitSummary {
    pub admitted: usize,
    pub rejected_oversize: usize,
    pub aggregate_exceeded: bool,
}

/// In-memory ordered sequence of [`StagedFile`]s.
///
/// Insertion order is display and processing order. Entries are never
/// deduplicated; two identical files each keep their own position and are
/// named independently by position-derived patterns.
#[derive(Debug, Default)]
pub struct WorkingSet {
    files: Vec<StagedFile>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screens `candidates` through the admission guard and appends the
    /// accepted ones, preserving submission order.
    ///
    /// When the aggregate ceiling would be breached the set is left exactly
    /// as it was and the summary reports `aggregate_exceeded`.
    pub fn admit(&mut self, candidates: Vec<StagedFile>) -> AdmitSummary {
        let admission = guard::admit(candidates, self.total_size());
        let summary = AdmitSummary {
            admitted: admission.accepted.len(),
            rejected_oversize: admission.rejected_oversize,
            aggregate_exceeded: admission.aggregate_exceeded,
        };
        self.files.extend(admission.accepted);
        debug!(admitted = summary.admitted, total = self.files.len(), "admitted batch into working set");
        summary
    }

    /// Removes and returns the staged file at `index`.
    ///
    /// Dropping the returned file releases its bytes and any preview
    /// resource derived from it. Invalid positions leave the set unchanged.
    pub fn remove(&mut self, index: usize) -> Result<StagedFile> {
        if index >= self.files.len() {
            exn::bail!(ErrorKind::InvalidIndex(index));
        }
        Ok(self.files.remove(index))
    }

    /// Drops every staged file (and with them, all preview resources).
    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn get(&self, index: usize) -> Result<&StagedFile> {
        self.files.get(index).ok_or_raise(|| ErrorKind::InvalidIndex(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Combined size of everything currently staged.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(StagedFile::size).sum()
    }

    pub fn capacity(&self) -> Capacity {
        let total = self.total_size();
        if total >= TOTAL_SIZE_LIMIT {
            Capacity::Full
        } else if total >= TOTAL_SIZE_LIMIT / 5 * 4 {
            Capacity::Warning
        } else {
            Capacity::Available
        }
    }
}
