//! Admission limits for incoming batches.

use crate::file::StagedFile;
use tracing::{instrument, warn};

/// Largest single file admitted to the working set (20 MiB).
pub const FILE_SIZE_LIMIT: u64 = 20 * 1024 * 1024;
/// Largest aggregate size the working set may reach (100 MiB).
pub const TOTAL_SIZE_LIMIT: u64 = 100 * 1024 * 1024;

/// The outcome of admitting one incoming batch.
#[derive(Debug)]
pub struct Admission {
    /// Candidates that cleared both ceilings, in submission order.
    pub accepted: Vec<StagedFile>,
    /// Candidates dropped individually for exceeding [`FILE_SIZE_LIMIT`].
    pub rejected_oversize: usize,
    /// The surviving candidates would have pushed the aggregate past
    /// [`TOTAL_SIZE_LIMIT`]; the whole submission was refused.
    pub aggregate_exceeded: bool,
}

/// Screens an incoming batch of candidates against the size ceilings.
///
/// Oversize candidates are dropped one by one and counted. The survivors are
/// then admitted only if `current_total` plus their combined size stays
/// within [`TOTAL_SIZE_LIMIT`]; otherwise the entire submission is refused
/// and `accepted` comes back empty. Admission never partially applies at the
/// aggregate level, so a caller holding an existing working set can always
/// rely on it being unchanged when `aggregate_exceeded` is set.
#[instrument(skip_all, fields(candidates = candidates.len(), current_total = current_total))]
pub fn admit(candidates: Vec<StagedFile>, current_total: u64) -> Admission {
    let mut survivors = Vec::with_capacity(candidates.len());
    let mut rejected_oversize = 0;
    for candidate in candidates {
        if candidate.size() > FILE_SIZE_LIMIT {
            warn!(name = candidate.name(), size = candidate.size(), "file exceeds per-file limit, skipping");
            rejected_oversize += 1;
        } else {
            survivors.push(candidate);
        }
    }

    let incoming: u64 = survivors.iter().map(StagedFile::size).sum();
    if current_total + incoming > TOTAL_SIZE_LIMIT {
        warn!(incoming, current_total, "batch would exceed total size limit, refusing all of it");
        return Admission {
            accepted: Vec::new(),
            rejected_oversize,
            aggregate_exceeded: true,
        };
    }

    Admission { accepted: survivors, rejected_oversize, aggregate_exceeded: false }
}
