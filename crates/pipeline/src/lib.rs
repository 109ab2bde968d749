//! The export pipeline: turns a working set into a download and its records.
//!
//! [`export_all`] walks the working set strictly in staging order, renders
//! each output name with a wall-clock time captured once for the whole
//! batch, runs the optional image transform off the async thread, and packs
//! every output into one archive. [`export_one`] does the same for a single
//! staged file and yields the bytes directly.
//!
//! Failure handling is asymmetric on purpose: validation problems (blank
//! token, nothing staged) are raised before any work; a per-file transform
//! failure falls back to the original bytes inside `renamepack-transform`
//! and never aborts the batch; an archive construction failure aborts the
//! whole export with no records emitted.

pub mod error;

mod export;

pub use crate::export::{BatchExport, SingleExport, export_all, export_one};
