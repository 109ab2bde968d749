//! Container construction for batch downloads.
//!
//! The batch export ships as a single gzip-compressed tar file built
//! entirely in memory: callers append `(name, bytes)` entries in batch order
//! and [`finish`](ArchiveBuilder::finish) yields the container bytes. Entry
//! encoding is delegated to the `tar` and `flate2` crates; this crate's own
//! surface is the name → bytes mapping.
//!
//! Duplicate entry names are appended as-is. Extractors process entries in
//! order, so the last write wins, which is the collision behavior that
//! token-only naming accepts.

pub mod error;

mod builder;

pub use crate::builder::{ArchiveBuilder, read_entries};
