use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use flate2::Compression as GzCompression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::Read;
use tracing::instrument;

// Downloads are produced once and fetched once; favor size over speed.
const GZIP_LEVEL: GzCompression = GzCompression::best();

/// In-memory builder for a gzip-compressed tar container.
///
/// Entries are stored in append order with fixed permissions; the builder
/// owns the compressed buffer and hands it back from [`finish`](Self::finish).
pub struct ArchiveBuilder {
    inner: tar::Builder<GzEncoder<Vec<u8>>>,
    entries: usize,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        let encoder = GzEncoder::new(Vec::new(), GZIP_LEVEL);
        Self { inner: tar::Builder::new(encoder), entries: 0 }
    }

    /// Appends one named entry.
    ///
    /// # Errors
    /// [`ErrorKind::EntryName`] if the name cannot be stored in a container
    /// header, [`ErrorKind::Io`] if encoding fails.
    #[instrument(skip_all, fields(name = %name, size = bytes.len()))]
    pub fn append(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let mut header = tar::Header::new_gnu();
        header.set_path(name).or_raise(|| ErrorKind::EntryName(name.to_string()))?;
        header.set_size(bytes.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.inner.append(&header, bytes).or_raise(|| ErrorKind::Io)?;
        self.entries += 1;
        Ok(())
    }

    /// Number of entries appended so far.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Terminates the container and flushes the compressor, returning the
    /// finished bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let encoder = self.inner.into_inner().or_raise(|| ErrorKind::Io)?;
        encoder.finish().or_raise(|| ErrorKind::Io)
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a finished container back into `(name, bytes)` pairs, in entry
/// order. The inverse of [`ArchiveBuilder`]; mostly useful for verifying
/// what went in.
pub fn read_entries(bytes: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut entries = Vec::new();
    for entry in archive.entries().or_raise(|| ErrorKind::InvalidData)? {
        let mut entry = entry.or_raise(|| ErrorKind::InvalidData)?;
        let name = entry.path().or_raise(|| ErrorKind::InvalidData)?.to_string_lossy().into_owned();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).or_raise(|| ErrorKind::InvalidData)?;
        entries.push((name, data));
    }
    Ok(entries)
}
