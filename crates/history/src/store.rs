use crate::error::{ErrorKind, Result};
use crate::record::RenamedRecord;
use exn::ResultExt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Fixed file name the record sequence persists under.
pub const HISTORY_FILE: &str = "history.json";

/// Ordered log of [`RenamedRecord`]s with one level of undo per mutation.
///
/// Append and delete each push the current sequence onto the snapshot stack
/// *before* mutating, so undo restores exact prior states step by step. A
/// failed operation (invalid delete index) pushes nothing and changes
/// nothing.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: Vec<RenamedRecord>,
    snapshots: Vec<Vec<RenamedRecord>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[RenamedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many mutations can currently be walked back.
    pub fn undo_depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Appends one export's records, snapshotting the prior sequence first.
    /// Returns the number of records appended.
    pub fn append(&mut self, records: impl IntoIterator<Item = RenamedRecord>) -> usize {
        self.snapshots.push(self.records.clone());
        let before = self.records.len();
        self.records.extend(records);
        let appended = self.records.len() - before;
        debug!(appended, total = self.records.len(), "appended records to history");
        appended
    }

    /// Removes and returns the record at `index`, snapshotting the prior
    /// sequence first. An invalid index leaves both the sequence and the
    /// snapshot stack untouched.
    pub fn delete_at(&mut self, index: usize) -> Result<RenamedRecord> {
        if index >= self.records.len() {
            exn::bail!(ErrorKind::InvalidIndex(index));
        }
        self.snapshots.push(self.records.clone());
        Ok(self.records.remove(index))
    }

    /// Restores the most recent snapshot. Returns `false` (and changes
    /// nothing) when there is no mutation left to undo.
    pub fn undo(&mut self) -> bool {
        match self.snapshots.pop() {
            Some(previous) => {
                self.records = previous;
                true
            },
            None => false,
        }
    }

    /// Loads the record sequence from `path`.
    ///
    /// A missing file is a normal first run; a file that exists but cannot
    /// be parsed is logged and treated as empty rather than failing startup.
    /// The snapshot stack always starts empty.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let records = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(error) => {
                    warn!(path = %path.display(), error = %error, "history file is malformed, starting empty");
                    Vec::new()
                },
            },
            Err(_) => Vec::new(),
        };
        Self { records, snapshots: Vec::new() }
    }

    /// Serializes the current record sequence (never the snapshot stack)
    /// to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).or_raise(|| ErrorKind::Io)?;
        }
        let json = serde_json::to_string_pretty(&self.records).or_raise(|| ErrorKind::Serialize)?;
        fs::write(path, json).or_raise(|| ErrorKind::Io)
    }
}
