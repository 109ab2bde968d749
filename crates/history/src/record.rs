use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The durable result of one export operation on one file.
///
/// `size` is the *output* size after any transform, not the staged input
/// size. `preview` points at a transient artifact (the written file for a
/// single export) and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedRecord {
    pub original_name: String,
    pub new_name: String,
    pub size: u64,
    #[serde(skip)]
    pub preview: Option<PathBuf>,
}

impl RenamedRecord {
    pub fn new(original_name: impl Into<String>, new_name: impl Into<String>, size: u64) -> Self {
        Self {
            original_name: original_name.into(),
            new_name: new_name.into(),
            size,
            preview: None,
        }
    }

    pub fn with_preview(mut self, preview: impl Into<PathBuf>) -> Self {
        self.preview = Some(preview.into());
        self
    }
}
