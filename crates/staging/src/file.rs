//! The staged-file type carried through admission, staging, and export.

use time::OffsetDateTime;

/// An input image waiting in the working set.
///
/// Byte content is immutable once staged. The original filename is kept
/// verbatim (extension extraction happens at naming time), and the declared
/// content type, when the input surface provides one, steers output encoding
/// during transforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    name: String,
    bytes: Vec<u8>,
    modified: OffsetDateTime,
    content_type: Option<String>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, modified: OffsetDateTime) -> Self {
        Self { name: name.into(), bytes, modified, content_type: None }
    }

    /// Attach the content type declared by the input surface (e.g. `image/png`).
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Original filename, exactly as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the staged content in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Last-modified timestamp reported by the input surface.
    pub fn modified(&self) -> OffsetDateTime {
        self.modified
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}
