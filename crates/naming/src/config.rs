use crate::NamingPattern;
use crate::error::{ErrorKind, Result};
use time::OffsetDateTime;
use tracing::instrument;

/// Suffix appended to the token when no archive stem is configured.
pub const DEFAULT_ARCHIVE_SUFFIX: &str = "renamed_images";
/// Container extension for batch exports.
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// User-chosen export naming parameters: the pattern, the shared token, and
/// an optional archive container stem.
///
/// The token is stored verbatim; whether it is usable is decided at export
/// time by [`validate`](Self::validate), so a config can exist in a
/// not-yet-exportable state while the user is still typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    pub pattern: NamingPattern,
    token: String,
    archive_stem: Option<String>,
}

impl NamingConfig {
    pub fn new(pattern: NamingPattern, token: impl Into<String>) -> Self {
        Self { pattern, token: token.into(), archive_stem: None }
    }

    /// Sets the archive container stem. Blank input is treated as unset and
    /// falls back to `{token}_renamed_images`.
    pub fn with_archive_stem(mut self, stem: impl Into<String>) -> Self {
        let stem = stem.into();
        self.archive_stem = (!stem.trim().is_empty()).then_some(stem);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Raises [`ErrorKind::EmptyToken`] while the shared token is blank.
    /// Export operations call this before doing any work.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            exn::bail!(ErrorKind::EmptyToken);
        }
        Ok(())
    }

    /// Renders the output filename for one file using this config's pattern
    /// and token. Fails fast on a blank token.
    #[instrument(skip_all, fields(original_name = original_name, index = index))]
    pub fn render(
        &self,
        original_name: &str,
        modified: OffsetDateTime,
        index: usize,
        captured: OffsetDateTime,
    ) -> Result<String> {
        self.validate()?;
        Ok(self.pattern.render(original_name, modified, index, &self.token, captured))
    }

    /// The batch archive's file name, `{stem}.tar.gz`.
    pub fn archive_file_name(&self) -> Result<String> {
        self.validate()?;
        let stem = match &self.archive_stem {
            Some(stem) => stem.clone(),
            None => format!("{}_{DEFAULT_ARCHIVE_SUFFIX}", self.token),
        };
        Ok(format!("{stem}.{ARCHIVE_EXTENSION}"))
    }
}
