//! Rendering of output filenames from pattern, token, and file metadata.

use crate::NamingPattern;
use time::OffsetDateTime;

impl NamingPattern {
    /// Renders the output filename for one file in a batch.
    ///
    /// `index` is the file's zero-based position in the working set and
    /// `captured` is the wall-clock time fixed at the start of the export.
    /// The result is fully determined by the arguments; no clock or other
    /// ambient state is consulted.
    ///
    /// # Examples
    ///
    /// ```
    /// use renamepack_naming::NamingPattern;
    /// use time::OffsetDateTime;
    ///
    /// let captured = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    /// let name = NamingPattern::Sequence.render("holiday.jpg", captured, 4, "TRIP", captured);
    /// assert_eq!(name, "TRIP-005.jpg");
    /// ```
    pub fn render(
        &self,
        original_name: &str,
        modified: OffsetDateTime,
        index: usize,
        token: &str,
        captured: OffsetDateTime,
    ) -> String {
        let stem = match self {
            NamingPattern::SourceNumber => format!("{token}-{:06}", source_number(modified)),
            NamingPattern::Sequence => format!("{token}-{:03}", index + 1),
            NamingPattern::TokenOnly => token.to_string(),
            NamingPattern::DateStamp => format!("{}_{token}", date_stamp(captured)),
        };
        match extension(original_name) {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        }
    }
}

/// The last six digits of the file's modification time in Unix milliseconds.
fn source_number(modified: OffsetDateTime) -> i128 {
    let millis = modified.unix_timestamp_nanos() / 1_000_000;
    millis.rem_euclid(1_000_000)
}

/// `YYYYMMDD_HHMMSS` from the captured batch time.
fn date_stamp(captured: OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        captured.year(),
        u8::from(captured.month()),
        captured.day(),
        captured.hour(),
        captured.minute(),
        captured.second(),
    )
}

/// The substring after the final dot of `name`, if any.
///
/// A name with no dot has no extension, and so does a dotfile like
/// `.bashrc` or a name ending in a bare dot: in those cases the rendered
/// filename omits the trailing dot entirely.
fn extension(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() => Some(&name[pos + 1..]),
        _ => None,
    }
}
