use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use renamepack_archive::ArchiveBuilder;
use renamepack_history::RenamedRecord;
use renamepack_naming::NamingConfig;
use renamepack_staging::{StagedFile, WorkingSet};
use renamepack_transform::TransformConfig;
use time::OffsetDateTime;
use tracing::{info, instrument};

/// The product of a successful batch export: one archive plus the records
/// describing every file inside it, in working-set order.
#[derive(Debug)]
pub struct BatchExport {
    /// File name the archive should be delivered under.
    pub archive_name: String,
    /// Finished container bytes.
    pub archive: Vec<u8>,
    /// One record per staged file, sizes reflecting post-transform output.
    pub records: Vec<RenamedRecord>,
}

/// The product of exporting a single staged file.
pub struct SingleExport {
    /// The rendered output filename.
    pub file_name: String,
    /// Output bytes (post-transform).
    pub bytes: Vec<u8>,
    pub record: RenamedRecord,
}

/// Exports the whole working set as one archive.
///
/// Preconditions are checked before any work: the set must be non-empty and
/// the shared token non-blank. `captured` is the batch's single wall-clock
/// reading; every name in the batch derives its time-dependent components
/// from it. Files are processed strictly in working-set order, awaiting each
/// transform before starting the next, so position-derived names always
/// match staging order.
///
/// # Errors
/// [`ErrorKind::EmptyWorkingSet`] / [`ErrorKind::Naming`] before any work;
/// [`ErrorKind::Archive`] if container construction fails, in which case no
/// records are returned and the caller must append nothing to history.
#[instrument(skip_all, fields(files = set.len()))]
pub async fn export_all(
    set: &WorkingSet,
    naming: &NamingConfig,
    transform: &TransformConfig,
    captured: OffsetDateTime,
) -> Result<BatchExport> {
    if set.is_empty() {
        exn::bail!(ErrorKind::EmptyWorkingSet);
    }
    naming.validate().or_raise(|| ErrorKind::Naming)?;
    let archive_name = naming.archive_file_name().or_raise(|| ErrorKind::Naming)?;

    let mut builder = ArchiveBuilder::new();
    let mut records = Vec::with_capacity(set.len());
    for (index, file) in set.iter().enumerate() {
        let new_name = naming.render(file.name(), file.modified(), index, captured).or_raise(|| ErrorKind::Naming)?;
        let output = transform_blocking(transform, file).await?;
        builder.append(&new_name, &output).or_raise(|| ErrorKind::Archive)?;
        records.push(RenamedRecord::new(file.name(), new_name, output.len() as u64));
    }

    let archive = builder.finish().or_raise(|| ErrorKind::Archive)?;
    info!(entries = records.len(), size = archive.len(), name = %archive_name, "constructed batch archive");
    Ok(BatchExport { archive_name, archive, records })
}

/// Exports one staged file directly, without a container.
///
/// `index` is the file's position in the working set so that
/// position-derived patterns name it the same way a batch export would.
#[instrument(skip_all, fields(name = file.name(), index = index))]
pub async fn export_one(
    file: &StagedFile,
    index: usize,
    naming: &NamingConfig,
    transform: &TransformConfig,
    captured: OffsetDateTime,
) -> Result<SingleExport> {
    naming.validate().or_raise(|| ErrorKind::Naming)?;
    let file_name = naming.render(file.name(), file.modified(), index, captured).or_raise(|| ErrorKind::Naming)?;
    let bytes = transform_blocking(transform, file).await?;
    let record = RenamedRecord::new(file.name(), file_name.clone(), bytes.len() as u64);
    Ok(SingleExport { file_name, bytes, record })
}

/// Runs the (CPU-bound, possibly slow) transform on the blocking pool.
///
/// Per-file transform failures are absorbed inside `apply` by falling back
/// to the original bytes; only a failed join surfaces here.
async fn transform_blocking(config: &TransformConfig, file: &StagedFile) -> Result<Vec<u8>> {
    let config = *config;
    let bytes = file.bytes().to_vec();
    let declared = file.content_type().map(str::to_owned);
    tokio::task::spawn_blocking(move || config.apply(&bytes, declared.as_deref()))
        .await
        .or_raise(|| ErrorKind::Task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use renamepack_archive::read_entries;
    use renamepack_naming::NamingPattern;
    use std::ops::Deref;

    fn at(unix: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(unix).unwrap()
    }

    fn staged(name: &str, bytes: &[u8], modified: i64) -> StagedFile {
        StagedFile::new(name, bytes.to_vec(), at(modified))
    }

    fn working_set(files: Vec<StagedFile>) -> WorkingSet {
        let mut set = WorkingSet::new();
        let summary = set.admit(files);
        assert!(!summary.aggregate_exceeded);
        set
    }

    #[tokio::test]
    async fn batch_export_names_records_and_archive_consistently() {
        let set = working_set(vec![staged("beach.jpg", b"beach-bytes", 100), staged("dune.png", b"dune-bytes", 200)]);
        let naming = NamingConfig::new(NamingPattern::Sequence, "TRIP");

        let export =
            export_all(&set, &naming, &TransformConfig::new(), at(1_700_000_000)).await.expect("batch export");

        assert_eq!(export.archive_name, "TRIP_renamed_images.tar.gz");
        assert_eq!(export.records.len(), 2);
        assert_eq!(export.records[0].new_name, "TRIP-001.jpg");
        assert_eq!(export.records[1].new_name, "TRIP-002.png");
        assert_eq!(export.records[0].original_name, "beach.jpg");
        assert_eq!(export.records[0].size, b"beach-bytes".len() as u64);

        let entries = read_entries(&export.archive).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("TRIP-001.jpg".to_string(), b"beach-bytes".to_vec()));
        assert_eq!(entries[1], ("TRIP-002.png".to_string(), b"dune-bytes".to_vec()));

        // Appending the batch grows the history by one record per file.
        let mut store = renamepack_history::HistoryStore::new();
        let before = store.len();
        store.append(export.records);
        assert_eq!(store.len(), before + 2);
    }

    #[tokio::test]
    async fn blank_token_is_rejected_before_any_work() {
        let set = working_set(vec![staged("a.jpg", b"bytes", 0)]);
        let naming = NamingConfig::new(NamingPattern::Sequence, "");
        let err = export_all(&set, &naming, &TransformConfig::new(), at(0)).await.unwrap_err();
        assert!(matches!(err.deref(), ErrorKind::Naming));
    }

    #[tokio::test]
    async fn empty_working_set_is_rejected() {
        let naming = NamingConfig::new(NamingPattern::Sequence, "TRIP");
        let err = export_all(&WorkingSet::new(), &naming, &TransformConfig::new(), at(0)).await.unwrap_err();
        assert!(matches!(err.deref(), ErrorKind::EmptyWorkingSet));
    }

    #[tokio::test]
    async fn token_only_collisions_share_one_stem() {
        let set = working_set(vec![staged("a.jpg", b"one", 1), staged("b.jpg", b"two", 2)]);
        let naming = NamingConfig::new(NamingPattern::TokenOnly, "TRIP");

        let export = export_all(&set, &naming, &TransformConfig::new(), at(0)).await.unwrap();
        assert_eq!(export.records[0].new_name, "TRIP.jpg");
        assert_eq!(export.records[1].new_name, "TRIP.jpg");

        // Both entries are present; extraction order resolves the collision.
        let entries = read_entries(&export.archive).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.last().unwrap().1, b"two");
    }

    #[tokio::test]
    async fn date_stamp_names_share_the_captured_time() {
        let set = working_set(vec![staged("a.jpg", b"one", 1_000), staged("b.jpg", b"two", 2_000)]);
        let naming = NamingConfig::new(NamingPattern::DateStamp, "TRIP");

        let export = export_all(&set, &naming, &TransformConfig::new(), at(1_700_000_000)).await.unwrap();
        // Identical stamp for both, regardless of per-file modified times.
        assert_eq!(export.records[0].new_name, export.records[1].new_name);
    }

    #[tokio::test]
    async fn undecodable_file_is_carried_through_unchanged() {
        let set = working_set(vec![staged("broken.jpg", b"not an image at all", 0)]);
        let naming = NamingConfig::new(NamingPattern::Sequence, "TRIP");
        let transform = TransformConfig::new().with_quality(50);

        let export = export_all(&set, &naming, &transform, at(0)).await.expect("batch must survive a bad file");
        let entries = read_entries(&export.archive).unwrap();
        assert_eq!(entries[0].1, b"not an image at all");
        assert_eq!(export.records[0].size, b"not an image at all".len() as u64);
    }

    #[tokio::test]
    async fn record_sizes_reflect_post_transform_output() {
        // A real PNG large enough that downscaling visibly changes the size.
        let mut buffer = std::io::Cursor::new(Vec::new());
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_fn(128, 128, |x, y| {
            image::Rgba([x as u8, y as u8, 0, 255])
        }));
        img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
        let png = buffer.into_inner();

        let set = working_set(vec![StagedFile::new("big.png", png.clone(), at(0)).with_content_type("image/png")]);
        let naming = NamingConfig::new(NamingPattern::Sequence, "TRIP");
        let transform = TransformConfig::new().with_max_dimension(16);

        let export = export_all(&set, &naming, &transform, at(0)).await.unwrap();
        let entries = read_entries(&export.archive).unwrap();
        assert_ne!(entries[0].1, png);
        assert_eq!(export.records[0].size, entries[0].1.len() as u64);

        let resized = image::load_from_memory(&entries[0].1).unwrap();
        assert_eq!((resized.width(), resized.height()), (16, 16));
    }

    #[tokio::test]
    async fn single_export_matches_batch_naming() {
        let set = working_set(vec![staged("a.jpg", b"one", 1), staged("b.jpg", b"two", 2)]);
        let naming = NamingConfig::new(NamingPattern::Sequence, "TRIP");

        let single =
            export_one(set.get(1).unwrap(), 1, &naming, &TransformConfig::new(), at(0)).await.expect("single export");
        assert_eq!(single.file_name, "TRIP-002.jpg");
        assert_eq!(single.bytes, b"two");
        assert_eq!(single.record.original_name, "b.jpg");
        assert_eq!(single.record.size, 3);
    }
}
