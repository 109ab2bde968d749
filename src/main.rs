mod commands;
mod logging;

use clap::Parser;
use commands::{Cli, Commands, ExportArgs, HistoryCommands};
use renamepack_history::{HISTORY_FILE, HistoryStore};
use renamepack_naming::{NamingConfig, NamingPattern};
use renamepack_pipeline::{export_all, export_one};
use renamepack_staging::{Capacity, StagedFile, WorkingSet};
use renamepack_transform::TransformConfig;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use time::OffsetDateTime;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let args = Cli::parse();
    let history_path = args.history_file.clone().unwrap_or_else(default_history_path);

    match args.command {
        Commands::Export(export) => run_export(export, &history_path).await,
        Commands::History { command } => run_history(command, &history_path),
    }
}

async fn run_export(args: ExportArgs, history_path: &Path) -> ExitCode {
    let pattern = match args.pattern.parse::<NamingPattern>() {
        Ok(pattern) => pattern,
        Err(error) => {
            error!(error = %error.deref(), "invalid --pattern");
            return ExitCode::FAILURE;
        },
    };
    // The reference input surface upper-cases the shared token; do the same
    // at this boundary so generated names match it.
    let mut naming = NamingConfig::new(pattern, args.token.trim().to_uppercase());
    if let Some(stem) = &args.archive_stem {
        naming = naming.with_archive_stem(stem.clone());
    }
    if naming.validate().is_err() {
        warn!("shared token is empty; nothing to export");
        return ExitCode::FAILURE;
    }

    let mut candidates = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match stage_file(path) {
            Ok(staged) => candidates.push(staged),
            Err(error) => {
                error!(path = %path.display(), error = %error, "could not read input file");
                return ExitCode::FAILURE;
            },
        }
    }

    let mut set = WorkingSet::new();
    let summary = set.admit(candidates);
    if summary.aggregate_exceeded {
        error!("batch exceeds the 100 MiB total limit; nothing was staged");
        return ExitCode::FAILURE;
    }
    if summary.rejected_oversize > 0 {
        warn!(skipped = summary.rejected_oversize, "files over the 20 MiB per-file limit were skipped");
    }
    if set.is_empty() {
        warn!("no files were staged; nothing to export");
        return ExitCode::FAILURE;
    }
    if set.capacity() == Capacity::Warning {
        warn!(total = set.total_size(), "working set is above 80% of the total size limit");
    }

    let mut transform = TransformConfig::new();
    if let Some(quality) = args.quality {
        transform = transform.with_quality(quality);
    }
    if let Some(max_dimension) = args.max_dimension {
        transform = transform.with_max_dimension(max_dimension);
    }

    // One wall-clock reading for the whole batch; every generated name
    // derives its time component from this value.
    let captured = OffsetDateTime::now_utc();

    if let Err(error) = fs::create_dir_all(&args.out) {
        error!(path = %args.out.display(), error = %error, "could not create output directory");
        return ExitCode::FAILURE;
    }

    match args.only {
        Some(index) => {
            let file = match set.get(index) {
                Ok(file) => file,
                Err(error) => {
                    error!(error = %error.deref(), "cannot export that position");
                    return ExitCode::FAILURE;
                },
            };
            let single = match export_one(file, index, &naming, &transform, captured).await {
                Ok(single) => single,
                Err(error) => {
                    error!(error = %error.deref(), "single export failed");
                    return ExitCode::FAILURE;
                },
            };
            let target = args.out.join(&single.file_name);
            if let Err(error) = fs::write(&target, &single.bytes) {
                error!(path = %target.display(), error = %error, "could not write renamed file");
                return ExitCode::FAILURE;
            }
            info!(path = %target.display(), "wrote renamed file");

            let mut store = HistoryStore::load(history_path);
            store.append([single.record.with_preview(target)]);
            save_history(&store, history_path)
        },
        None => {
            let export = match export_all(&set, &naming, &transform, captured).await {
                Ok(export) => export,
                Err(error) => {
                    error!(error = %error.deref(), "batch export failed");
                    return ExitCode::FAILURE;
                },
            };
            let target = args.out.join(&export.archive_name);
            if let Err(error) = fs::write(&target, &export.archive) {
                error!(path = %target.display(), error = %error, "could not write archive");
                return ExitCode::FAILURE;
            }
            info!(path = %target.display(), files = export.records.len(), "wrote batch archive");

            let mut store = HistoryStore::load(history_path);
            store.append(export.records);
            save_history(&store, history_path)
        },
    }
}

fn run_history(command: HistoryCommands, history_path: &Path) -> ExitCode {
    let mut store = HistoryStore::load(history_path);
    match command {
        HistoryCommands::List => {
            if store.is_empty() {
                println!("history is empty");
            }
            for (index, record) in store.records().iter().enumerate() {
                println!("{index:3}  {} -> {}  ({} bytes)", record.original_name, record.new_name, record.size);
            }
            ExitCode::SUCCESS
        },
        HistoryCommands::Delete { index } => match store.delete_at(index) {
            Ok(removed) => {
                info!(new_name = %removed.new_name, "deleted history record");
                save_history(&store, history_path)
            },
            Err(error) => {
                error!(error = %error.deref(), "delete failed");
                ExitCode::FAILURE
            },
        },
        HistoryCommands::Undo => {
            if store.undo() {
                save_history(&store, history_path)
            } else {
                // The snapshot stack lives in memory only, so a freshly
                // loaded store has nothing to walk back.
                warn!("nothing to undo in this session");
                ExitCode::SUCCESS
            }
        },
    }
}

fn stage_file(path: &Path) -> std::io::Result<StagedFile> {
    let bytes = fs::read(path)?;
    let modified = fs::metadata(path).and_then(|meta| meta.modified()).map(OffsetDateTime::from)?;
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    };
    let mut staged = StagedFile::new(name, bytes, modified);
    if let Some(content_type) = content_type_for(path) {
        staged = staged.with_content_type(content_type);
    }
    Ok(staged)
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

fn save_history(store: &HistoryStore, path: &Path) -> ExitCode {
    match store.save(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(path = %path.display(), error = %error.deref(), "could not save history");
            ExitCode::FAILURE
        },
    }
}

fn default_history_path() -> PathBuf {
    directories::ProjectDirs::from("dev", "renamepack", "renamepack")
        .map(|dirs| dirs.data_dir().join(HISTORY_FILE))
        .unwrap_or_else(|| PathBuf::from(HISTORY_FILE))
}
