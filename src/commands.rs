use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "renamepack")]
#[command(about = "Rename image batches and pack them for download", long_about = None)]
pub struct Cli {
    /// Override the history file location
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stage files, rename them, and write the download artifact
    Export(ExportArgs),
    /// Inspect or edit the history of renamed files
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Image files to stage, in processing order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Shared text embedded in every generated name (upper-cased, like the
    /// input surface does)
    #[arg(long)]
    pub token: String,

    /// Naming pattern: source-number, sequence, token-only, date-stamp
    #[arg(long, default_value = "source-number")]
    pub pattern: String,

    /// Archive file stem (defaults to {TOKEN}_renamed_images)
    #[arg(long)]
    pub archive_stem: Option<String>,

    /// Re-encode images at this quality percentage (1-100)
    #[arg(long)]
    pub quality: Option<u8>,

    /// Downscale images so the longer side fits this many pixels
    #[arg(long)]
    pub max_dimension: Option<u32>,

    /// Export only the staged file at this zero-based position, directly
    /// instead of as an archive
    #[arg(long)]
    pub only: Option<usize>,

    /// Directory the artifact is written into
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// Print the recorded renames
    List,
    /// Delete the record at the given zero-based position
    Delete { index: usize },
    /// Revert the most recent history mutation
    Undo,
}
