//! CLI command definitions and argument parsing.

use brdx_workflow::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// brdx - Extract structured features from Business Requirements Documents.
#[derive(Debug, Parser)]
#[command(name = "brdx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "BRDX_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the configured collection extracted data is stored under
    #[arg(long, global = true, env = "EXTRACTED_DATA_COLLECTION")]
    pub collection: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    Text,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the extraction schema and target collection
    Metadata,

    /// Upload a document and print its file id
    Upload(UploadArgs),

    /// Extract features from a document
    Process(ProcessArgs),
}

/// Arguments for the upload command.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// Document to upload
    pub path: PathBuf,
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Document to upload and extract
    #[arg(required_unless_present = "file_id", conflicts_with = "file_id")]
    pub path: Option<PathBuf>,

    /// Extract an already uploaded file instead of uploading
    #[arg(long)]
    pub file_id: Option<String>,

    /// Give up after this many seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}
