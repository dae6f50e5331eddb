//! brdx CLI library.
//!
//! This library provides the core functionality for the brdx command-line interface,
//! including configuration loading, backend selection, command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Command, OutputFormat};
pub use error::{CliError, Result};
pub use output::Formatter;

use brdx_workflow::AppConfig;
use std::path::Path;

/// Load the configuration document, applying a collection override.
pub fn load_config(path: &Path, collection: Option<String>) -> Result<AppConfig> {
    let mut config = AppConfig::from_file(path)?;
    if let Some(collection) = collection {
        config = config.with_collection(collection);
        config.validate()?;
    }
    Ok(config)
}
