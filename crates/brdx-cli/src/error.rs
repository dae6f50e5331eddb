//! Error types for the CLI application.

use brdx_domain::ClientError;
use brdx_workflow::{ConfigError, WorkflowError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend selection or upload error
    #[error("Backend error: {0}")]
    Client(#[from] ClientError),

    /// Workflow run failed
    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    /// Run exceeded `--timeout`
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
