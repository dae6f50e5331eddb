//! Error types for the workflows

use crate::config::ConfigError;
use brdx_domain::ClientError;
use serde_json::Value;
use thiserror::Error;

/// Coarse classification of a [`WorkflowError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing configuration
    Config,
    /// Malformed start event
    Validation,
    /// Backend unreachable
    Transport,
    /// Backend rejected the input
    Extraction,
    /// Backend returned incomplete output
    PartialExtraction,
}

/// Errors that end a workflow run
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Schema or backend configuration problem, never retried
    ///
    /// `file_id` and `step` are set when the failure happened inside a
    /// process-file run.
    #[error("Configuration error: {source}")]
    Config {
        /// Underlying failure
        #[source]
        source: ConfigError,
        /// File being processed
        file_id: Option<String>,
        /// Step that failed
        step: Option<&'static str>,
    },

    /// Start event failed validation before any backend call
    #[error("Validation error in step '{step}' for file '{file_id}': {message}")]
    Validation {
        /// File id as received
        file_id: String,
        /// Step that failed
        step: &'static str,
        /// What was wrong with the event
        message: String,
    },

    /// Backend could not be reached
    #[error("Transport error in step '{step}' for file '{file_id}': {message}")]
    Transport {
        /// File being processed
        file_id: String,
        /// Step that failed
        step: &'static str,
        /// Underlying failure
        message: String,
    },

    /// Backend could not produce structured output
    #[error("Extraction error in step '{step}' for file '{file_id}': {message}")]
    Extraction {
        /// File being processed
        file_id: String,
        /// Step that failed
        step: &'static str,
        /// Underlying failure
        message: String,
    },

    /// Backend produced incomplete structured output
    #[error("Partial extraction in step '{step}' for file '{file_id}': {message}")]
    PartialExtraction {
        /// File being processed
        file_id: String,
        /// Step that failed
        step: &'static str,
        /// Backend-reported reason
        message: String,
        /// Data recovered before the failure
        recovered: Value,
    },
}

impl From<ConfigError> for WorkflowError {
    fn from(source: ConfigError) -> Self {
        WorkflowError::Config {
            source,
            file_id: None,
            step: None,
        }
    }
}

impl WorkflowError {
    /// Annotate a configuration failure with the file and step it happened in
    pub fn config_at(source: ConfigError, file_id: &str, step: &'static str) -> Self {
        WorkflowError::Config {
            source,
            file_id: Some(file_id.to_string()),
            step: Some(step),
        }
    }

    /// Annotate a client failure with the file and step it happened in
    pub fn from_client(error: ClientError, file_id: &str, step: &'static str) -> Self {
        let file_id = file_id.to_string();
        match error {
            ClientError::Config(message) => WorkflowError::Config {
                source: ConfigError::Invalid(message),
                file_id: Some(file_id),
                step: Some(step),
            },
            ClientError::Transport(message) => WorkflowError::Transport {
                file_id,
                step,
                message,
            },
            ClientError::NotFound(message) | ClientError::Extraction(message) => {
                WorkflowError::Extraction {
                    file_id,
                    step,
                    message,
                }
            }
            ClientError::PartialExtraction { message, recovered } => {
                WorkflowError::PartialExtraction {
                    file_id,
                    step,
                    message,
                    recovered,
                }
            }
        }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkflowError::Config { .. } => ErrorKind::Config,
            WorkflowError::Validation { .. } => ErrorKind::Validation,
            WorkflowError::Transport { .. } => ErrorKind::Transport,
            WorkflowError::Extraction { .. } => ErrorKind::Extraction,
            WorkflowError::PartialExtraction { .. } => ErrorKind::PartialExtraction,
        }
    }

    /// Whether the caller may retry the run with backoff
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// File the failing run was processing, if any
    pub fn file_id(&self) -> Option<&str> {
        match self {
            WorkflowError::Validation { file_id, .. }
            | WorkflowError::Transport { file_id, .. }
            | WorkflowError::Extraction { file_id, .. }
            | WorkflowError::PartialExtraction { file_id, .. } => Some(file_id.as_str()),
            WorkflowError::Config { file_id, .. } => file_id.as_deref(),
        }
    }

    /// Step the failing run was in, if any
    pub fn step(&self) -> Option<&'static str> {
        match self {
            WorkflowError::Validation { step, .. }
            | WorkflowError::Transport { step, .. }
            | WorkflowError::Extraction { step, .. }
            | WorkflowError::PartialExtraction { step, .. } => Some(*step),
            WorkflowError::Config { step, .. } => *step,
        }
    }
}
