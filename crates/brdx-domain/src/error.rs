//! Error taxonomy for extraction backends

use serde_json::Value;
use thiserror::Error;

/// Errors raised by an `ExtractionClient`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Backend selection or credentials are missing or inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// The file to upload does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// Network, timeout or authentication failure reaching the backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend understood the request but rejected the file or schema
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The backend returned incomplete structured output
    #[error("Partial extraction: {message}")]
    PartialExtraction {
        /// Backend-reported reason
        message: String,
        /// Whatever structured data was recovered
        recovered: Value,
    },
}

impl ClientError {
    /// Whether a caller may retry the same request with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(ClientError::Transport("reset".into()).is_retryable());
        assert!(!ClientError::Config("x".into()).is_retryable());
        assert!(!ClientError::NotFound("x".into()).is_retryable());
        assert!(!ClientError::Extraction("x".into()).is_retryable());
        assert!(!ClientError::PartialExtraction {
            message: "x".into(),
            recovered: json!({}),
        }
        .is_retryable());
    }

    #[test]
    fn test_display() {
        let err = ClientError::PartialExtraction {
            message: "page 3 unreadable".into(),
            recovered: json!({"features": []}),
        };
        assert_eq!(err.to_string(), "Partial extraction: page 3 unreadable");
    }
}
