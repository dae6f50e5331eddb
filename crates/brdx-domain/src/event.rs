//! Workflow start events
//!
//! Each workflow accepts exactly one event type. They are deliberately
//! distinct types rather than a shared bag of optional fields.

use serde::{Deserialize, Serialize};

/// Starts the metadata workflow. Carries no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartEvent {}

/// Starts the process-file workflow for one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEvent {
    /// Opaque handle returned by `ExtractionClient::upload`
    pub file_id: String,
}

impl FileEvent {
    /// Create an event for an uploaded file
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_event_is_empty_object() {
        let json = serde_json::to_string(&StartEvent::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_file_event_serde() {
        let event: FileEvent = serde_json::from_str(r#"{"file_id":"file-abc"}"#).unwrap();
        assert_eq!(event, FileEvent::new("file-abc"));
    }
}
