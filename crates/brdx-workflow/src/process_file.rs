//! Process-file workflow
//!
//! Runs schema-guided extraction over one uploaded file:
//!
//! ```text
//! FileEvent → validate → load_schema → extract → ExtractionResult
//! ```
//!
//! Failures are returned with the file id and step attached. Nothing is
//! retried here; wrap `run` in a timeout or retry loop at the call site.

use crate::error::WorkflowError;
use crate::registry::SchemaRegistry;
use crate::state::{ProcessFileState, RunTrace};
use brdx_client::ExtractionBackend;
use brdx_domain::{ExtractionClient, ExtractionResult, FileEvent};
use std::sync::Arc;
use tracing::{debug, info, warn};

const WORKFLOW: &str = "process_file";

/// Step name for input validation
pub const STEP_VALIDATE: &str = "validate";

/// Step name for schema loading
pub const STEP_LOAD_SCHEMA: &str = "load_schema";

/// Step name for the backend extraction call
pub const STEP_EXTRACT: &str = "extract";

/// Single-step extraction pipeline over an `ExtractionClient`
pub struct ProcessFileWorkflow<C: ExtractionClient = ExtractionBackend> {
    registry: Arc<SchemaRegistry>,
    client: Arc<C>,
}

impl<C: ExtractionClient> Clone for ProcessFileWorkflow<C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: ExtractionClient> ProcessFileWorkflow<C> {
    /// Create a workflow over a shared registry and client
    pub fn new(registry: Arc<SchemaRegistry>, client: Arc<C>) -> Self {
        Self { registry, client }
    }

    /// Run the workflow for one file
    ///
    /// # Errors
    ///
    /// - `Validation` if `file_id` is blank or padded with whitespace, before
    ///   any backend call
    /// - `Config` if the schema cannot be loaded
    /// - `Transport`, `Extraction` or `PartialExtraction` from the backend
    pub async fn run(&self, event: FileEvent) -> Result<ExtractionResult, WorkflowError> {
        self.run_with_history(event).await.0
    }

    /// Run the workflow and also return the states it passed through
    pub async fn run_with_history(
        &self,
        event: FileEvent,
    ) -> (Result<ExtractionResult, WorkflowError>, Vec<ProcessFileState>) {
        let mut trace = RunTrace::new(WORKFLOW, ProcessFileState::Idle);

        let result = self.execute(event, &mut trace).await;

        match &result {
            Ok(extraction) => {
                trace.advance(ProcessFileState::Succeeded);
                info!(
                    "Extraction {} complete for file '{}'",
                    extraction.id, extraction.file_id
                );
            }
            Err(e) => {
                trace.advance(ProcessFileState::Failed);
                warn!("Process-file workflow failed: {}", e);
            }
        }

        (result, trace.into_history())
    }

    async fn execute(
        &self,
        event: FileEvent,
        trace: &mut RunTrace<ProcessFileState>,
    ) -> Result<ExtractionResult, WorkflowError> {
        let file_id = event.file_id.as_str();
        validate_file_id(file_id)?;
        trace.advance(ProcessFileState::Uploaded(file_id.to_string()));

        let schema = self
            .registry
            .schema()
            .map_err(|e| WorkflowError::config_at(e, file_id, STEP_LOAD_SCHEMA))?;
        debug!(
            "Step '{}' done: {} feature fields",
            STEP_LOAD_SCHEMA,
            schema.feature_fields().len()
        );

        trace.advance(ProcessFileState::Extracting);
        info!(
            "Extracting file '{}' with {} backend",
            file_id,
            self.client.name()
        );

        let extraction = self
            .client
            .extract(file_id, &schema)
            .await
            .map_err(|e| WorkflowError::from_client(e, file_id, STEP_EXTRACT))?;

        normalize(extraction, file_id)
    }
}

/// Reject blank ids and ids with surrounding whitespace
fn validate_file_id(file_id: &str) -> Result<(), WorkflowError> {
    let message = if file_id.trim().is_empty() {
        "file_id must not be empty"
    } else if file_id.trim() != file_id {
        "file_id must not have leading or trailing whitespace"
    } else {
        return Ok(());
    };

    Err(WorkflowError::Validation {
        file_id: file_id.to_string(),
        step: STEP_VALIDATE,
        message: message.to_string(),
    })
}

/// Fill in the file id and reject results with no identifier
fn normalize(
    mut extraction: ExtractionResult,
    file_id: &str,
) -> Result<ExtractionResult, WorkflowError> {
    if extraction.id.trim().is_empty() {
        return Err(WorkflowError::Extraction {
            file_id: file_id.to_string(),
            step: STEP_EXTRACT,
            message: "backend returned no extraction id".to_string(),
        });
    }
    if extraction.file_id.is_empty() {
        extraction.file_id = file_id.to_string();
    }
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::brd_schema;
    use crate::error::ErrorKind;
    use brdx_client::FakeClient;
    use serde_json::json;

    fn workflow(fake: &FakeClient) -> ProcessFileWorkflow<FakeClient> {
        ProcessFileWorkflow::new(
            Arc::new(SchemaRegistry::from_value(brd_schema())),
            Arc::new(fake.clone()),
        )
    }

    #[tokio::test]
    async fn test_empty_file_id_makes_no_backend_call() {
        let fake = FakeClient::new();
        let workflow = workflow(&fake);

        for file_id in ["", "   "] {
            let (result, history) = workflow.run_with_history(FileEvent::new(file_id)).await;
            assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
            assert_eq!(history, vec![ProcessFileState::Idle, ProcessFileState::Failed]);
        }
        assert_eq!(fake.extract_calls(), 0);
    }

    #[tokio::test]
    async fn test_padded_file_id_is_rejected_not_rewritten() {
        let fake = FakeClient::new();
        let workflow = workflow(&fake);

        let error = workflow.run(FileEvent::new(" file-abc ")).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.file_id(), Some(" file-abc "));
        assert_eq!(error.step(), Some(STEP_VALIDATE));
        assert_eq!(fake.extract_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_file_is_extraction_error() {
        let fake = FakeClient::new();
        let result = workflow(&fake).run(FileEvent::new("file-unknown")).await;

        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Extraction);
        assert_eq!(error.file_id(), Some("file-unknown"));
        assert_eq!(error.step(), Some(STEP_EXTRACT));
        assert_eq!(fake.extract_calls(), 1);
    }

    #[tokio::test]
    async fn test_bad_schema_fails_before_backend_call() {
        let fake = FakeClient::new();
        let workflow = ProcessFileWorkflow::new(
            Arc::new(SchemaRegistry::from_value(json!({"type": "object"}))),
            Arc::new(fake.clone()),
        );

        let (result, history) = workflow.run_with_history(FileEvent::new("file-1")).await;
        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.file_id(), Some("file-1"));
        assert_eq!(error.step(), Some(STEP_LOAD_SCHEMA));
        assert_eq!(
            history,
            vec![
                ProcessFileState::Idle,
                ProcessFileState::Uploaded("file-1".to_string()),
                ProcessFileState::Failed
            ]
        );
        assert_eq!(fake.extract_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_config_file_keeps_file_and_step() {
        let fake = FakeClient::new();
        let workflow = ProcessFileWorkflow::new(
            Arc::new(SchemaRegistry::from_config_file("/no/such/config.json")),
            Arc::new(fake.clone()),
        );

        let error = workflow.run(FileEvent::new("file-42")).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.file_id(), Some("file-42"));
        assert_eq!(error.step(), Some(STEP_LOAD_SCHEMA));
        assert!(matches!(
            error,
            WorkflowError::Config {
                source: crate::config::ConfigError::FileRead(_),
                ..
            }
        ));
        assert_eq!(fake.extract_calls(), 0);
    }

    #[test]
    fn test_normalize_fills_file_id() {
        let extraction = ExtractionResult {
            id: "run-1".to_string(),
            file_id: String::new(),
            data: json!({}),
        };
        let normalized = normalize(extraction, "file-1").unwrap();
        assert_eq!(normalized.file_id, "file-1");
    }

    #[test]
    fn test_normalize_rejects_missing_id() {
        let extraction = ExtractionResult {
            id: " ".to_string(),
            file_id: "file-1".to_string(),
            data: json!({"features": []}),
        };
        let error = normalize(extraction, "file-1").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Extraction);
    }
}
