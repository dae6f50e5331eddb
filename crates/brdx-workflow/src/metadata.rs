//! Metadata workflow
//!
//! Answers "what shape does extraction produce and where does it land"
//! without touching a document or the backend.

use crate::config::AppConfig;
use crate::error::WorkflowError;
use crate::registry::SchemaRegistry;
use crate::state::{MetadataState, RunTrace};
use brdx_domain::{MetadataResponse, StartEvent};
use std::sync::Arc;
use tracing::{info, warn};

const WORKFLOW: &str = "metadata";

/// Zero-input workflow returning the schema and collection name
#[derive(Debug, Clone)]
pub struct MetadataWorkflow {
    registry: Arc<SchemaRegistry>,
    collection: String,
}

impl MetadataWorkflow {
    /// Create a workflow over a shared registry
    pub fn new(registry: Arc<SchemaRegistry>, collection: impl Into<String>) -> Self {
        Self {
            registry,
            collection: collection.into(),
        }
    }

    /// Create a workflow using the configured collection
    pub fn from_config(config: &AppConfig, registry: Arc<SchemaRegistry>) -> Self {
        Self::new(registry, config.extracted_data_collection.clone())
    }

    /// Run the workflow
    ///
    /// The event carries no data and is ignored.
    ///
    /// # Errors
    ///
    /// Fails with `WorkflowError::Config` only if the schema cannot be loaded.
    pub async fn run(&self, event: StartEvent) -> Result<MetadataResponse, WorkflowError> {
        self.run_with_history(event).await.0
    }

    /// Run the workflow and also return the states it passed through
    pub async fn run_with_history(
        &self,
        _event: StartEvent,
    ) -> (Result<MetadataResponse, WorkflowError>, Vec<MetadataState>) {
        let mut trace = RunTrace::new(WORKFLOW, MetadataState::Idle);
        trace.advance(MetadataState::Running);

        let result = self.build_response();

        match &result {
            Ok(response) => {
                trace.advance(MetadataState::Succeeded);
                info!(
                    "Metadata ready: collection '{}'",
                    response.extracted_data_collection
                );
            }
            Err(e) => {
                trace.advance(MetadataState::Failed);
                warn!("Metadata workflow failed: {}", e);
            }
        }

        (result, trace.into_history())
    }

    fn build_response(&self) -> Result<MetadataResponse, WorkflowError> {
        let json_schema = self.registry.schema()?;

        Ok(MetadataResponse {
            extracted_data_collection: self.collection.clone(),
            json_schema,
        })
    }
}
