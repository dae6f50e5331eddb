//! brdx Workflows
//!
//! Event-driven workflows that turn Business Requirements Documents into
//! structured feature records.
//!
//! # Overview
//!
//! Two workflows share one [`SchemaRegistry`]:
//!
//! - [`MetadataWorkflow`] reports the extraction schema and the collection
//!   extracted data is stored under.
//! - [`ProcessFileWorkflow`] runs schema-guided extraction over an uploaded
//!   file through an [`ExtractionClient`].
//!
//! # Architecture
//!
//! ```text
//! configs/config.json → SchemaRegistry ─┬→ MetadataWorkflow → MetadataResponse
//!                                       └→ ProcessFileWorkflow → ExtractionClient → ExtractionResult
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use brdx_client::FakeClient;
//! use brdx_workflow::{FileEvent, ProcessFileWorkflow, SchemaRegistry};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(SchemaRegistry::from_config_file("configs/config.json"));
//! let client = Arc::new(FakeClient::new());
//! let file_id = client.preload("brd.pdf")?;
//!
//! let workflow = ProcessFileWorkflow::new(registry, client);
//! let result = workflow.run(FileEvent::new(file_id)).await?;
//!
//! println!("Extraction {}: {} features", result.id, result.features()?.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metadata;
mod process_file;
mod registry;
mod state;


pub use config::{
    AppConfig, ConfigError, ExtractConfig, DEFAULT_CONFIG_PATH, EXTRACTED_DATA_COLLECTION,
};
pub use error::{ErrorKind, WorkflowError};
pub use metadata::MetadataWorkflow;
pub use process_file::{ProcessFileWorkflow, STEP_EXTRACT, STEP_LOAD_SCHEMA, STEP_VALIDATE};
pub use registry::{SchemaRegistry, SchemaSource};
pub use state::{MetadataState, ProcessFileState};

pub use brdx_domain::{
    ExtractionClient, ExtractionResult, ExtractionSchema, Feature, FileEvent, MetadataResponse,
    StartEvent,
};
