//! brdx Domain Layer
//!
//! Core data model for extracting technical specifications from business
//! requirement documents (BRDs). Defines the shape of extracted data, the
//! events that start each workflow, and the trait boundary to the extraction
//! backend.
//!
//! ## Key Concepts
//!
//! - **ExtractionSchema**: validated JSON Schema describing the extracted features
//! - **Events**: `StartEvent` (metadata) and `FileEvent` (process-file) inputs
//! - **MetadataResponse**: schema plus the collection extracted data lands in
//! - **ExtractionResult**: opaque extraction id plus the structured payload
//! - **ExtractionClient**: the `upload`/`extract` seam to a backend
//!
//! ## Architecture
//!
//! This crate holds no I/O. Backend implementations live in `brdx-client`,
//! orchestration lives in `brdx-workflow`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod result;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use error::ClientError;
pub use event::{FileEvent, StartEvent};
pub use result::{ExtractionResult, Feature, MetadataResponse};
pub use schema::{ExtractionSchema, SchemaError, REQUIRED_FEATURE_FIELDS};
pub use traits::ExtractionClient;
