//! Trait definitions for external interactions
//!
//! These traits define the boundary between workflow logic and extraction
//! backends. Implementations live in `brdx-client`.

use crate::{ClientError, ExtractionResult, ExtractionSchema};
use async_trait::async_trait;
use std::path::Path;

/// Schema-guided document extraction backend
///
/// Implementations perform no implicit retries: each call is at most one
/// logical backend operation, and dropping the returned future abandons it.
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Short backend name for logs and diagnostics
    fn name(&self) -> &'static str;

    /// Upload a local document, returning the backend's file id
    async fn upload(&self, path: &Path) -> Result<String, ClientError>;

    /// Run schema-guided extraction over an uploaded file
    async fn extract(
        &self,
        file_id: &str,
        schema: &ExtractionSchema,
    ) -> Result<ExtractionResult, ClientError>;
}
