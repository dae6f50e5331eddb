//! Workflow outputs

use crate::schema::ExtractionSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Answer of the metadata workflow: what extraction produces and where it lands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataResponse {
    /// Collection extracted data is grouped under
    pub extracted_data_collection: String,

    /// Schema extraction is guided by, shared with the registry
    pub json_schema: Arc<ExtractionSchema>,
}

/// Output of a single extraction run
///
/// `id` is opaque: the fake backend issues short digests, a live backend
/// issues its own run identifiers. Do not assume a length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Backend-issued extraction identifier
    pub id: String,

    /// File the data was extracted from
    pub file_id: String,

    /// Structured payload shaped by the extraction schema
    pub data: Value,
}

impl ExtractionResult {
    /// Typed view over `data.features`
    ///
    /// Returns an empty list when the payload has no `features` key.
    ///
    /// # Errors
    ///
    /// Fails if a feature item does not match [`Feature`].
    pub fn features(&self) -> Result<Vec<Feature>, serde_json::Error> {
        match self.data.get("features") {
            Some(features) => Vec::<Feature>::deserialize(features),
            None => Ok(Vec::new()),
        }
    }
}

/// One feature extracted from a BRD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Unique identifier within the document
    pub feature_id: String,

    /// User story in "As a ... I want ... so that ..." form
    pub user_story: String,

    /// Priority label as the schema defines it
    pub priority: String,

    /// Testable acceptance criteria
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,

    /// `feature_id`s this feature depends on
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Technical risks called out for the feature
    #[serde(default)]
    pub technical_risks: Vec<String>,
}
