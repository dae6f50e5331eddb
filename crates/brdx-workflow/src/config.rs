//! Configuration document for the workflows
//!
//! Loaded from `configs/config.json`:
//!
//! ```json
//! {
//!   "extract": {
//!     "json_schema": { "type": "object", "properties": { "features": { ... } } },
//!     "settings": { "extraction_mode": "BALANCED" }
//!   },
//!   "extracted_data_collection": "brd-technical-specs"
//! }
//! ```

use brdx_client::ExtractSettings;
use brdx_domain::{ExtractionSchema, SchemaError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Collection extracted BRD data is grouped under unless configured otherwise
pub const EXTRACTED_DATA_COLLECTION: &str = "brd-technical-specs";

/// Configuration path relative to the workspace root
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.json";

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse JSON
    #[error("Failed to parse config JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Schema failed structural validation
    #[error("Invalid extraction schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    /// Inconsistent or unusable setting
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The whole configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extraction section
    pub extract: ExtractConfig,

    /// Collection extracted data lands in
    #[serde(default = "default_collection")]
    pub extracted_data_collection: String,
}

/// `extract` section of the configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// JSON Schema guiding extraction
    pub json_schema: Value,

    /// Backend extraction settings
    #[serde(default)]
    pub settings: ExtractSettings,
}

fn default_collection() -> String {
    EXTRACTED_DATA_COLLECTION.to_string()
}

impl AppConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;

        // Name the missing key rather than surfacing a serde message
        if value.pointer("/extract/json_schema").is_none() {
            return Err(ConfigError::MissingField("extract.json_schema".to_string()));
        }

        let config: AppConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the document is internally consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extracted_data_collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "extracted_data_collection must not be empty".to_string(),
            ));
        }
        self.schema()?;
        Ok(())
    }

    /// The validated extraction schema
    pub fn schema(&self) -> Result<ExtractionSchema, ConfigError> {
        Ok(ExtractionSchema::from_value(self.extract.json_schema.clone())?)
    }

    /// Override the collection name
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.extracted_data_collection = collection.into();
        self
    }
}
