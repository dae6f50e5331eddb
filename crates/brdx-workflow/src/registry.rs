//! Schema Registry
//!
//! Owns loading and validation of the extraction schema and caches the
//! result for the life of the registry. Construct one per process and share
//! it between workflows behind an `Arc`.
//!
//! # Caching
//!
//! `schema()` fills the cache lazily. Concurrent first callers may each parse
//! the document, but only one value is ever published and every caller gets
//! that value. Failed loads are not cached.

use crate::config::{AppConfig, ConfigError};
use brdx_domain::ExtractionSchema;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Where the schema document comes from
#[derive(Debug, Clone)]
pub enum SchemaSource {
    /// `extract.json_schema` inside a configuration file
    ConfigFile(PathBuf),
    /// An in-memory schema document
    Inline(Value),
}

/// Read-only, lazily cached access to the extraction schema
#[derive(Debug)]
pub struct SchemaRegistry {
    source: SchemaSource,
    cache: OnceLock<Arc<ExtractionSchema>>,
}

impl SchemaRegistry {
    /// Registry backed by a configuration file
    pub fn from_config_file(path: impl Into<PathBuf>) -> Self {
        Self::new(SchemaSource::ConfigFile(path.into()))
    }

    /// Registry backed by an in-memory schema document
    pub fn from_value(schema: Value) -> Self {
        Self::new(SchemaSource::Inline(schema))
    }

    /// Registry for an already loaded configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::from_value(config.extract.json_schema.clone())
    }

    /// Registry for an explicit source
    pub fn new(source: SchemaSource) -> Self {
        Self {
            source,
            cache: OnceLock::new(),
        }
    }

    /// Parse and validate the schema from its source, bypassing the cache
    ///
    /// Idempotent and side-effect free.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is missing, malformed, or fails
    /// structural validation.
    pub fn load(&self) -> Result<ExtractionSchema, ConfigError> {
        match &self.source {
            SchemaSource::ConfigFile(path) => {
                debug!("Loading extraction schema from {}", path.display());
                AppConfig::from_file(path)?.schema()
            }
            SchemaSource::Inline(value) => Ok(ExtractionSchema::from_value(value.clone())?),
        }
    }

    /// The cached schema, loading it on first use
    pub fn schema(&self) -> Result<Arc<ExtractionSchema>, ConfigError> {
        if let Some(schema) = self.cache.get() {
            return Ok(Arc::clone(schema));
        }

        let loaded = Arc::new(self.load()?);
        // First publisher wins; losers drop their copy and take the winner's
        Ok(Arc::clone(self.cache.get_or_init(|| loaded)))
    }

    /// Whether the cache has been populated
    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }
}
