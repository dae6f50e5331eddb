//! Deterministic fake extraction backend
//!
//! Stands in for the hosted service in tests. File ids are content digests
//! and extraction ids are digests of the file id and schema, so the same
//! fixture produces the same ids in every run. No network, no clocks.

use async_trait::async_trait;
use brdx_domain::{ClientError, ExtractionClient, ExtractionResult, ExtractionSchema};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Hex characters kept from the content digest for file ids
const FILE_ID_HEX_LEN: usize = 16;

/// Hex characters kept for extraction ids
const EXTRACTION_ID_HEX_LEN: usize = 7;

/// Fake extraction client for deterministic testing
///
/// Clones share state, so a clone handed to a workflow still reports calls
/// to the test that kept the original.
///
/// # Examples
///
/// ```no_run
/// use brdx_client::FakeClient;
///
/// let fake = FakeClient::new();
/// let first = fake.preload("tests/files/test.pdf").unwrap();
/// let second = fake.preload("tests/files/test.pdf").unwrap();
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FakeClient {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Debug, Default)]
struct FakeState {
    files: HashMap<String, PathBuf>,
    canned: HashMap<String, Value>,
    failures: HashMap<String, ClientError>,
    upload_calls: usize,
    extract_calls: usize,
}

impl FakeClient {
    /// Create an empty fake with no preloaded files
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fixture file, returning its stable id
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the file cannot be read.
    pub fn preload(&self, path: impl AsRef<Path>) -> Result<String, ClientError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| ClientError::NotFound(format!("{}: {}", path.display(), e)))?;

        let file_id = format!("file-{}", hex_digest(&bytes, FILE_ID_HEX_LEN));
        self.state()
            .files
            .insert(file_id.clone(), path.to_path_buf());
        Ok(file_id)
    }

    /// Return `data` verbatim when `file_id` is extracted
    pub fn with_canned_data(self, file_id: impl Into<String>, data: Value) -> Self {
        self.state().canned.insert(file_id.into(), data);
        self
    }

    /// Fail extraction of `file_id` with `error`
    pub fn with_failure(self, file_id: impl Into<String>, error: ClientError) -> Self {
        self.state().failures.insert(file_id.into(), error);
        self
    }

    /// Whether `file_id` has been preloaded or uploaded
    pub fn is_registered(&self, file_id: &str) -> bool {
        self.state().files.contains_key(file_id)
    }

    /// Number of `upload` calls so far
    pub fn upload_calls(&self) -> usize {
        self.state().upload_calls
    }

    /// Number of `extract` calls so far
    pub fn extract_calls(&self) -> usize {
        self.state().extract_calls
    }

    /// Reset call counters
    pub fn reset_calls(&self) {
        let mut state = self.state();
        state.upload_calls = 0;
        state.extract_calls = 0;
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        // State stays consistent across a panicking test, so poisoning is ignored
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn extract_now(
        &self,
        file_id: &str,
        schema: &ExtractionSchema,
    ) -> Result<ExtractionResult, ClientError> {
        let mut state = self.state();
        state.extract_calls += 1;

        if let Some(error) = state.failures.get(file_id) {
            return Err(error.clone());
        }
        if !state.files.contains_key(file_id) {
            return Err(ClientError::Extraction(format!("unknown file id: {}", file_id)));
        }

        let data = match state.canned.get(file_id) {
            Some(data) => data.clone(),
            None => sample_value("document", schema.as_value()),
        };

        let mut seed = file_id.as_bytes().to_vec();
        seed.extend_from_slice(schema.as_value().to_string().as_bytes());

        Ok(ExtractionResult {
            id: hex_digest(&seed, EXTRACTION_ID_HEX_LEN),
            file_id: file_id.to_string(),
            data,
        })
    }
}

#[async_trait]
impl ExtractionClient for FakeClient {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn upload(&self, path: &Path) -> Result<String, ClientError> {
        self.state().upload_calls += 1;
        self.preload(path)
    }

    async fn extract(
        &self,
        file_id: &str,
        schema: &ExtractionSchema,
    ) -> Result<ExtractionResult, ClientError> {
        self.extract_now(file_id, schema)
    }
}

/// Lowercase hex of the SHA-256 digest, truncated to `len` characters
fn hex_digest(bytes: &[u8], len: usize) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex.truncate(len);
    hex
}

/// Build a schema-shaped placeholder value
///
/// Objects get every declared property, arrays get one item, enums take
/// their first option and strings become `<name>`.
fn sample_value(name: &str, schema: &Value) -> Value {
    if let Some(first) = schema
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|options| options.first())
    {
        return first.clone();
    }

    match schema_type(schema) {
        Some("object") => {
            let mut object = Map::new();
            if let Some(props) = schema.get("properties").and_then(Value::as_object) {
                for (key, prop) in props {
                    object.insert(key.clone(), sample_value(key, prop));
                }
            }
            Value::Object(object)
        }
        Some("array") => {
            let items = schema.get("items").unwrap_or(&Value::Null);
            json!([sample_value(name, items)])
        }
        Some("integer") | Some("number") => json!(1),
        Some("boolean") => json!(false),
        Some("null") => Value::Null,
        _ => json!(format!("<{}>", name)),
    }
}

/// Declared type, accepting `"type": ["string", "null"]` unions
fn schema_type(schema: &Value) -> Option<&str> {
    match schema.get("type") {
        Some(Value::String(t)) => Some(t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        None if schema.get("properties").is_some() => Some("object"),
        _ => None,
    }
}
