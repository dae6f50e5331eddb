//! Backend selection and extraction settings

use brdx_domain::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable that switches to the deterministic fake backend
pub const FAKE_MODE_VAR: &str = "FAKE_LLAMA_CLOUD";

/// Environment variable holding the live backend API key
pub const API_KEY_VAR: &str = "LLAMA_CLOUD_API_KEY";

/// Environment variable overriding the live backend base URL
pub const BASE_URL_VAR: &str = "LLAMA_CLOUD_BASE_URL";

/// Environment variable scoping requests to a project
pub const PROJECT_ID_VAR: &str = "LLAMA_CLOUD_PROJECT_ID";

/// Environment variable scoping requests to an organization
pub const ORGANIZATION_ID_VAR: &str = "LLAMA_CLOUD_ORGANIZATION_ID";

/// Default live backend endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.cloud.llamaindex.ai";

/// Default delay between job status polls (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Default timeout for a single HTTP request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Extraction quality/cost trade-off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionMode {
    /// Fastest, text only
    Fast,
    /// Default balance of speed and accuracy
    #[default]
    Balanced,
    /// Highest accuracy
    Premium,
    /// Reads images and layout as well as text
    Multimodal,
}

/// Granularity of extraction output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionTarget {
    /// One result for the whole document
    #[default]
    PerDoc,
    /// One result per page
    PerPage,
}

/// Settings sent to the backend alongside the schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractSettings {
    /// Extraction mode
    #[serde(default)]
    pub extraction_mode: ExtractionMode,

    /// Extraction target
    #[serde(default)]
    pub extraction_target: ExtractionTarget,

    /// Extra instructions for the extraction model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Ask the backend to cite source passages
    #[serde(default)]
    pub cite_sources: bool,

    /// Ask the backend to reason before answering
    #[serde(default)]
    pub use_reasoning: bool,
}

/// Connection settings for the live backend
#[derive(Clone)]
pub struct LiveSettings {
    /// API key sent as a bearer token
    pub api_key: String,

    /// Base URL, without trailing slash
    pub base_url: String,

    /// Optional project scope
    pub project_id: Option<String>,

    /// Optional organization scope
    pub organization_id: Option<String>,

    /// Delay between job status polls
    pub poll_interval: Duration,

    /// Timeout for each HTTP request
    pub request_timeout: Duration,
}

impl LiveSettings {
    /// Settings for the default endpoint with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: None,
            organization_id: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Point at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the job status poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl fmt::Debug for LiveSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("organization_id", &self.organization_id)
            .field("poll_interval", &self.poll_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Which backend variant to construct
#[derive(Debug, Clone)]
pub enum BackendSettings {
    /// Hosted extraction service
    Live(LiveSettings),
    /// Deterministic in-process fake
    Fake,
}

impl BackendSettings {
    /// Read backend selection from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` when neither fake mode nor an API key is set.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read backend selection through an arbitrary variable lookup
    ///
    /// Fake mode wins over credentials so tests can keep a dummy key set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if fake_mode_requested(&lookup) {
            return Ok(BackendSettings::Fake);
        }

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_VAR).ok_or_else(|| {
            ClientError::Config(format!(
                "no extraction backend configured: set {} or {}=true",
                API_KEY_VAR, FAKE_MODE_VAR
            ))
        })?;

        let mut live = LiveSettings::new(api_key);
        if let Some(base_url) = non_empty(BASE_URL_VAR) {
            live = live.with_base_url(base_url);
        }
        live.project_id = non_empty(PROJECT_ID_VAR);
        live.organization_id = non_empty(ORGANIZATION_ID_VAR);

        Ok(BackendSettings::Live(live))
    }
}

/// Whether the lookup asks for the fake backend
///
/// Test suites use this as the capability check before running
/// backend-dependent scenarios.
pub fn fake_mode_requested<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(FAKE_MODE_VAR)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
