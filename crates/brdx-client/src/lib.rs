//! brdx Extraction Clients
//!
//! Implementations of the `ExtractionClient` trait from `brdx-domain`.
//!
//! # Backends
//!
//! - `FakeClient`: deterministic fake for testing, no network
//! - `LlamaCloudClient`: hosted extraction service over HTTPS
//!
//! The two are closed over by [`ExtractionBackend`], chosen once from
//! [`BackendSettings`]. Nothing downstream inspects the environment again.
//!
//! # Examples
//!
//! ```
//! use brdx_client::{BackendSettings, ExtractSettings, ExtractionBackend};
//!
//! let backend = ExtractionBackend::connect(BackendSettings::Fake, ExtractSettings::default()).unwrap();
//! assert!(backend.as_fake().is_some());
//! ```

#![warn(missing_docs)]

pub mod fake;
pub mod llama_cloud;
pub mod settings;

use async_trait::async_trait;
use brdx_domain::{ClientError, ExtractionClient, ExtractionResult, ExtractionSchema};
use std::path::Path;
use tracing::info;

pub use fake::FakeClient;
pub use llama_cloud::LlamaCloudClient;
pub use settings::{
    fake_mode_requested, BackendSettings, ExtractSettings, ExtractionMode, ExtractionTarget,
    LiveSettings,
};

/// The extraction backend selected for this process
pub enum ExtractionBackend {
    /// Hosted service
    Live(LlamaCloudClient),
    /// Deterministic fake
    Fake(FakeClient),
}

impl ExtractionBackend {
    /// Build the backend described by `settings`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the live client cannot be built.
    pub fn connect(
        settings: BackendSettings,
        extract_settings: ExtractSettings,
    ) -> Result<Self, ClientError> {
        let backend = match settings {
            BackendSettings::Live(live) => {
                ExtractionBackend::Live(LlamaCloudClient::new(live, extract_settings)?)
            }
            BackendSettings::Fake => ExtractionBackend::Fake(FakeClient::new()),
        };
        info!("Using {} extraction backend", backend.name());
        Ok(backend)
    }

    /// Select and build a backend from the process environment
    pub fn from_env(extract_settings: ExtractSettings) -> Result<Self, ClientError> {
        Self::connect(BackendSettings::from_env()?, extract_settings)
    }

    /// The fake client, when running in fake mode
    pub fn as_fake(&self) -> Option<&FakeClient> {
        match self {
            ExtractionBackend::Fake(fake) => Some(fake),
            ExtractionBackend::Live(_) => None,
        }
    }
}

impl From<FakeClient> for ExtractionBackend {
    fn from(fake: FakeClient) -> Self {
        ExtractionBackend::Fake(fake)
    }
}

#[async_trait]
impl ExtractionClient for ExtractionBackend {
    fn name(&self) -> &'static str {
        match self {
            ExtractionBackend::Live(live) => live.name(),
            ExtractionBackend::Fake(fake) => fake.name(),
        }
    }

    async fn upload(&self, path: &Path) -> Result<String, ClientError> {
        match self {
            ExtractionBackend::Live(live) => live.upload(path).await,
            ExtractionBackend::Fake(fake) => fake.upload(path).await,
        }
    }

    async fn extract(
        &self,
        file_id: &str,
        schema: &ExtractionSchema,
    ) -> Result<ExtractionResult, ClientError> {
        match self {
            ExtractionBackend::Live(live) => live.extract(file_id, schema).await,
            ExtractionBackend::Fake(fake) => fake.extract(file_id, schema).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_fake() {
        let backend =
            ExtractionBackend::connect(BackendSettings::Fake, ExtractSettings::default()).unwrap();
        assert_eq!(backend.name(), "fake");
        assert!(backend.as_fake().is_some());
    }

    #[test]
    fn test_connect_live() {
        let backend = ExtractionBackend::connect(
            BackendSettings::Live(LiveSettings::new("key")),
            ExtractSettings::default(),
        )
        .unwrap();
        assert_eq!(backend.name(), "llama-cloud");
        assert!(backend.as_fake().is_none());
    }

    #[test]
    fn test_fake_shares_state_through_backend() {
        let fake = FakeClient::new();
        let backend = ExtractionBackend::from(fake.clone());
        assert_eq!(backend.as_fake().map(FakeClient::upload_calls), Some(0));
        assert_eq!(fake.extract_calls(), 0);
    }
}
