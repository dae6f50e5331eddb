//! LlamaCloud extraction backend
//!
//! Talks to the hosted document-understanding service over HTTPS.
//!
//! # Protocol
//!
//! - `POST /api/v1/files` (multipart) uploads a document and returns its id
//! - `POST /api/v1/extraction/run` starts a schema-guided extraction job
//! - `GET /api/v1/extraction/jobs/{id}` reports job status
//! - `GET /api/v1/extraction/jobs/{id}/result` returns the extracted data
//!
//! Polling a job is part of one logical `extract` call and is not a retry.
//! Failed requests are never re-sent; retry policy belongs to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use brdx_client::{ExtractSettings, LiveSettings, LlamaCloudClient};
//!
//! let client = LlamaCloudClient::new(
//!     LiveSettings::new("llx-..."),
//!     ExtractSettings::default(),
//! ).unwrap();
//! ```

use crate::settings::{ExtractSettings, LiveSettings};
use async_trait::async_trait;
use brdx_domain::{ClientError, ExtractionClient, ExtractionResult, ExtractionSchema};
use reqwest::{multipart, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Client for the hosted extraction service
pub struct LlamaCloudClient {
    settings: LiveSettings,
    extract_settings: ExtractSettings,
    client: reqwest::Client,
}

/// Request body for starting an extraction job
#[derive(Serialize)]
struct ExtractionRunRequest<'a> {
    file_id: &'a str,
    data_schema: &'a Value,
    config: &'a ExtractSettings,
}

/// Uploaded file descriptor
#[derive(Deserialize)]
struct FileResponse {
    id: String,
}

/// Extraction job descriptor
#[derive(Deserialize)]
struct JobResponse {
    id: String,
    status: JobStatus,
    #[serde(default)]
    error: Option<String>,
}

/// Extraction job result
#[derive(Deserialize)]
struct JobResultResponse {
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum JobStatus {
    Pending,
    Success,
    PartialSuccess,
    Error,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl LlamaCloudClient {
    /// Create a client for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the HTTP client cannot be built.
    pub fn new(
        settings: LiveSettings,
        extract_settings: ExtractSettings,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            settings,
            extract_settings,
            client,
        })
    }

    /// Endpoint this client talks to
    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url, path)
    }

    /// Attach credentials and project/organization scope
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let mut scope = Vec::new();
        if let Some(project_id) = &self.settings.project_id {
            scope.push(("project_id", project_id.as_str()));
        }
        if let Some(organization_id) = &self.settings.organization_id {
            scope.push(("organization_id", organization_id.as_str()));
        }

        request
            .bearer_auth(&self.settings.api_key)
            .query(&scope)
    }

    async fn send_json<T>(&self, request: RequestBuilder) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(map_request_error)?;
        let response = check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Extraction(format!("Failed to parse response: {}", e)))
    }

    async fn job_status(&self, job_id: &str) -> Result<JobResponse, ClientError> {
        let url = self.url(&format!("/api/v1/extraction/jobs/{}", job_id));
        self.send_json(self.client.get(url)).await
    }

    async fn job_result(&self, job_id: &str) -> Result<Value, ClientError> {
        let url = self.url(&format!("/api/v1/extraction/jobs/{}/result", job_id));
        let result: JobResultResponse = self.send_json(self.client.get(url)).await?;
        Ok(result.data)
    }

    /// Poll until the job leaves `PENDING`
    async fn wait_for_job(&self, mut job: JobResponse) -> Result<JobResponse, ClientError> {
        while job.status == JobStatus::Pending {
            tokio::time::sleep(self.settings.poll_interval).await;
            job = self.job_status(&job.id).await?;
            debug!("Extraction job {} status: {:?}", job.id, job.status);
        }
        Ok(job)
    }
}

#[async_trait]
impl ExtractionClient for LlamaCloudClient {
    fn name(&self) -> &'static str {
        "llama-cloud"
    }

    async fn upload(&self, path: &Path) -> Result<String, ClientError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::NotFound(format!("{}: {}", path.display(), e)))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        debug!("Uploading {} ({} bytes)", file_name, bytes.len());

        let form = multipart::Form::new()
            .part("upload_file", multipart::Part::bytes(bytes).file_name(file_name));

        let file: FileResponse = self
            .send_json(self.client.post(self.url("/api/v1/files")).multipart(form))
            .await?;
        Ok(file.id)
    }

    async fn extract(
        &self,
        file_id: &str,
        schema: &ExtractionSchema,
    ) -> Result<ExtractionResult, ClientError> {
        let body = ExtractionRunRequest {
            file_id,
            data_schema: schema.as_value(),
            config: &self.extract_settings,
        };

        let job: JobResponse = self
            .send_json(self.client.post(self.url("/api/v1/extraction/run")).json(&body))
            .await?;
        debug!("Started extraction job {} for {}", job.id, file_id);

        let job = self.wait_for_job(job).await?;

        match job.status {
            JobStatus::Success => {
                let data = self.job_result(&job.id).await?;
                Ok(ExtractionResult {
                    id: job.id,
                    file_id: file_id.to_string(),
                    data,
                })
            }
            JobStatus::PartialSuccess => {
                let recovered = self.job_result(&job.id).await?;
                Err(ClientError::PartialExtraction {
                    message: job
                        .error
                        .unwrap_or_else(|| format!("job {} completed partially", job.id)),
                    recovered,
                })
            }
            status => Err(ClientError::Extraction(format!(
                "job {} finished with status {:?}: {}",
                job.id,
                status,
                job.error.unwrap_or_else(|| "no error reported".to_string())
            ))),
        }
    }
}

/// Classify a failed request: anything that never got an HTTP answer is transport
fn map_request_error(e: reqwest::Error) -> ClientError {
    if e.is_decode() {
        ClientError::Extraction(format!("Invalid response: {}", e))
    } else {
        ClientError::Transport(format!("Request failed: {}", e))
    }
}

/// Map non-success statuses onto the error taxonomy
///
/// Auth, throttling and server errors are transport problems the caller may
/// retry; other client errors mean the backend rejected the input.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = format!("HTTP {}: {}", status, error_text);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            Err(ClientError::Transport(message))
        }
        s if s.is_server_error() => Err(ClientError::Transport(message)),
        _ => Err(ClientError::Extraction(message)),
    }
}
