//! REST client for the redesign backend HTTP endpoints.
//!
//! Wraps the job API (submission, status, edit, results, health) using
//! [`reqwest`]. Response bodies are the backend's JSON shapes; status
//! strings deserialize straight into [`JobStatus`].

use serde::Deserialize;

use furnish_core::job::JobStatus;
use furnish_core::request::{EditRequest, RedesignRequest};
use furnish_core::types::{JobId, Timestamp};

use crate::error::{ClientError, ClientResult};

/// HTTP client for one redesign backend.
pub struct RedesignApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by `POST /jobs/generate` and `POST /jobs/edit/{id}`
/// after successfully creating a job.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Server-assigned identifier for the created job.
    pub job_id: JobId,
}

/// Response returned by `GET /jobs/status/{id}`.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    /// Current status of the job.
    pub job_status: JobStatus,
}

/// Response returned by `GET /jobs/results/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultPayload {
    /// Identifiers of the purchasable furniture items, in display order.
    #[serde(default)]
    pub furniture_ids: Vec<String>,
    /// Total price of the furniture selection, absent when the catalog
    /// lookup produced no prices.
    pub total_price: Option<f64>,
}

/// Response returned by `GET /jobs/health`.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    /// HTTP-style status code reported by the backend.
    pub status: u16,
    /// Server clock at the time of the check.
    pub server_time_utc: Timestamp,
}

impl RedesignApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Backend base URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across clients).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Backend base URL (e.g. `http://localhost:8000`).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a redesign job.
    ///
    /// Sends `POST /jobs/generate` as a multipart form with a `params`
    /// field (JSON `{"prompt", "max_price"}`) and an `image` file field.
    /// Returns the server-assigned job id.
    pub async fn submit(&self, request: &RedesignRequest) -> ClientResult<SubmitResponse> {
        let params = serde_json::to_string(&request.params())
            .expect("RedesignParams is always serialisable");

        let image_part = reqwest::multipart::Part::bytes(request.image.bytes.clone())
            .file_name(request.image.file_name.clone())
            .mime_str("image/jpeg")?;

        let form = reqwest::multipart::Form::new()
            .text("params", params)
            .part("image", image_part);

        let response = self
            .client
            .post(format!("{}/jobs/generate", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the current status of a job.
    ///
    /// Sends `GET /jobs/status/{id}`.
    pub async fn status(&self, job_id: &JobId) -> ClientResult<StatusResponse> {
        let response = self
            .client
            .get(format!("{}/jobs/status/{}", self.base_url, job_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit an edit follow-up against an existing job.
    ///
    /// Sends `POST /jobs/edit/{id}` with a JSON body
    /// `{"edit_prompt", "max_price"}`. Returns a fresh job id; status
    /// and results for the edit are tracked under the new id.
    pub async fn submit_edit(
        &self,
        job_id: &JobId,
        request: &EditRequest,
    ) -> ClientResult<SubmitResponse> {
        let response = self
            .client
            .post(format!("{}/jobs/edit/{}", self.base_url, job_id))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the result payload for a completed job.
    ///
    /// Sends `GET /jobs/results/{id}`. The redesigned image itself is
    /// not in the payload; its path follows the naming convention in
    /// `furnish_core::naming`.
    pub async fn fetch_result(&self, job_id: &JobId) -> ClientResult<ResultPayload> {
        let response = self
            .client
            .get(format!("{}/jobs/results/{}", self.base_url, job_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Check backend liveness.
    ///
    /// Sends `GET /jobs/health` and returns the reported server time.
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self
            .client
            .get(format!("{}/jobs/health", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
