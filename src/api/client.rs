//! reqwest-backed client for the job backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{ApiError, Job, JobsApi, Stage, TriggerAck};

/// HTTP client for the job-execution backend.
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::decode(path, response).await
    }
}

#[async_trait]
impl JobsApi for HttpClient {
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.get_json("/jobs").await
    }

    async fn job_detail(&self, id: &str) -> Result<Job, ApiError> {
        // The full id is always used for requests; truncation is display only.
        let path = format!("/jobs/{}", id);
        self.get_json(&path).await
    }

    async fn trigger(&self, stage: Stage) -> Result<TriggerAck, ApiError> {
        let path = stage.path();
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::decode(path, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client = HttpClient::new("http://localhost:8000/");
        assert_eq!(client.url("/jobs"), "http://localhost:8000/jobs");
    }
}
