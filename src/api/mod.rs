//! HTTP contract with the job-execution backend.
//!
//! The backend exposes a small REST surface: `GET /jobs` for the current
//! snapshot, `GET /jobs/{id}` for a single job with its recent log excerpt,
//! and `POST /jobs/{stage}` to start a pipeline stage.
//!
//! The dashboard core talks to the backend through the [`JobsApi`] trait so
//! tests can substitute a scripted client.

pub mod client;
mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpClient;
pub use models::{Job, Stage, TriggerAck};

/// Error returned by backend operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response (connection refused, DNS, etc).
    #[error("transport error: {0}")]
    Transport(String),
    /// Backend answered with a non-success status.
    #[error("server returned HTTP {status} for {path}")]
    Status { path: String, status: u16 },
    /// Backend answered 2xx but the body did not parse.
    #[error("invalid response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Operations the backend offers, as consumed by the dashboard.
#[async_trait]
pub trait JobsApi: Send + Sync {
    /// Fetch the full job snapshot, in server order.
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError>;

    /// Fetch one job including its recent log excerpt.
    async fn job_detail(&self, id: &str) -> Result<Job, ApiError>;

    /// Ask the backend to start a pipeline stage.
    async fn trigger(&self, stage: Stage) -> Result<TriggerAck, ApiError>;
}
