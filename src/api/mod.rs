//! Remote task service.
//!
//! [`TaskApi`] is the seam between the controller and the network: the
//! controller only ever talks to this trait, so tests can substitute a fake
//! and the TUI can run calls on background tasks.

mod http;
#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpTaskApi;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::model::{NewTask, Task, TaskId, TaskUpdate};

/// Error type for remote task operations
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("server returned {status}")]
    Status { status: StatusCode, body: String },
    /// Connection refused, DNS failure, timeout, ...
    #[error("could not reach server: {0}")]
    Transport(#[source] reqwest::Error),
    /// The response body was not the JSON we expected
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Short, user-facing description. Never includes the response body.
    pub fn summary(&self) -> String {
        match self {
            ApiError::Status { status, .. } => status.to_string(),
            ApiError::Transport(e) if e.is_timeout() => "request timed out".to_string(),
            ApiError::Transport(_) => "could not reach server".to_string(),
            ApiError::Decode(_) => "unexpected response from server".to_string(),
            ApiError::InvalidBaseUrl(_) => "invalid server address".to_string(),
        }
    }

    /// HTTP status, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The four remote operations on the task collection
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /api/tasks`
    async fn list(&self) -> Result<Vec<Task>, ApiError>;
    /// `POST /api/tasks`
    async fn create(&self, task: &NewTask) -> Result<Task, ApiError>;
    /// `PUT /api/tasks/{id}`
    async fn update(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, ApiError>;
    /// `DELETE /api/tasks/{id}`
    async fn delete(&self, id: TaskId) -> Result<(), ApiError>;
}
