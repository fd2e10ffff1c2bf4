use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

use super::{ApiError, TaskApi};
use crate::model::{NewTask, Task, TaskId, TaskUpdate};

/// [`TaskApi`] over HTTP/JSON with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: Client,
    base: Url,
}

impl HttpTaskApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Transport)?;
        Self::with_client(base_url, http)
    }

    /// Use a preconfigured client (proxy settings, custom timeouts, ...)
    pub fn with_client(base_url: &str, http: Client) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)?;
        // "localhost:8080" parses with "localhost" as the scheme
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(
                url::ParseError::RelativeUrlWithoutBase,
            ));
        }
        Ok(HttpTaskApi { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn collection_url(&self) -> Url {
        self.endpoint(&["api", "tasks"])
    }

    fn task_url(&self, id: TaskId) -> Url {
        self.endpoint(&["api", "tasks", &id.to_string()])
    }
}

/// Turn a non-success status into [`ApiError::Status`], logging the body
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(
        status = status.as_u16(),
        body = body.trim_end(),
        "task api: request failed"
    );
    Err(ApiError::Status { status, body })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let url = self.collection_url();
        debug!(%url, "task api: list");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response)
            .await?
            .json()
            .await
            .map_err(ApiError::Decode)
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        let url = self.collection_url();
        debug!(%url, title = %task.title, "task api: create");
        let response = self
            .http
            .post(url)
            .json(task)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response)
            .await?
            .json()
            .await
            .map_err(ApiError::Decode)
    }

    async fn update(&self, id: TaskId, update: &TaskUpdate) -> Result<Task, ApiError> {
        let url = self.task_url(id);
        debug!(%url, task_id = id.0, ?update, "task api: update");
        let response = self
            .http
            .put(url)
            .json(update)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        check_status(response)
            .await?
            .json()
            .await
            .map_err(ApiError::Decode)
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let url = self.task_url(id);
        debug!(%url, task_id = id.0, "task api: delete");
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        // Any success status is an acknowledgement; the body is ignored
        check_status(response).await?;
        Ok(())
    }
}
