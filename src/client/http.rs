//! Remote task operations as seen from the client.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::error::ClientError;
use crate::api::{ApiError, CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::domain::TaskId;

/// Where the API listens when run with default settings.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type ClientResult<T> = Result<T, ClientError>;

/// The four remote calls the task list needs.
///
/// Each call is issued once; nothing is retried and in-flight calls cannot
/// be cancelled.
pub trait TaskApi: Send + Sync {
    fn list(&self) -> BoxFuture<'static, ClientResult<Vec<TaskResponse>>>;

    fn create(&self, request: CreateTaskRequest) -> BoxFuture<'static, ClientResult<TaskResponse>>;

    fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> BoxFuture<'static, ClientResult<TaskResponse>>;

    fn delete(&self, id: TaskId) -> BoxFuture<'static, ClientResult<()>>;
}

/// [`TaskApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }
}

impl Default for HttpTaskApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn transport_error(error: &reqwest::Error) -> ClientError {
    ClientError::Transport(error.to_string())
}

/// Turns a non-success response into `ClientError::Api`, preferring the
/// server's own message.
async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ApiError>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let response = ensure_success(response).await?;
    response
        .json()
        .await
        .map_err(|error| ClientError::Decode(error.to_string()))
}

impl TaskApi for HttpTaskApi {
    fn list(&self) -> BoxFuture<'static, ClientResult<Vec<TaskResponse>>> {
        let request = self.client.get(self.tasks_url()).timeout(REQUEST_TIMEOUT);
        async move {
            let response = request.send().await.map_err(|error| transport_error(&error))?;
            decode(response).await
        }
        .boxed()
    }

    fn create(&self, body: CreateTaskRequest) -> BoxFuture<'static, ClientResult<TaskResponse>> {
        let request = self
            .client
            .post(self.tasks_url())
            .timeout(REQUEST_TIMEOUT)
            .json(&body);
        async move {
            let response = request.send().await.map_err(|error| transport_error(&error))?;
            decode(response).await
        }
        .boxed()
    }

    fn update(
        &self,
        id: TaskId,
        body: UpdateTaskRequest,
    ) -> BoxFuture<'static, ClientResult<TaskResponse>> {
        let request = self
            .client
            .put(self.task_url(id))
            .timeout(REQUEST_TIMEOUT)
            .json(&body);
        async move {
            let response = request.send().await.map_err(|error| transport_error(&error))?;
            decode(response).await
        }
        .boxed()
    }

    fn delete(&self, id: TaskId) -> BoxFuture<'static, ClientResult<()>> {
        let request = self.client.delete(self.task_url(id)).timeout(REQUEST_TIMEOUT);
        async move {
            let response = request.send().await.map_err(|error| transport_error(&error))?;
            ensure_success(response).await.map(|_| ())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:3000", "http://localhost:3000/tasks")]
    #[case("http://localhost:3000/", "http://localhost:3000/tasks")]
    #[case("http://example.test/api", "http://example.test/api/tasks")]
    fn test_tasks_url(#[case] base_url: &str, #[case] expected: &str) {
        assert_eq!(HttpTaskApi::new(base_url).tasks_url(), expected);
    }

    #[rstest]
    fn test_default_targets_local_server() {
        assert_eq!(HttpTaskApi::default().base_url(), "http://localhost:3000");
    }

    #[rstest]
    fn test_task_url_includes_id() {
        let api = HttpTaskApi::new("http://localhost:3000");
        let id = TaskId::generate();
        assert_eq!(api.task_url(id), format!("http://localhost:3000/tasks/{id}"));
    }
}
