//! Shared helpers for the integration tests.
//!
//! Each file under `tests/` is its own crate and uses a different subset of
//! these helpers, hence the `dead_code` allowance.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use futures::future::{BoxFuture, FutureExt};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceExt;

use task_manager::api::{AppState, create_router};
use task_manager::application::TaskService;
use task_manager::domain::{NewTask, Task, TaskId, Timestamp};
use task_manager::infrastructure::{
    InMemoryTaskRepository, RepositoryError, RepositoryResult, TaskRepository,
};
use task_manager::server;

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Creates an `AppState` over an empty in-memory store.
pub fn create_test_app_state() -> AppState {
    AppState::new(TaskService::new(Arc::new(InMemoryTaskRepository::new())))
}

/// Creates an `AppState` whose store fails every call.
pub fn create_failing_app_state() -> AppState {
    AppState::new(TaskService::new(Arc::new(FailingTaskRepository)))
}

pub fn create_test_router() -> Router {
    create_router(create_test_app_state())
}

// =============================================================================
// Failing Store
// =============================================================================

/// A store that is always unreachable.
pub struct FailingTaskRepository;

impl FailingTaskRepository {
    fn unavailable<T: Send + 'static>() -> BoxFuture<'static, RepositoryResult<T>> {
        async { Err(RepositoryError::DatabaseError("connection refused".to_string())) }.boxed()
    }
}

impl TaskRepository for FailingTaskRepository {
    fn list(&self) -> BoxFuture<'static, RepositoryResult<Vec<Task>>> {
        Self::unavailable()
    }

    fn find_by_id(&self, _id: &TaskId) -> BoxFuture<'static, RepositoryResult<Option<Task>>> {
        Self::unavailable()
    }

    fn insert(
        &self,
        _new_task: NewTask,
        _created_at: Timestamp,
    ) -> BoxFuture<'static, RepositoryResult<Task>> {
        Self::unavailable()
    }

    fn replace(&self, _task: &Task) -> BoxFuture<'static, RepositoryResult<bool>> {
        Self::unavailable()
    }

    fn delete(&self, _id: &TaskId) -> BoxFuture<'static, RepositoryResult<bool>> {
        Self::unavailable()
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends one request through the router and returns status and JSON body.
///
/// An empty body decodes as `Value::Null`.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => request.body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Creates a task through the API and returns the response body.
pub async fn create_via_api(router: &Router, body: Value) -> Value {
    let (status, json) = send(router, Method::POST, "/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json
}

// =============================================================================
// Live Server
// =============================================================================

/// A server bound to an ephemeral local port. Shuts down when dropped.
pub struct TestServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let (sender, receiver) = oneshot::channel::<()>();

        tokio::spawn(server::serve(listener, create_test_router(), async move {
            let _ = receiver.await;
        }));

        Self {
            base_url: format!("http://{address}"),
            shutdown: Some(sender),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}
