//! HTTP handlers for the task API.
//!
//! Each handler translates the request, calls the [`TaskService`], and maps
//! the outcome onto a status code. No domain rules live here.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use super::dto::{CreateTaskRequest, DeleteTaskResponse, TaskResponse, UpdateTaskRequest};
use super::error::ApiErrorResponse;
use crate::application::TaskService;
use crate::domain::TaskId;

// =============================================================================
// Application State
// =============================================================================

/// Shared handler dependencies.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: TaskService,
}

impl AppState {
    #[must_use]
    pub const fn new(service: TaskService) -> Self {
        Self { service }
    }
}

/// Parses a path segment into a `TaskId`.
///
/// A malformed ID cannot name a stored task, so it is reported as 404.
fn parse_task_id(raw: &str) -> Result<TaskId, ApiErrorResponse> {
    raw.parse()
        .map_err(|_| ApiErrorResponse::not_found("Task not found"))
}

// =============================================================================
// GET /tasks
// =============================================================================

/// Lists all tasks, newest first.
///
/// # Response
///
/// - **200 OK**: array of tasks
/// - **500 Internal Server Error**: store failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 500 if the store fails.
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let tasks = state.service.list().await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

// =============================================================================
// POST /tasks
// =============================================================================

/// Creates a new task.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Task title",
///   "description": "Optional description",
///   "priority": "low|medium|high",
///   "dueDate": "2030-01-01T09:00:00Z",
///   "category": "Optional label"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the stored task
/// - **400 Bad Request**: missing title, unknown priority, or malformed body
/// - **500 Internal Server Error**: store failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] as listed above.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let Json(request) = payload?;
    let task = state.service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

// =============================================================================
// PUT /tasks/{id}
// =============================================================================

/// Applies a partial update to a task.
///
/// # Response
///
/// - **200 OK**: the updated task
/// - **400 Bad Request**: validation failure, or `completed: true` sent for a
///   task that is already completed
/// - **404 Not Found**: unknown ID
/// - **500 Internal Server Error**: store failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] as listed above.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let task_id = parse_task_id(&id)?;
    let Json(request) = payload?;
    let task = state.service.update(task_id, request.into()).await?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// DELETE /tasks/{id}
// =============================================================================

/// Deletes a task.
///
/// # Response
///
/// - **200 OK**: `{ "message": "Task removed" }`
/// - **404 Not Found**: unknown ID
/// - **500 Internal Server Error**: store failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] as listed above.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTaskResponse>, ApiErrorResponse> {
    let task_id = parse_task_id(&id)?;
    state.service.delete(task_id).await?;
    Ok(Json(DeleteTaskResponse::removed()))
}

// =============================================================================
// GET /health
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Reports that the service is running.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
