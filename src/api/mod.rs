//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use dto::{CreateTaskRequest, DeleteTaskResponse, TaskResponse, UpdateTaskRequest};
pub use error::{ApiError, ApiErrorResponse, FieldError};
pub use handlers::{
    AppState, HealthResponse, create_task, delete_task, health_check, list_tasks, update_task,
};
pub use routes::create_router;
