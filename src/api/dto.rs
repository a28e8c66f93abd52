//! Data Transfer Objects for API requests and responses.
//!
//! These types define the JSON contract shared by the server and the
//! client. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Priority, Task, TaskFields, TaskFieldsPatch, TaskId, Timestamp};

// =============================================================================
// Requests
// =============================================================================

/// Request body for `POST /tasks`.
///
/// Every field is optional at the JSON level so that a missing title is
/// reported as a validation error rather than a deserialization failure.
/// `priority` is kept as raw text; an empty string means "not chosen".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<CreateTaskRequest> for TaskFields {
    fn from(request: CreateTaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            priority: request.priority,
            due_date: request.due_date.map(Timestamp::from_datetime),
            category: request.category,
        }
    }
}

/// Request body for `PUT /tasks/{id}`.
///
/// Absent fields are left unchanged. Unknown fields (such as a full task
/// echoed back by a client) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl UpdateTaskRequest {
    /// A request that only sets the completion flag.
    #[must_use]
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

impl From<UpdateTaskRequest> for TaskFieldsPatch {
    fn from(request: UpdateTaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            priority: request.priority,
            due_date: request.due_date.map(Timestamp::from_datetime),
            completed: request.completed,
            category: request.category,
        }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// A task as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.task_id,
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date.map(|due| *due.as_datetime()),
            completed: task.completed,
            category: task.category.clone(),
            created_at: *task.created_at.as_datetime(),
            updated_at: *task.updated_at.as_datetime(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

/// Body returned by `DELETE /tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}

impl DeleteTaskResponse {
    #[must_use]
    pub fn removed() -> Self {
        Self {
            message: "Task removed".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
