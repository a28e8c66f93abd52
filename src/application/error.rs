//! Task service error taxonomy.

use thiserror::Error;

use crate::domain::{TaskId, TaskRuleViolation};
use crate::infrastructure::RepositoryError;

/// Errors returned by [`TaskService`](super::TaskService) operations.
///
/// None of these are retried by the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Missing or invalid input.
    #[error("{0}")]
    Validation(TaskRuleViolation),

    /// No task has the requested ID.
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    /// The request asked to complete an already completed task.
    #[error("{0}")]
    Conflict(TaskRuleViolation),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl From<TaskRuleViolation> for ServiceError {
    fn from(violation: TaskRuleViolation) -> Self {
        match violation {
            TaskRuleViolation::AlreadyCompleted => Self::Conflict(violation),
            other => Self::Validation(other),
        }
    }
}
