//! Task service: the domain rules sitting between the API and the store.

use std::sync::Arc;

use crate::application::error::ServiceError;
use crate::domain::{NewTask, Task, TaskFields, TaskFieldsPatch, TaskId, TaskPatch, Timestamp};
use crate::infrastructure::TaskRepository;

/// List, create, update and delete tasks.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TaskService")
            .field("repository", &"Arc<dyn TaskRepository>")
            .finish()
    }
}

/// Logs a store failure before it leaves the service.
fn log_store_error(operation: &'static str) -> impl FnOnce(ServiceError) -> ServiceError {
    move |error| {
        if let ServiceError::Store(ref cause) = error {
            tracing::error!(%cause, operation, "Task store failure");
        }
        error
    }
}

impl TaskService {
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Returns all tasks, newest first. No filtering happens here.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the store fails.
    pub async fn list(&self) -> Result<Vec<Task>, ServiceError> {
        let tasks = self
            .repository
            .list()
            .await
            .map_err(ServiceError::from)
            .map_err(log_store_error("list"))?;
        tracing::debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Validates and stores a new task.
    ///
    /// The store assigns the ID; `created_at` is the time of the call.
    /// Priority defaults to `low` and `completed` to false.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if the title is missing or empty, or the
    ///   priority is unknown
    /// - `ServiceError::Store` if the store fails
    pub async fn create(&self, fields: TaskFields) -> Result<Task, ServiceError> {
        let new_task = NewTask::normalize(fields)?;

        let task = self
            .repository
            .insert(new_task, Timestamp::now())
            .await
            .map_err(ServiceError::from)
            .map_err(log_store_error("create"))?;

        tracing::info!(task_id = %task.task_id, "Task created");
        Ok(task)
    }

    /// Merges a partial update into a stored task.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if a present title is empty or the
    ///   priority is unknown
    /// - `ServiceError::NotFound` if no task has `id`
    /// - `ServiceError::Conflict` if the request sets `completed: true` on a
    ///   task that is already completed
    /// - `ServiceError::Store` if the store fails
    pub async fn update(&self, id: TaskId, fields: TaskFieldsPatch) -> Result<Task, ServiceError> {
        let stored = self
            .repository
            .find_by_id(&id)
            .await
            .map_err(ServiceError::from)
            .map_err(log_store_error("update"))?
            .ok_or(ServiceError::NotFound(id))?;

        let patch = TaskPatch::normalize(fields)?;
        let updated = stored.apply(patch, Timestamp::now())?;

        let replaced = self
            .repository
            .replace(&updated)
            .await
            .map_err(ServiceError::from)
            .map_err(log_store_error("update"))?;

        // Deleted between the read and the write
        if !replaced {
            return Err(ServiceError::NotFound(id));
        }

        tracing::info!(task_id = %id, completed = updated.completed, "Task updated");
        Ok(updated)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` if no task has `id`
    /// - `ServiceError::Store` if the store fails
    pub async fn delete(&self, id: TaskId) -> Result<(), ServiceError> {
        let deleted = self
            .repository
            .delete(&id)
            .await
            .map_err(ServiceError::from)
            .map_err(log_store_error("delete"))?;

        if !deleted {
            return Err(ServiceError::NotFound(id));
        }

        tracing::info!(task_id = %id, "Task deleted");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
