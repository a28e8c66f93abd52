//! Repository trait for the task store.
//!
//! Every method returns a boxed `'static` future so callers can hold the
//! repository as a trait object and compose calls freely. Implementations
//! clone whatever they need out of `self` before building the future.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{NewTask, Task, TaskId, Timestamp};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type returned by every repository future.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

// =============================================================================
// Task Repository
// =============================================================================

/// Durable storage for tasks, keyed by [`TaskId`].
///
/// The store is responsible for assigning identifiers and for ordering
/// listings. It applies no domain rules of its own; writes to a single
/// record are serialized by the implementation and the last write wins.
pub trait TaskRepository: Send + Sync {
    /// Returns every task, newest `created_at` first.
    fn list(&self) -> BoxFuture<'static, RepositoryResult<Vec<Task>>>;

    /// Finds a task by its ID.
    ///
    /// Returns `Ok(None)` if no task has that ID.
    fn find_by_id(&self, id: &TaskId) -> BoxFuture<'static, RepositoryResult<Option<Task>>>;

    /// Persists a new task, assigning its ID, and returns the stored record.
    fn insert(
        &self,
        new_task: NewTask,
        created_at: Timestamp,
    ) -> BoxFuture<'static, RepositoryResult<Task>>;

    /// Replaces a stored task wholesale.
    ///
    /// Returns `Ok(false)` if the task no longer exists.
    fn replace(&self, task: &Task) -> BoxFuture<'static, RepositoryResult<bool>>;

    /// Deletes a task by its ID.
    ///
    /// Returns `Ok(true)` if the task was deleted, `Ok(false)` if it didn't exist.
    fn delete(&self, id: &TaskId) -> BoxFuture<'static, RepositoryResult<bool>>;
}

/// Orders tasks newest first, breaking timestamp ties by ID.
///
/// IDs are time-ordered, so the tie-break keeps insertion order stable for
/// tasks created within the same clock tick.
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| right.task_id.cmp(&left.task_id))
    });
}

// =============================================================================
// Tests
// =============================================================================
