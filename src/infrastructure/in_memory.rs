//! In-memory task store.
//!
//! Suitable for development and tests. The map lives behind
//! `Arc<RwLock<...>>` so clones of the repository share one store and
//! writes to the same record are serialized by the lock.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::RwLock;

use crate::domain::{NewTask, Task, TaskId, Timestamp};
use crate::infrastructure::repository::{
    RepositoryResult, TaskRepository, sort_newest_first,
};

/// In-memory implementation of `TaskRepository`.
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryTaskRepository::new();
/// let task = repository.insert(new_task, Timestamp::now()).await?;
/// let found = repository.find_by_id(&task.task_id).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TaskRepository for InMemoryTaskRepository {
    fn list(&self) -> BoxFuture<'static, RepositoryResult<Vec<Task>>> {
        let tasks = Arc::clone(&self.tasks);
        async move {
            let guard = tasks.read().await;
            let mut listed: Vec<Task> = guard.values().cloned().collect();
            sort_newest_first(&mut listed);
            Ok(listed)
        }
        .boxed()
    }

    fn find_by_id(&self, id: &TaskId) -> BoxFuture<'static, RepositoryResult<Option<Task>>> {
        let tasks = Arc::clone(&self.tasks);
        let id = *id;
        async move {
            let guard = tasks.read().await;
            Ok(guard.get(&id).cloned())
        }
        .boxed()
    }

    fn insert(
        &self,
        new_task: NewTask,
        created_at: Timestamp,
    ) -> BoxFuture<'static, RepositoryResult<Task>> {
        let tasks = Arc::clone(&self.tasks);
        async move {
            let mut guard = tasks.write().await;
            let mut task_id = TaskId::generate();
            while guard.contains_key(&task_id) {
                task_id = TaskId::generate();
            }
            let task = Task::from_new(task_id, new_task, created_at);
            guard.insert(task_id, task.clone());
            Ok(task)
        }
        .boxed()
    }

    fn replace(&self, task: &Task) -> BoxFuture<'static, RepositoryResult<bool>> {
        let tasks = Arc::clone(&self.tasks);
        let task = task.clone();
        async move {
            let mut guard = tasks.write().await;
            match guard.get_mut(&task.task_id) {
                Some(slot) => {
                    *slot = task;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        .boxed()
    }

    fn delete(&self, id: &TaskId) -> BoxFuture<'static, RepositoryResult<bool>> {
        let tasks = Arc::clone(&self.tasks);
        let id = *id;
        async move {
            let mut guard = tasks.write().await;
            Ok(guard.remove(&id).is_some())
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
