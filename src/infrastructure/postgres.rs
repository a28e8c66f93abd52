//! `PostgreSQL` task store.
//!
//! Tasks are kept as JSONB documents, one row per task, so the table acts as
//! a document collection keyed by ID. `created_at` is duplicated into its own
//! column for ordering.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS tasks (
//!     id UUID PRIMARY KEY,
//!     data JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at DESC);
//! ```

use futures::future::{BoxFuture, FutureExt};
use sqlx::PgPool;

use crate::domain::{NewTask, Task, TaskId, Timestamp};
use crate::infrastructure::repository::{RepositoryError, RepositoryResult, TaskRepository};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS tasks (\
     id UUID PRIMARY KEY, \
     data JSONB NOT NULL, \
     created_at TIMESTAMPTZ NOT NULL)";

const CREATE_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at DESC)";

fn database_error(error: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(error.to_string())
}

fn encode(task: &Task) -> RepositoryResult<serde_json::Value> {
    serde_json::to_value(task)
        .map_err(|error| RepositoryError::SerializationError(error.to_string()))
}

fn decode(data: serde_json::Value) -> RepositoryResult<Task> {
    serde_json::from_value(data)
        .map_err(|error| RepositoryError::SerializationError(error.to_string()))
}

/// `PostgreSQL` implementation of `TaskRepository`.
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/tasks").await?;
/// let repository = PostgresTaskRepository::new(pool);
/// repository.ensure_schema().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table and its ordering index if they are missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if either statement fails.
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;
        sqlx::query(CREATE_INDEX_SQL)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;
        Ok(())
    }
}

impl TaskRepository for PostgresTaskRepository {
    fn list(&self) -> BoxFuture<'static, RepositoryResult<Vec<Task>>> {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<(serde_json::Value,)> =
                sqlx::query_as("SELECT data FROM tasks ORDER BY created_at DESC, id DESC")
                    .fetch_all(&pool)
                    .await
                    .map_err(database_error)?;

            rows.into_iter().map(|(data,)| decode(data)).collect()
        }
        .boxed()
    }

    fn find_by_id(&self, id: &TaskId) -> BoxFuture<'static, RepositoryResult<Option<Task>>> {
        let pool = self.pool.clone();
        let task_id = *id;
        async move {
            let row: Option<(serde_json::Value,)> =
                sqlx::query_as("SELECT data FROM tasks WHERE id = $1")
                    .bind(task_id.as_uuid())
                    .fetch_optional(&pool)
                    .await
                    .map_err(database_error)?;

            row.map(|(data,)| decode(data)).transpose()
        }
        .boxed()
    }

    fn insert(
        &self,
        new_task: NewTask,
        created_at: Timestamp,
    ) -> BoxFuture<'static, RepositoryResult<Task>> {
        let pool = self.pool.clone();
        async move {
            let task = Task::from_new(TaskId::generate(), new_task, created_at);
            let data = encode(&task)?;

            sqlx::query("INSERT INTO tasks (id, data, created_at) VALUES ($1, $2, $3)")
                .bind(task.task_id.as_uuid())
                .bind(&data)
                .bind(task.created_at.as_datetime())
                .execute(&pool)
                .await
                .map_err(database_error)?;

            Ok(task)
        }
        .boxed()
    }

    fn replace(&self, task: &Task) -> BoxFuture<'static, RepositoryResult<bool>> {
        let pool = self.pool.clone();
        let task = task.clone();
        async move {
            let data = encode(&task)?;

            let result = sqlx::query("UPDATE tasks SET data = $1 WHERE id = $2")
                .bind(&data)
                .bind(task.task_id.as_uuid())
                .execute(&pool)
                .await
                .map_err(database_error)?;

            Ok(result.rows_affected() > 0)
        }
        .boxed()
    }

    fn delete(&self, id: &TaskId) -> BoxFuture<'static, RepositoryResult<bool>> {
        let pool = self.pool.clone();
        let task_id = *id;
        async move {
            let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
                .bind(task_id.as_uuid())
                .execute(&pool)
                .await
                .map_err(database_error)?;

            Ok(result.rows_affected() > 0)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, TaskFields};
    use rstest::rstest;

    #[rstest]
    fn test_document_round_trip_preserves_task() {
        let new_task = NewTask::normalize(TaskFields {
            title: Some("Write report".to_string()),
            priority: Some("high".to_string()),
            category: Some("work".to_string()),
            ..TaskFields::default()
        })
        .unwrap();
        let task = Task::from_new(TaskId::generate(), new_task, Timestamp::now());

        let decoded = decode(encode(&task).unwrap()).unwrap();

        assert_eq!(decoded, task);
        assert_eq!(decoded.priority, Priority::High);
    }

    #[rstest]
    fn test_decode_rejects_malformed_document() {
        let result = decode(serde_json::json!({ "title": 42 }));
        assert!(matches!(
            result,
            Err(RepositoryError::SerializationError(_))
        ));
    }
}
