//! Session-scoped owner of the client's task list.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::error::ClientError;
use super::form::{EditForm, TaskForm};
use super::http::{ClientResult, TaskApi};
use super::state::{Filter, TaskListEvent, TaskListState};
use crate::api::{TaskResponse, UpdateTaskRequest};
use crate::domain::TaskId;

/// Holds the task list for one session and reconciles it with the server.
///
/// Local state changes only after a successful response, and always from
/// the record the server returned. The lock is released before every remote
/// call, so several mutations may be in flight and are applied in whatever
/// order their responses arrive.
#[derive(Clone)]
pub struct ClientStateController {
    api: Arc<dyn TaskApi>,
    state: Arc<RwLock<TaskListState>>,
}

impl fmt::Debug for ClientStateController {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ClientStateController")
            .finish_non_exhaustive()
    }
}

impl ClientStateController {
    #[must_use]
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(TaskListState::new())),
        }
    }

    async fn dispatch(&self, event: TaskListEvent) {
        let mut state = self.state.write().await;
        *state = std::mem::take(&mut *state).apply(event);
    }

    fn report<T>(operation: &'static str, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(error) = &result {
            tracing::warn!(operation, error = %error, "Task request failed");
        }
        result
    }

    /// Loads the full list, replacing whatever was held.
    ///
    /// # Errors
    ///
    /// Returns the request failure; the held list is unchanged.
    pub async fn refresh(&self) -> ClientResult<()> {
        let tasks = Self::report("refresh", self.api.list().await)?;
        tracing::debug!(count = tasks.len(), "Task list loaded");
        self.dispatch(TaskListEvent::Loaded(tasks)).await;
        Ok(())
    }

    /// Submits the create form and prepends the created task.
    ///
    /// The form is reset only after the server accepted it.
    ///
    /// # Errors
    ///
    /// Returns a form error before any request is sent, or the request failure.
    pub async fn create(&self, form: &mut TaskForm) -> ClientResult<TaskResponse> {
        let request = form.submit(Utc::now()).map_err(ClientError::from)?;
        let created = Self::report("create", self.api.create(request).await)?;
        self.dispatch(TaskListEvent::Created(created.clone())).await;
        form.reset();
        Ok(created)
    }

    /// Saves an inline edit.
    ///
    /// # Errors
    ///
    /// Returns a form error before any request is sent, or the request failure.
    pub async fn save_edit(&self, id: TaskId, edit: &EditForm) -> ClientResult<TaskResponse> {
        let request = edit.to_request().map_err(ClientError::from)?;
        let updated = Self::report("save_edit", self.api.update(id, request).await)?;
        self.dispatch(TaskListEvent::Updated(updated.clone())).await;
        Ok(updated)
    }

    /// Flips completion, sending the opposite of the known value.
    ///
    /// # Errors
    ///
    /// Returns the request failure; the held list is unchanged.
    pub async fn toggle_complete(&self, task: &TaskResponse) -> ClientResult<TaskResponse> {
        let request = UpdateTaskRequest::completion(!task.completed);
        let updated = Self::report("toggle_complete", self.api.update(task.id, request).await)?;
        self.dispatch(TaskListEvent::Updated(updated.clone())).await;
        Ok(updated)
    }

    /// Deletes a task on the server, then drops it locally.
    ///
    /// # Errors
    ///
    /// Returns the request failure; the held list is unchanged.
    pub async fn delete(&self, id: TaskId) -> ClientResult<()> {
        Self::report("delete", self.api.delete(id).await)?;
        self.dispatch(TaskListEvent::Deleted(id)).await;
        Ok(())
    }

    pub async fn set_filter(&self, filter: Filter) {
        self.dispatch(TaskListEvent::FilterChanged(filter)).await;
    }

    pub async fn filter(&self) -> Filter {
        self.state.read().await.filter()
    }

    /// The list as received, newest first.
    pub async fn tasks(&self) -> Vec<TaskResponse> {
        self.state.read().await.tasks().to_vec()
    }

    /// The list projected through the active filter.
    pub async fn filtered_view(&self) -> Vec<TaskResponse> {
        self.state
            .read()
            .await
            .filtered_view()
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn snapshot(&self) -> TaskListState {
        self.state.read().await.clone()
    }
}
