//! The client's task list as an owned state value.
//!
//! Every transition consumes the current state and returns the next one, so
//! reconciliation is a pure function of `(state, event)`.

use std::str::FromStr;

use super::error::FilterError;
use crate::api::TaskResponse;
use crate::domain::TaskId;

/// Which slice of the list is shown. Never affects stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "COMPLETED" => Ok(Self::Completed),
            "PENDING" => Ok(Self::Pending),
            _ => Err(FilterError::Unknown(value.to_string())),
        }
    }
}

/// Something that happened to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListEvent {
    /// The full list arrived from the server.
    Loaded(Vec<TaskResponse>),
    Created(TaskResponse),
    Updated(TaskResponse),
    Deleted(TaskId),
    FilterChanged(Filter),
}

/// Tasks held for the session, in the order received (newest first), plus
/// the active filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    tasks: Vec<TaskResponse>,
    filter: Filter,
}

impl TaskListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tasks(&self) -> &[TaskResponse] {
        &self.tasks
    }

    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Applies one event.
    #[must_use]
    pub fn apply(self, event: TaskListEvent) -> Self {
        match event {
            TaskListEvent::Loaded(tasks) => self.on_loaded(tasks),
            TaskListEvent::Created(task) => self.on_created(task),
            TaskListEvent::Updated(task) => self.on_updated(task),
            TaskListEvent::Deleted(id) => self.on_deleted(id),
            TaskListEvent::FilterChanged(filter) => self.with_filter(filter),
        }
    }

    /// Replaces the whole list.
    #[must_use]
    pub fn on_loaded(self, tasks: Vec<TaskResponse>) -> Self {
        Self { tasks, ..self }
    }

    /// Prepends a new task; it is the newest.
    #[must_use]
    pub fn on_created(mut self, task: TaskResponse) -> Self {
        self.tasks.insert(0, task);
        self
    }

    /// Replaces the entry with the same ID. No-op if absent.
    #[must_use]
    pub fn on_updated(mut self, task: TaskResponse) -> Self {
        if let Some(slot) = self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            *slot = task;
        }
        self
    }

    /// Removes the entry with the given ID. No-op if absent.
    #[must_use]
    pub fn on_deleted(mut self, id: TaskId) -> Self {
        self.tasks.retain(|task| task.id != id);
        self
    }

    #[must_use]
    pub fn with_filter(self, filter: Filter) -> Self {
        Self { filter, ..self }
    }

    /// Projects the list through the active filter.
    ///
    /// - `All`: unchanged.
    /// - `Completed`: completed tasks, same order.
    /// - `Pending`: open tasks, stable-sorted by priority rank (high first).
    #[must_use]
    pub fn filtered_view(&self) -> Vec<&TaskResponse> {
        match self.filter {
            Filter::All => self.tasks.iter().collect(),
            Filter::Completed => self.tasks.iter().filter(|task| task.completed).collect(),
            Filter::Pending => {
                let mut pending: Vec<&TaskResponse> =
                    self.tasks.iter().filter(|task| !task.completed).collect();
                // `sort_by_key` is stable, so equal ranks keep list order
                pending.sort_by_key(|task| task.priority.rank());
                pending
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
