//! Input models for the create form and the inline edit form.

use chrono::{DateTime, Utc};

use super::error::FormError;
use crate::api::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::domain::Priority;

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Fields collected by the "new task" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// `None` means the user never picked one; the server defaults it to low.
    pub priority: Option<Priority>,
    pub category: String,
    due_date: Option<DateTime<Utc>>,
}

impl TaskForm {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Sets the due date if `candidate` is strictly after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::DueDateNotInFuture`] and keeps the previous value
    /// otherwise.
    pub fn set_due_date(
        &mut self,
        candidate: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), FormError> {
        if candidate <= now {
            return Err(FormError::DueDateNotInFuture);
        }
        self.due_date = Some(candidate);
        Ok(())
    }

    /// Removes the due date; a task without one is valid.
    pub fn clear_due_date(&mut self) {
        self.due_date = None;
    }

    /// Builds the create request.
    ///
    /// The due date is checked again against `now`, since it may have been
    /// picked a while before submitting.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingTitle`] for a blank title and
    /// [`FormError::DueDateNotInFuture`] for a due date that has passed.
    pub fn submit(&self, now: DateTime<Utc>) -> Result<CreateTaskRequest, FormError> {
        let title = non_blank(&self.title).ok_or(FormError::MissingTitle)?;
        if self.due_date.is_some_and(|due| due <= now) {
            return Err(FormError::DueDateNotInFuture);
        }

        Ok(CreateTaskRequest {
            title: Some(title),
            description: non_blank(&self.description),
            priority: Some(
                self.priority
                    .map_or_else(String::new, |priority| priority.as_str().to_string()),
            ),
            due_date: self.due_date,
            category: non_blank(&self.category),
        })
    }

    /// Clears every field after a successful create.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Inline edit of an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub category: String,
}

impl From<&TaskResponse> for EditForm {
    fn from(task: &TaskResponse) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            due_date: task.due_date,
            category: task.category.clone().unwrap_or_default(),
        }
    }
}

impl EditForm {
    /// Builds a partial update of the editable fields.
    ///
    /// `completed` is never sent; completion only changes through toggling.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingTitle`] for a blank title.
    pub fn to_request(&self) -> Result<UpdateTaskRequest, FormError> {
        let title = non_blank(&self.title).ok_or(FormError::MissingTitle)?;
        Ok(UpdateTaskRequest {
            title: Some(title),
            description: Some(self.description.trim().to_string()),
            priority: Some(self.priority.as_str().to_string()),
            due_date: self.due_date,
            completed: None,
            category: Some(self.category.trim().to_string()),
        })
    }
}
