//! Task domain model.
//!
//! This module contains the task entity, its value objects, and the
//! pure rules that guard creation and updates. Nothing here performs I/O;
//! identifiers and timestamps are produced at the edges and passed in.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// Assigned by the store when a task is inserted and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generates a new time-ordered `TaskId` (UUID v7).
    ///
    /// **Note**: This is an impure function (side effect: time + random).
    /// Only stores call it, inside their insert operation.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

/// A timestamp wrapper for `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.to_rfc3339())
    }
}

// =============================================================================
// Priority
// =============================================================================

/// The priority level of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Returns the sort rank used for pending task lists.
    ///
    /// Lower ranks come first: high=1, medium=2, low=3.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the capitalized label shown on a task card.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses an optional raw priority, treating absent and empty as `Low`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuleViolation::UnknownPriority`] for any other unknown value.
    pub fn normalize(raw: Option<&str>) -> Result<Self, TaskRuleViolation> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for Priority {
    type Err = TaskRuleViolation;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskRuleViolation::UnknownPriority(value.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// =============================================================================
// Rule Violations
// =============================================================================

/// A broken task invariant, detected before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskRuleViolation {
    #[error("Title is required")]
    MissingTitle,

    #[error("Unknown priority '{0}'. Expected 'low', 'medium' or 'high'")]
    UnknownPriority(String),

    #[error("Task is already completed")]
    AlreadyCompleted,
}

impl TaskRuleViolation {
    /// Returns the request field the violation refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingTitle => "title",
            Self::UnknownPriority(_) => "priority",
            Self::AlreadyCompleted => "completed",
        }
    }
}

/// Validates and trims a title.
///
/// # Errors
///
/// Returns a violation when the title is empty after trimming.
pub fn validate_title(title: &str) -> Result<String, TaskRuleViolation> {
    let title = title.trim();

    if title.is_empty() {
        return Err(TaskRuleViolation::MissingTitle);
    }

    Ok(title.to_string())
}

/// Trims optional free text, collapsing blank input to `None`.
fn normalize_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

// =============================================================================
// Task
// =============================================================================

/// The task entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<Timestamp>,
    pub completed: bool,
    /// Display-only label.
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Materializes a normalized creation request into a stored record.
    ///
    /// This is a pure function; the store supplies the id and timestamp.
    #[must_use]
    pub fn from_new(task_id: TaskId, new_task: NewTask, timestamp: Timestamp) -> Self {
        Self {
            task_id,
            title: new_task.title,
            description: new_task.description,
            priority: new_task.priority,
            due_date: new_task.due_date,
            completed: false,
            category: new_task.category,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Merges a partial update into this task.
    ///
    /// Fields absent from the patch keep their previous values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRuleViolation::AlreadyCompleted`] when the patch asks to
    /// complete a task that is already complete. A redundant completion is a
    /// domain error, not an idempotent success.
    pub fn apply(self, patch: TaskPatch, now: Timestamp) -> Result<Self, TaskRuleViolation> {
        if patch.completed == Some(true) && self.completed {
            return Err(TaskRuleViolation::AlreadyCompleted);
        }

        let TaskPatch {
            title,
            description,
            priority,
            due_date,
            completed,
            category,
        } = patch;

        Ok(Self {
            title: title.unwrap_or(self.title),
            description: description.unwrap_or(self.description),
            priority: priority.unwrap_or(self.priority),
            due_date: due_date.unwrap_or(self.due_date),
            completed: completed.unwrap_or(self.completed),
            category: category.unwrap_or(self.category),
            updated_at: now,
            ..self
        })
    }
}

// =============================================================================
// Creation Input
// =============================================================================

/// Raw creation fields as they arrive from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
    pub category: Option<String>,
}

/// Creation input after normalization: every default has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<Timestamp>,
    pub category: Option<String>,
}

impl NewTask {
    /// Validates raw fields and applies every default in one place.
    ///
    /// # Errors
    ///
    /// Returns a violation when the title is missing or empty,
    /// or when the priority is not one of the known levels.
    pub fn normalize(fields: TaskFields) -> Result<Self, TaskRuleViolation> {
        let title = validate_title(fields.title.as_deref().unwrap_or_default())?;
        let priority = Priority::normalize(fields.priority.as_deref())?;

        Ok(Self {
            title,
            description: normalize_text(fields.description.as_deref()),
            priority,
            due_date: fields.due_date,
            category: normalize_text(fields.category.as_deref()),
        })
    }
}

// =============================================================================
// Partial Update
// =============================================================================

/// Raw update fields. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFieldsPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Timestamp>,
    pub completed: Option<bool>,
    pub category: Option<String>,
}

/// A validated partial update.
///
/// The nested options on the clearable fields distinguish "unchanged"
/// (`None`) from "cleared" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<Timestamp>>,
    pub completed: Option<bool>,
    pub category: Option<Option<String>>,
}

impl TaskPatch {
    /// A patch that only sets the completion flag.
    #[must_use]
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Validates raw update fields.
    ///
    /// A present title runs through the same validation as on creation; a
    /// blank description or category clears the field; a blank priority
    /// falls back to `low`.
    ///
    /// # Errors
    ///
    /// Returns a violation for an empty title or an unknown priority.
    pub fn normalize(fields: TaskFieldsPatch) -> Result<Self, TaskRuleViolation> {
        let title = fields.title.as_deref().map(validate_title).transpose()?;
        let priority = fields
            .priority
            .as_deref()
            .map(|raw| Priority::normalize(Some(raw)))
            .transpose()?;

        Ok(Self {
            title,
            description: fields
                .description
                .as_deref()
                .map(|text| normalize_text(Some(text))),
            priority,
            due_date: fields.due_date.map(Some),
            completed: fields.completed,
            category: fields
                .category
                .as_deref()
                .map(|text| normalize_text(Some(text))),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
