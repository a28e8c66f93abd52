//! Domain module for task management.
//!
//! This module contains the task entity, its value objects, and the pure
//! rules applied before anything touches the store.

pub mod task;

pub use task::{
    NewTask, Priority, Task, TaskFields, TaskFieldsPatch, TaskId, TaskPatch,
    TaskRuleViolation, Timestamp, validate_title,
};
