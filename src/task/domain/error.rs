//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The deadline text does not match `YYYY-MM-DD HH:MM`.
    #[error("invalid deadline '{input}', expected YYYY-MM-DD HH:MM: {reason}")]
    InvalidDeadline {
        /// The rejected deadline text.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The task status cannot move to the requested status.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Error returned while parsing a priority label supplied by a caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
