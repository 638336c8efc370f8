//! Task aggregate root and notification status.

use super::{Deadline, TaskDomainError, TaskId, TaskPriority};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task notification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// No reminder has been delivered yet.
    Pending,
    /// A reminder has been delivered.
    Notified,
    /// Work has finished. Set by workflows outside the pipeline.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Notified => "Notified",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    deadline: Deadline,
    priority: TaskPriority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        deadline: Deadline,
        priority: TaskPriority,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_name = name.into();
        if raw_name.trim().is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }

        Ok(Self {
            id: TaskId::new(),
            name: raw_name,
            deadline,
            priority,
            status: TaskStatus::Pending,
            created_at: clock.utc(),
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task deadline.
    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Returns the current priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the current notification status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the task priority.
    pub const fn reprioritize(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Records that a reminder has been delivered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the task is
    /// still pending.
    pub fn mark_notified(&mut self) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::Pending {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: TaskStatus::Notified,
            });
        }
        self.status = TaskStatus::Notified;
        Ok(())
    }

    /// Returns `true` when the task is pending and its deadline falls within
    /// `window` of `now`. Overdue tasks are due.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        self.status == TaskStatus::Pending && self.deadline.remaining_from(now) <= window
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Priority: {} | Deadline: {} | Status: {}",
            self.name, self.priority, self.deadline, self.status
        )
    }
}
