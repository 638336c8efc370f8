//! Task collection: creation, calendar registration and ordered storage.

use crate::task::{
    domain::{Deadline, Task, TaskDomainError, TaskId, TaskPriority},
    ports::{CalendarEventRequest, CalendarService, TaskRepository, TaskRepositoryError},
};
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Default timezone for calendar blocks.
pub const DEFAULT_CALENDAR_TIMEZONE: &str = "UTC";

/// Request payload for collecting a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTaskRequest {
    name: String,
    deadline: Deadline,
    priority: Option<TaskPriority>,
}

impl SubmitTaskRequest {
    /// Creates a request with the default priority.
    #[must_use]
    pub fn new(name: impl Into<String>, deadline: Deadline) -> Self {
        Self {
            name: name.into(),
            deadline,
            priority: None,
        }
    }

    /// Sets an explicit priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Service-level errors for task collection.
#[derive(Debug, Error)]
pub enum TaskCollectorError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task collection operations.
pub type TaskCollectorResult<T> = Result<T, TaskCollectorError>;

/// Accepts task submissions and owns the canonical task list.
///
/// Each accepted task gets a one-hour calendar block starting at its
/// deadline. Calendar failures are logged and never fail the submission.
#[derive(Clone)]
pub struct TaskCollector<R, K, C>
where
    R: TaskRepository,
    K: CalendarService,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    calendar: Arc<K>,
    clock: Arc<C>,
    timezone: String,
}

impl<R, K, C> TaskCollector<R, K, C>
where
    R: TaskRepository,
    K: CalendarService,
    C: Clock + Send + Sync,
{
    /// Creates a collector registering calendar blocks in UTC.
    #[must_use]
    pub fn new(repository: Arc<R>, calendar: Arc<K>, clock: Arc<C>) -> Self {
        Self {
            repository,
            calendar,
            clock,
            timezone: DEFAULT_CALENDAR_TIMEZONE.to_owned(),
        }
    }

    /// Sets the timezone name attached to calendar blocks.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Creates, stores and schedules a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectorError::Domain`] when the name is blank, or
    /// [`TaskCollectorError::Repository`] when storage fails.
    pub async fn submit(&self, request: SubmitTaskRequest) -> TaskCollectorResult<Task> {
        let task = Task::new(
            request.name,
            request.deadline,
            request.priority.unwrap_or_default(),
            &*self.clock,
        )?;
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), task_name = task.name(), "Added task");

        self.register_calendar_block(&task).await;
        Ok(task)
    }

    /// Returns every collected task in submission order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectorError::Repository`] when storage lookup fails.
    pub async fn list_tasks(&self) -> TaskCollectorResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Loads the current state of the given tasks, preserving `ids` order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when an identifier has no
    /// stored task.
    pub async fn load(&self, ids: &[TaskId]) -> TaskCollectorResult<Vec<Task>> {
        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            let task = self
                .repository
                .find_by_id(*id)
                .await?
                .ok_or(TaskRepositoryError::NotFound(*id))?;
            tasks.push(task);
        }
        Ok(tasks)
    }

    /// Writes back priority and status changes for a collected task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectorError::Repository`] when the task is unknown or
    /// storage fails.
    pub async fn save(&self, task: &Task) -> TaskCollectorResult<()> {
        Ok(self.repository.update(task).await?)
    }

    async fn register_calendar_block(&self, task: &Task) {
        let start = task.deadline().as_datetime();
        let request = CalendarEventRequest {
            title: task.name().to_owned(),
            start,
            end: start + TimeDelta::hours(1),
            timezone: self.timezone.clone(),
        };

        match self.calendar.create_event(&request).await {
            Ok(event) => info!(
                task_id = %task.id(),
                event_id = %event.id,
                link = event.link.as_deref().unwrap_or_default(),
                "Calendar event created"
            ),
            Err(err) => warn!(
                task_id = %task.id(),
                error = %err,
                "Calendar registration failed; task kept"
            ),
        }
    }
}
