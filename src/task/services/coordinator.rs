//! End-to-end pipeline: collect, prioritize, notify, analyze, report.

use super::{
    DEFAULT_CALENDAR_TIMEZONE, DEFAULT_MAX_TOKENS, DEFAULT_REMINDER_CHANNEL, ReminderNotifier,
    SubmitTaskRequest, TaskAnalysisError, TaskAnalyzer, TaskCollector, TaskCollectorError,
    TaskScheduler, TaskSchedulerError,
};
use crate::task::{
    domain::{Deadline, Task, TaskDomainError, TaskId, TaskPriority},
    ports::{CalendarService, MessagingService, ReasoningService, TaskRepository},
};
use chrono::TimeDelta;
use mockable::Clock;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Default distance from a deadline at which reminders are sent.
pub const DEFAULT_NOTIFICATION_WINDOW_HOURS: i64 = 24;

/// Tunables shared by the pipeline services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Completion budget for every reasoning call.
    pub max_tokens: u32,
    /// Messaging channel for reminders.
    pub reminder_channel: String,
    /// Timezone name attached to calendar blocks.
    pub calendar_timezone: String,
    /// Tasks whose deadline is at most this far away are due.
    pub notification_window: TimeDelta,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            reminder_channel: DEFAULT_REMINDER_CHANNEL.to_owned(),
            calendar_timezone: DEFAULT_CALENDAR_TIMEZONE.to_owned(),
            notification_window: TimeDelta::hours(DEFAULT_NOTIFICATION_WINDOW_HOURS),
        }
    }
}

/// External capabilities consumed by the pipeline.
pub struct PipelineCapabilities<R, K, M, S, C> {
    /// Task storage.
    pub repository: Arc<R>,
    /// Calendar registration.
    pub calendar: Arc<K>,
    /// Text completion.
    pub reasoning: Arc<M>,
    /// Reminder delivery.
    pub messaging: Arc<S>,
    /// Time source.
    pub clock: Arc<C>,
}

/// Service-level errors for pipeline coordination.
#[derive(Debug, Error)]
pub enum TaskCoordinatorError {
    /// The submission was malformed.
    #[error(transparent)]
    Input(#[from] TaskDomainError),
    /// Task collection or storage failed.
    #[error(transparent)]
    Collector(#[from] TaskCollectorError),
    /// Prioritization failed.
    #[error(transparent)]
    Scheduler(#[from] TaskSchedulerError),
    /// The summary analysis failed.
    #[error(transparent)]
    Analysis(#[from] TaskAnalysisError),
}

/// Result type for pipeline coordination.
pub type TaskCoordinatorResult<T> = Result<T, TaskCoordinatorError>;

/// Owns the submission queue and drives pipeline runs.
///
/// The queue holds task identifiers; task state lives in the collector's
/// repository, so every component observes the same priority and status.
pub struct TaskCoordinator<R, K, M, S, C>
where
    R: TaskRepository,
    K: CalendarService,
    M: ReasoningService,
    S: MessagingService,
    C: Clock + Send + Sync,
{
    collector: TaskCollector<R, K, C>,
    scheduler: TaskScheduler<M>,
    notifier: ReminderNotifier<S>,
    analyzer: TaskAnalyzer<M>,
    clock: Arc<C>,
    notification_window: TimeDelta,
    queue: Mutex<VecDeque<TaskId>>,
}

impl<R, K, M, S, C> TaskCoordinator<R, K, M, S, C>
where
    R: TaskRepository,
    K: CalendarService,
    M: ReasoningService,
    S: MessagingService,
    C: Clock + Send + Sync,
{
    /// Wires the pipeline services from their capabilities.
    #[must_use]
    pub fn new(
        capabilities: PipelineCapabilities<R, K, M, S, C>,
        settings: PipelineSettings,
    ) -> Self {
        let PipelineCapabilities {
            repository,
            calendar,
            reasoning,
            messaging,
            clock,
        } = capabilities;

        Self {
            collector: TaskCollector::new(repository, calendar, Arc::clone(&clock))
                .with_timezone(settings.calendar_timezone),
            scheduler: TaskScheduler::new(Arc::clone(&reasoning))
                .with_max_tokens(settings.max_tokens),
            notifier: ReminderNotifier::new(messaging, settings.reminder_channel),
            analyzer: TaskAnalyzer::new(reasoning).with_max_tokens(settings.max_tokens),
            clock,
            notification_window: settings.notification_window,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Parses and collects a task, then queues it for the next run.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCoordinatorError::Input`] when `deadline_text` is not
    /// `YYYY-MM-DD HH:MM` or the name is blank; nothing is queued. Storage
    /// failures surface as [`TaskCoordinatorError::Collector`].
    pub async fn submit_task(
        &self,
        name: impl Into<String>,
        deadline_text: &str,
        priority: Option<TaskPriority>,
    ) -> TaskCoordinatorResult<Task> {
        let deadline = Deadline::parse(deadline_text)?;
        let mut request = SubmitTaskRequest::new(name, deadline);
        if let Some(level) = priority {
            request = request.with_priority(level);
        }

        let task = self.collector.submit(request).await.map_err(|err| match err {
            TaskCollectorError::Domain(domain) => TaskCoordinatorError::Input(domain),
            other @ TaskCollectorError::Repository(_) => TaskCoordinatorError::Collector(other),
        })?;
        self.queue.lock().await.push_back(task.id());
        Ok(task)
    }

    /// Runs one pipeline pass over the queued tasks and returns the report.
    ///
    /// Due tasks (pending, deadline within the notification window of the
    /// run's start, overdue included) get one reminder each. Processed tasks
    /// leave the queue only once the report has been produced.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCoordinatorError`] when storage, prompt rendering or the
    /// analysis call fails. Reminder failures are logged, not raised.
    pub async fn run(&self) -> TaskCoordinatorResult<String> {
        let now = self.clock.utc();
        let queued: Vec<TaskId> = self.queue.lock().await.iter().copied().collect();
        info!(task_count = queued.len(), "Starting pipeline run");

        let loaded = self.collector.load(&queued).await?;
        let mut tasks = self.scheduler.prioritize(loaded).await?;
        for task in &tasks {
            self.collector.save(task).await?;
        }

        for task in &mut tasks {
            if !task.is_due(now, self.notification_window) {
                debug!(task_id = %task.id(), "Task not due");
                continue;
            }
            if self.notifier.notify(task).await.is_delivered() {
                self.collector.save(task).await?;
            }
        }

        let report = self.analyzer.analyze(&tasks).await?;

        let processed: HashSet<TaskId> = queued.into_iter().collect();
        self.queue.lock().await.retain(|id| !processed.contains(id));
        info!("Pipeline run complete");
        Ok(report)
    }

    /// Returns the number of tasks waiting for the next run.
    pub async fn queue_len(&self) -> usize {
        self.queue.lock().await.len()
    }

    /// Returns every collected task in submission order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCoordinatorError::Collector`] when storage lookup fails.
    pub async fn list_tasks(&self) -> TaskCoordinatorResult<Vec<Task>> {
        Ok(self.collector.list_tasks().await?)
    }
}
