//! Application services for the task orchestration pipeline.

mod analyzer;
mod collector;
mod coordinator;
mod notifier;
mod prompts;
mod scheduler;

pub use analyzer::{TaskAnalysisError, TaskAnalysisResult, TaskAnalyzer};
pub use collector::{
    DEFAULT_CALENDAR_TIMEZONE, SubmitTaskRequest, TaskCollector, TaskCollectorError,
    TaskCollectorResult,
};
pub use coordinator::{
    DEFAULT_NOTIFICATION_WINDOW_HOURS, PipelineCapabilities, PipelineSettings, TaskCoordinator,
    TaskCoordinatorError, TaskCoordinatorResult,
};
pub use notifier::{DEFAULT_REMINDER_CHANNEL, NotificationOutcome, ReminderNotifier};
pub use prompts::PromptRenderError;
pub use scheduler::{
    DEFAULT_MAX_TOKENS, TaskScheduler, TaskSchedulerError, TaskSchedulerResult, sort_by_urgency,
};
