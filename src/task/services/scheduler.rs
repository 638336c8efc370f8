//! Task prioritization driven by the reasoning service.

use super::prompts::{self, PromptRenderError};
use crate::task::{
    domain::{PrioritySuggestion, Task},
    ports::ReasoningService,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default completion budget for reasoning calls.
pub const DEFAULT_MAX_TOKENS: u32 = 200;

/// Service-level errors for prioritization.
#[derive(Debug, Error)]
pub enum TaskSchedulerError {
    /// A prompt could not be rendered.
    #[error(transparent)]
    Prompt(#[from] PromptRenderError),
}

/// Result type for prioritization.
pub type TaskSchedulerResult<T> = Result<T, TaskSchedulerError>;

/// Reprioritizes tasks with suggestions from the reasoning service.
#[derive(Clone)]
pub struct TaskScheduler<M>
where
    M: ReasoningService,
{
    reasoning: Arc<M>,
    max_tokens: u32,
}

impl<M> TaskScheduler<M>
where
    M: ReasoningService,
{
    /// Creates a scheduler using [`DEFAULT_MAX_TOKENS`].
    #[must_use]
    pub const fn new(reasoning: Arc<M>) -> Self {
        Self {
            reasoning,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Sets the completion budget per suggestion.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Applies a suggested priority to each task, then sorts by urgency.
    ///
    /// Tasks are consulted one at a time. Suggestions outside `High`,
    /// `Medium` and `Low`, and failed reasoning calls, leave the task's
    /// priority unchanged. The returned list holds exactly the input tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSchedulerError::Prompt`] when a prompt cannot be
    /// rendered.
    pub async fn prioritize(&self, mut tasks: Vec<Task>) -> TaskSchedulerResult<Vec<Task>> {
        for task in &mut tasks {
            let prompt = prompts::priority_prompt(task)?;
            match self.reasoning.complete(&prompt, self.max_tokens).await {
                Ok(raw) => apply_suggestion(task, &raw),
                Err(err) => warn!(
                    task_id = %task.id(),
                    error = %err,
                    "Priority suggestion failed; keeping current priority"
                ),
            }
        }

        sort_by_urgency(&mut tasks);
        info!(task_count = tasks.len(), "Tasks prioritized");
        Ok(tasks)
    }
}

fn apply_suggestion(task: &mut Task, raw: &str) {
    match PrioritySuggestion::parse(raw) {
        PrioritySuggestion::Accepted(priority) => {
            if priority != task.priority() {
                debug!(
                    task_id = %task.id(),
                    from = %task.priority(),
                    to = %priority,
                    "Priority changed"
                );
            }
            task.reprioritize(priority);
        }
        PrioritySuggestion::Rejected(text) => debug!(
            task_id = %task.id(),
            suggestion = %text,
            "Ignoring unrecognized priority suggestion"
        ),
    }
}

/// Stable sort by priority rank, then deadline.
pub fn sort_by_urgency(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.priority().rank(), task.deadline()));
}
