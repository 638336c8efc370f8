//! Summary analysis of the task set.

use super::{
    prompts::{self, PromptRenderError},
    scheduler::DEFAULT_MAX_TOKENS,
};
use crate::task::{
    domain::Task,
    ports::{ReasoningError, ReasoningService},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for task analysis.
#[derive(Debug, Error)]
pub enum TaskAnalysisError {
    /// The analysis prompt could not be rendered.
    #[error(transparent)]
    Prompt(#[from] PromptRenderError),
    /// The reasoning service failed.
    #[error(transparent)]
    Reasoning(#[from] ReasoningError),
}

/// Result type for task analysis.
pub type TaskAnalysisResult<T> = Result<T, TaskAnalysisError>;

/// Produces a free-text report over a task list.
#[derive(Clone)]
pub struct TaskAnalyzer<M>
where
    M: ReasoningService,
{
    reasoning: Arc<M>,
    max_tokens: u32,
}

impl<M> TaskAnalyzer<M>
where
    M: ReasoningService,
{
    /// Creates an analyzer using [`DEFAULT_MAX_TOKENS`].
    #[must_use]
    pub const fn new(reasoning: Arc<M>) -> Self {
        Self {
            reasoning,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Sets the completion budget for the report.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Summarizes `tasks` in the given order and returns the service's
    /// response verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAnalysisError`] when the prompt cannot be rendered or the
    /// reasoning call fails.
    pub async fn analyze(&self, tasks: &[Task]) -> TaskAnalysisResult<String> {
        let prompt = prompts::analysis_prompt(tasks)?;
        let report = self.reasoning.complete(&prompt, self.max_tokens).await?;
        info!(task_count = tasks.len(), "Generated task analysis");
        Ok(report)
    }
}
