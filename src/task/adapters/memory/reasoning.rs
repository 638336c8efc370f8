//! Scripted reasoning adapter.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::task::ports::{ReasoningError, ReasoningResult, ReasoningService};

const CURRENT_PRIORITY_PREFIX: &str = "Current Priority:";

/// Deterministic reasoning service.
///
/// Queued responses are returned first, in order. Once the queue is empty the
/// service echoes: a prioritization prompt is answered with the priority it
/// names on its `Current Priority:` line, and any other prompt is answered
/// with the prompt text itself. Every prompt is recorded.
#[derive(Debug, Clone, Default)]
pub struct ScriptedReasoningService {
    state: Arc<RwLock<ScriptedReasoningState>>,
}

#[derive(Debug, Default)]
struct ScriptedReasoningState {
    responses: VecDeque<ReasoningResult<String>>,
    prompts: Vec<String>,
}

impl ScriptedReasoningService {
    /// Creates an echoing service with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a completion to return for the next prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ReasoningError::Transport`] when lock acquisition fails.
    pub fn push_response(&self, text: impl Into<String>) -> ReasoningResult<()> {
        self.push(Ok(text.into()))
    }

    /// Queues a failure to return for the next prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ReasoningError::Transport`] when lock acquisition fails.
    pub fn push_failure(&self, reason: impl Into<String>) -> ReasoningResult<()> {
        self.push(Err(ReasoningError::transport(std::io::Error::other(
            reason.into(),
        ))))
    }

    /// Returns every prompt received so far.
    ///
    /// # Errors
    ///
    /// Returns [`ReasoningError::Transport`] when lock acquisition fails.
    pub fn prompts(&self) -> ReasoningResult<Vec<String>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.prompts.clone())
    }

    fn push(&self, response: ReasoningResult<String>) -> ReasoningResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.responses.push_back(response);
        Ok(())
    }
}

fn lock_error(err: impl std::fmt::Display) -> ReasoningError {
    ReasoningError::transport(std::io::Error::other(err.to_string()))
}

fn echo(prompt: &str) -> String {
    prompt
        .lines()
        .find_map(|line| line.strip_prefix(CURRENT_PRIORITY_PREFIX))
        .map_or_else(|| prompt.to_owned(), |priority| priority.trim().to_owned())
}

#[async_trait]
impl ReasoningService for ScriptedReasoningService {
    async fn complete(&self, prompt: &str, _max_tokens: u32) -> ReasoningResult<String> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.prompts.push(prompt.to_owned());
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Ok(echo(prompt)))
    }
}
