//! Reasoning port: text completion used for prioritization and analysis.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for reasoning service calls.
pub type ReasoningResult<T> = Result<T, ReasoningError>;

/// Text-completion capability.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Completes `prompt`, producing at most `max_tokens` output tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ReasoningError`] when the service is unreachable, rejects the
    /// request or returns no text.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> ReasoningResult<String>;
}

/// Errors returned by reasoning adapters.
#[derive(Debug, Clone, Error)]
pub enum ReasoningError {
    /// The adapter lacks the configuration it needs.
    #[error("reasoning service not configured: {0}")]
    NotConfigured(String),

    /// The service answered with an error status.
    #[error("reasoning service returned {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The service answered without any candidate completion.
    #[error("reasoning service returned no candidate")]
    NoCandidate,

    /// Transport or decoding failure.
    #[error("reasoning transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReasoningError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
