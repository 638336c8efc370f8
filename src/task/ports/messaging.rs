//! Messaging port: push notifications to a named channel.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for messaging calls.
pub type MessagingResult<T> = Result<T, MessagingError>;

/// Push-notification capability.
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Posts `text` to `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError`] when delivery fails.
    async fn post(&self, channel: &str, text: &str) -> MessagingResult<()>;
}

/// Errors returned by messaging adapters.
#[derive(Debug, Clone, Error)]
pub enum MessagingError {
    /// The adapter lacks the configuration it needs.
    #[error("messaging service not configured: {0}")]
    NotConfigured(String),

    /// The service refused the message.
    #[error("message rejected: {0}")]
    Rejected(String),

    /// Transport or decoding failure.
    #[error("messaging transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessagingError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
