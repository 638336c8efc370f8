//! Recording messaging adapter.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::ports::{MessagingError, MessagingResult, MessagingService};

/// Message accepted by [`RecordingMessagingService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    /// Target channel.
    pub channel: String,
    /// Message text.
    pub text: String,
}

/// Messaging service that records posts instead of delivering them.
///
/// Posts whose text contains a configured failure marker are rejected and not
/// recorded.
#[derive(Debug, Clone, Default)]
pub struct RecordingMessagingService {
    state: Arc<RwLock<RecordingMessagingState>>,
}

#[derive(Debug, Default)]
struct RecordingMessagingState {
    posted: Vec<PostedMessage>,
    attempts: usize,
    failure_markers: Vec<String>,
}

impl RecordingMessagingService {
    /// Creates a service that accepts every post.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any later post whose text contains `marker`.
    ///
    /// An empty marker rejects every post.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Transport`] when lock acquisition fails.
    pub fn fail_when_text_contains(&self, marker: impl Into<String>) -> MessagingResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failure_markers.push(marker.into());
        Ok(())
    }

    /// Returns the successfully posted messages in delivery order.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Transport`] when lock acquisition fails.
    pub fn posted(&self) -> MessagingResult<Vec<PostedMessage>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.posted.clone())
    }

    /// Returns the number of post attempts, including rejected ones.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Transport`] when lock acquisition fails.
    pub fn attempts(&self) -> MessagingResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.attempts)
    }
}

fn lock_error(err: impl std::fmt::Display) -> MessagingError {
    MessagingError::transport(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl MessagingService for RecordingMessagingService {
    async fn post(&self, channel: &str, text: &str) -> MessagingResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.attempts += 1;
        if state
            .failure_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()))
        {
            return Err(MessagingError::Rejected("channel_not_found".to_owned()));
        }

        state.posted.push(PostedMessage {
            channel: channel.to_owned(),
            text: text.to_owned(),
        });
        Ok(())
    }
}
