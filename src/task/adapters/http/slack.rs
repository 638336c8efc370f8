//! Slack `chat.postMessage` adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::task::ports::{MessagingError, MessagingResult, MessagingService};

/// Default Slack Web API base URL.
pub const DEFAULT_SLACK_BASE_URL: &str = "https://slack.com/api";

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

/// Messaging service posting through a Slack bot token.
#[derive(Debug, Clone)]
pub struct SlackMessagingService {
    client: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl SlackMessagingService {
    /// Creates an adapter authenticated with a bot `token`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(token: Option<String>, timeout: Duration) -> MessagingResult<Self> {
        let client = super::build_client(timeout).map_err(MessagingError::transport)?;
        Ok(Self {
            client,
            token,
            base_url: DEFAULT_SLACK_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Slack reports most failures with HTTP 200 and `ok: false`.
fn check_response(response: PostMessageResponse) -> MessagingResult<()> {
    if response.ok {
        return Ok(());
    }
    Err(MessagingError::Rejected(
        response.error.unwrap_or_else(|| "unknown_error".to_owned()),
    ))
}

#[async_trait]
impl MessagingService for SlackMessagingService {
    async fn post(&self, channel: &str, text: &str) -> MessagingResult<()> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| MessagingError::NotConfigured("SLACK_TOKEN".to_owned()))?;

        debug!(channel, "Posting Slack message");

        let response = self
            .client
            .post(format!(
                "{}/chat.postMessage",
                self.base_url.trim_end_matches('/')
            ))
            .bearer_auth(token)
            .json(&PostMessageRequest { channel, text })
            .send()
            .await
            .map_err(MessagingError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(channel, status = %status, body = %body, "Slack request failed");
            return Err(MessagingError::Rejected(format!(
                "Slack returned {status}: {body}"
            )));
        }

        let payload: PostMessageResponse =
            response.json().await.map_err(MessagingError::transport)?;
        check_response(payload)
    }
}
