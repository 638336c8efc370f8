//! Calendar port: registering time blocks for task deadlines.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for calendar calls.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Event registration capability.
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Creates an event and returns a reference to it.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] when the event cannot be registered.
    async fn create_event(&self, request: &CalendarEventRequest)
    -> CalendarResult<CalendarEventRef>;
}

/// Event to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventRequest {
    /// Event title.
    pub title: String,
    /// Event start.
    pub start: DateTime<Utc>,
    /// Event end.
    pub end: DateTime<Utc>,
    /// IANA timezone name the calendar should display the event in.
    pub timezone: String,
}

/// Reference to a registered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventRef {
    /// Provider-assigned event identifier.
    pub id: String,
    /// Link to the event, when the provider returns one.
    pub link: Option<String>,
}

/// Errors returned by calendar adapters.
#[derive(Debug, Clone, Error)]
pub enum CalendarError {
    /// The adapter lacks the configuration it needs.
    #[error("calendar service not configured: {0}")]
    NotConfigured(String),

    /// The service refused the event.
    #[error("calendar returned {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Transport or decoding failure.
    #[error("calendar transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl CalendarError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
