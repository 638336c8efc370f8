//! Google Calendar `events.insert` adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::task::ports::{
    CalendarError, CalendarEventRef, CalendarEventRequest, CalendarResult, CalendarService,
};

/// Default Google Calendar API base URL.
pub const DEFAULT_CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Default calendar identifier.
pub const DEFAULT_CALENDAR_ID: &str = "primary";

#[derive(Debug, Serialize)]
struct EventBody<'a> {
    summary: &'a str,
    start: EventTime<'a>,
    end: EventTime<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime<'a> {
    date_time: String,
    time_zone: &'a str,
}

impl<'a> EventTime<'a> {
    fn new(at: DateTime<Utc>, time_zone: &'a str) -> Self {
        Self {
            date_time: at.to_rfc3339(),
            time_zone,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventResponse {
    id: String,
    html_link: Option<String>,
}

impl From<EventResponse> for CalendarEventRef {
    fn from(response: EventResponse) -> Self {
        Self {
            id: response.id,
            link: response.html_link,
        }
    }
}

/// Calendar service backed by the Google Calendar API.
#[derive(Debug, Clone)]
pub struct GoogleCalendarService {
    client: reqwest::Client,
    token: Option<String>,
    calendar_id: String,
    base_url: String,
}

impl GoogleCalendarService {
    /// Creates an adapter for `calendar_id` authenticated with an OAuth
    /// access `token`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(
        token: Option<String>,
        calendar_id: impl Into<String>,
        timeout: Duration,
    ) -> CalendarResult<Self> {
        let client = super::build_client(timeout).map_err(CalendarError::transport)?;
        Ok(Self {
            client,
            token,
            calendar_id: calendar_id.into(),
            base_url: DEFAULT_CALENDAR_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/calendars/{}/events",
            self.base_url.trim_end_matches('/'),
            self.calendar_id
        )
    }
}

fn event_body(request: &CalendarEventRequest) -> EventBody<'_> {
    EventBody {
        summary: &request.title,
        start: EventTime::new(request.start, &request.timezone),
        end: EventTime::new(request.end, &request.timezone),
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarService {
    async fn create_event(
        &self,
        request: &CalendarEventRequest,
    ) -> CalendarResult<CalendarEventRef> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| CalendarError::NotConfigured("GOOGLE_CALENDAR_TOKEN".to_owned()))?;

        debug!(calendar_id = %self.calendar_id, title = %request.title, "Creating calendar event");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(token)
            .json(&event_body(request))
            .send()
            .await
            .map_err(CalendarError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(calendar_id = %self.calendar_id, status = %status, "Calendar request failed");
            return Err(CalendarError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let event: EventResponse = response.json().await.map_err(CalendarError::transport)?;
        Ok(event.into())
    }
}
