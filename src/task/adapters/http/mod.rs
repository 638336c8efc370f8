//! HTTP adapters for the external capabilities.
//!
//! - [`GeminiReasoningService`] calls the Gemini `generateContent` endpoint.
//! - [`SlackMessagingService`] calls Slack `chat.postMessage`.
//! - [`GoogleCalendarService`] calls Google Calendar `events.insert`.
//!
//! Each adapter owns a `reqwest::Client` built with the configured request
//! timeout. Credentials are opaque strings taken from configuration.

mod gemini;
mod google_calendar;
mod slack;

pub use gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeminiReasoningService};
pub use google_calendar::{DEFAULT_CALENDAR_BASE_URL, DEFAULT_CALENDAR_ID, GoogleCalendarService};
pub use slack::{DEFAULT_SLACK_BASE_URL, SlackMessagingService};

use std::time::Duration;

fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}
