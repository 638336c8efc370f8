//! Deployment configuration for the concierge.
//!
//! Configuration is read from an optional TOML file and then overridden from
//! environment variables. Every field has a default, so an empty file (or no
//! file) yields a working setup apart from service credentials.
//!
//! ```toml
//! request_timeout_secs = 30
//!
//! [reasoning]
//! model = "gemini-1.5-flash"
//! max_tokens = 200
//!
//! [messaging]
//! channel = "#general"
//!
//! [calendar]
//! calendar_id = "primary"
//! timezone = "UTC"
//!
//! [pipeline]
//! notification_window_hours = 24
//! ```

use crate::task::{
    adapters::http::{
        DEFAULT_CALENDAR_BASE_URL, DEFAULT_CALENDAR_ID, DEFAULT_GEMINI_BASE_URL,
        DEFAULT_GEMINI_MODEL, DEFAULT_SLACK_BASE_URL,
    },
    services::{
        DEFAULT_CALENDAR_TIMEZONE, DEFAULT_MAX_TOKENS, DEFAULT_NOTIFICATION_WINDOW_HOURS,
        DEFAULT_REMINDER_CHANNEL, PipelineSettings,
    },
};
use chrono::TimeDelta;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable carrying the Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable carrying the Slack bot token.
pub const ENV_SLACK_TOKEN: &str = "SLACK_TOKEN";
/// Environment variable naming the reminder channel.
pub const ENV_SLACK_CHANNEL: &str = "SLACK_CHANNEL";
/// Environment variable carrying the Google Calendar access token.
pub const ENV_GOOGLE_CALENDAR_TOKEN: &str = "GOOGLE_CALENDAR_TOKEN";
/// Environment variable naming the target calendar.
pub const ENV_GOOGLE_CALENDAR_ID: &str = "GOOGLE_CALENDAR_ID";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying parse error.
        source: Box<toml::de::Error>,
    },

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConciergeConfig {
    /// Reasoning service settings.
    pub reasoning: ReasoningConfig,
    /// Messaging service settings.
    pub messaging: MessagingConfig,
    /// Calendar service settings.
    pub calendar: CalendarConfig,
    /// Pipeline policy settings.
    pub pipeline: PipelineConfig,
    /// Timeout applied to every outbound HTTP request.
    pub request_timeout_secs: u64,
}

/// Reasoning service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Gemini API key.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// API base URL.
    pub base_url: String,
    /// Completion budget per call.
    pub max_tokens: u32,
}

/// Messaging service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Slack bot token.
    pub token: Option<String>,
    /// Channel receiving reminders.
    pub channel: String,
    /// API base URL.
    pub base_url: String,
}

/// Calendar service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// OAuth access token.
    pub token: Option<String>,
    /// Calendar identifier.
    pub calendar_id: String,
    /// Timezone name attached to calendar blocks.
    pub timezone: String,
    /// API base URL.
    pub base_url: String,
}

/// Pipeline policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Hours before a deadline at which a reminder becomes due.
    pub notification_window_hours: i64,
}

impl Default for ConciergeConfig {
    fn default() -> Self {
        Self {
            reasoning: ReasoningConfig::default(),
            messaging: MessagingConfig::default(),
            calendar: CalendarConfig::default(),
            pipeline: PipelineConfig::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            token: None,
            channel: DEFAULT_REMINDER_CHANNEL.to_owned(),
            base_url: DEFAULT_SLACK_BASE_URL.to_owned(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            token: None,
            calendar_id: DEFAULT_CALENDAR_ID.to_owned(),
            timezone: DEFAULT_CALENDAR_TIMEZONE.to_owned(),
            base_url: DEFAULT_CALENDAR_BASE_URL.to_owned(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            notification_window_hours: DEFAULT_NOTIFICATION_WINDOW_HOURS,
        }
    }
}

impl ConciergeConfig {
    /// Loads configuration from `path` (if given) and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or a
    /// value is out of range.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };
        let config = base.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Applies overrides from a variable lookup (normally the environment).
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = non_empty(ENV_GEMINI_API_KEY) {
            self.reasoning.api_key = Some(api_key);
        }
        if let Some(token) = non_empty(ENV_SLACK_TOKEN) {
            self.messaging.token = Some(token);
        }
        if let Some(channel) = non_empty(ENV_SLACK_CHANNEL) {
            self.messaging.channel = channel;
        }
        if let Some(token) = non_empty(ENV_GOOGLE_CALENDAR_TOKEN) {
            self.calendar.token = Some(token);
        }
        if let Some(calendar_id) = non_empty(ENV_GOOGLE_CALENDAR_ID) {
            self.calendar.calendar_id = calendar_id;
        }
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reasoning.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "reasoning.max_tokens must be positive".to_owned(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_owned(),
            ));
        }
        if self.messaging.channel.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "messaging.channel must not be empty".to_owned(),
            ));
        }
        if TimeDelta::try_hours(self.pipeline.notification_window_hours).is_none() {
            return Err(ConfigError::Invalid(
                "pipeline.notification_window_hours is out of range".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the outbound HTTP request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Derives the pipeline service settings.
    #[must_use]
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            max_tokens: self.reasoning.max_tokens,
            reminder_channel: self.messaging.channel.clone(),
            calendar_timezone: self.calendar.timezone.clone(),
            notification_window: TimeDelta::try_hours(self.pipeline.notification_window_hours)
                .unwrap_or_else(|| TimeDelta::hours(DEFAULT_NOTIFICATION_WINDOW_HOURS)),
        }
    }
}
