//! Task deadline parsing and presentation.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Textual deadline format accepted at submission (24-hour clock, UTC).
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Point in time by which a task is due.
///
/// Deadlines are supplied as [`DEADLINE_FORMAT`] text and interpreted as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    /// Parses a deadline from `YYYY-MM-DD HH:MM` text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDeadline`] when the text does not
    /// match the format or names an impossible date such as month 13.
    pub fn parse(input: &str) -> Result<Self, TaskDomainError> {
        let invalid = |reason: String| TaskDomainError::InvalidDeadline {
            input: input.to_owned(),
            reason,
        };
        // Exactly one space separates the date from the time.
        let (date_text, time_text) = input
            .split_once(' ')
            .filter(|(date, time)| {
                !date.contains(char::is_whitespace) && !time.contains(char::is_whitespace)
            })
            .ok_or_else(|| {
                invalid("expected a date and a time separated by one space".to_owned())
            })?;

        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
            .map_err(|err| invalid(err.to_string()))?;
        let time = NaiveTime::parse_from_str(time_text, TIME_FORMAT)
            .map_err(|err| invalid(err.to_string()))?;
        Ok(Self(date.and_time(time).and_utc()))
    }

    /// Wraps an existing UTC timestamp.
    #[must_use]
    pub const fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    /// Returns the deadline timestamp.
    #[must_use]
    pub const fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the time remaining until the deadline, negative when overdue.
    #[must_use]
    pub fn remaining_from(self, now: DateTime<Utc>) -> TimeDelta {
        self.0.signed_duration_since(now)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DEADLINE_FORMAT))
    }
}
