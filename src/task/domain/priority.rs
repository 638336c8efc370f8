//! Task priority levels and validation of externally suggested labels.

use super::ParseTaskPriorityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task urgency level.
///
/// Variants are declared in rank order so the derived ordering matches the
/// pipeline's primary sort key.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TaskPriority {
    /// Needs attention first.
    High,
    /// Default urgency.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl TaskPriority {
    /// All priorities in rank order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Returns the sort rank: High=1, Medium=2, Low=3.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for caller-supplied input (case-insensitive).
impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Outcome of validating a priority label produced by the reasoning service.
///
/// Only the exact labels `High`, `Medium` and `Low` are accepted. Anything
/// else, including other casings and explanatory prose, is rejected so that
/// free text never drives control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrioritySuggestion {
    /// The response named a recognized priority.
    Accepted(TaskPriority),
    /// The response was not a recognized label; carries the raw text.
    Rejected(String),
}

impl PrioritySuggestion {
    /// Parses a raw completion into a typed outcome.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        TaskPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == raw.trim())
            .map_or_else(|| Self::Rejected(raw.to_owned()), Self::Accepted)
    }

    /// Returns the accepted priority, if any.
    #[must_use]
    pub const fn accepted(&self) -> Option<TaskPriority> {
        match self {
            Self::Accepted(priority) => Some(*priority),
            Self::Rejected(_) => None,
        }
    }
}
