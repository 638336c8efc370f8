//! Task batches submitted from the command line.
//!
//! A batch file is TOML with one `[[task]]` table per submission:
//!
//! ```toml
//! [[task]]
//! name = "Submit Report"
//! deadline = "2025-12-02 17:00"
//! priority = "High"
//! ```
//!
//! `priority` is optional and matched case-insensitively. Deadlines are kept
//! as text so the coordinator reports malformed ones per task.

use crate::task::domain::{ParseTaskPriorityError, TaskPriority};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a batch.
#[derive(Debug, Error)]
pub enum TaskBatchError {
    /// The batch file could not be read.
    #[error("failed to read task batch {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The batch is not valid TOML for this schema.
    #[error("failed to parse task batch: {0}")]
    Parse(#[source] Box<toml::de::Error>),

    /// An entry names an unknown priority.
    #[error("task '{name}': {source}")]
    Priority {
        /// Task name of the offending entry.
        name: String,
        /// Underlying parse error.
        source: ParseTaskPriorityError,
    },
}

/// One submission in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskEntry {
    /// Task name.
    pub name: String,
    /// Deadline text in `YYYY-MM-DD HH:MM` form.
    pub deadline: String,
    /// Optional priority label.
    #[serde(default)]
    pub priority: Option<String>,
}

impl TaskEntry {
    /// Resolves the priority label, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBatchError::Priority`] for labels other than high,
    /// medium or low.
    pub fn priority(&self) -> Result<Option<TaskPriority>, TaskBatchError> {
        self.priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()
            .map_err(|source| TaskBatchError::Priority {
                name: self.name.clone(),
                source,
            })
    }
}

/// Ordered list of submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskBatch {
    #[serde(default, rename = "task")]
    entries: Vec<TaskEntry>,
}

impl TaskBatch {
    /// Parses a batch from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBatchError::Parse`] for malformed documents.
    pub fn from_toml_str(contents: &str) -> Result<Self, TaskBatchError> {
        toml::from_str(contents).map_err(|err| TaskBatchError::Parse(Box::new(err)))
    }

    /// Reads a batch file.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBatchError::Read`] or [`TaskBatchError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, TaskBatchError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TaskBatchError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Returns the built-in demonstration batch.
    #[must_use]
    pub fn sample() -> Self {
        let entry = |name: &str, deadline: &str, priority: &str| TaskEntry {
            name: name.to_owned(),
            deadline: deadline.to_owned(),
            priority: Some(priority.to_owned()),
        };
        Self {
            entries: vec![
                entry("Submit Report", "2025-12-02 17:00", "High"),
                entry("Team Meeting", "2025-12-03 10:00", "Medium"),
                entry("Code Review", "2025-12-05 15:00", "Low"),
                entry("Prepare Presentation", "2025-12-04 09:00", "High"),
            ],
        }
    }

    /// Returns the entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[TaskEntry] {
        &self.entries
    }
}
