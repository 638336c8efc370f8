//! Domain model for task orchestration.
//!
//! Tasks carry an immutable identity, name and deadline alongside the two
//! fields the pipeline mutates: priority (owned by the scheduler) and status
//! (owned by the notifier). Infrastructure concerns stay outside of this
//! boundary.

mod deadline;
mod error;
mod ids;
mod priority;
mod task;

pub use deadline::{DEADLINE_FORMAT, Deadline};
pub use error::{ParseTaskPriorityError, TaskDomainError};
pub use ids::TaskId;
pub use priority::{PrioritySuggestion, TaskPriority};
pub use task::{Task, TaskStatus};
