//! Port contracts for task orchestration.
//!
//! Ports define infrastructure-agnostic interfaces used by task services:
//! task persistence plus the three external capabilities the pipeline
//! consumes (reasoning, messaging and calendar registration).

pub mod calendar;
pub mod messaging;
pub mod reasoning;
pub mod repository;

pub use calendar::{
    CalendarError, CalendarEventRef, CalendarEventRequest, CalendarResult, CalendarService,
};
pub use messaging::{MessagingError, MessagingResult, MessagingService};
pub use reasoning::{ReasoningError, ReasoningResult, ReasoningService};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
