//! In-memory adapters for tests and local deterministic runs.

mod calendar;
mod messaging;
mod reasoning;
mod task;

pub use calendar::InMemoryCalendarService;
pub use messaging::{PostedMessage, RecordingMessagingService};
pub use reasoning::ScriptedReasoningService;
pub use task::InMemoryTaskRepository;
