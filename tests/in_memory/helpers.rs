//! Shared test helpers for in-memory pipeline integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use concierge::task::{
    adapters::memory::{
        InMemoryCalendarService, InMemoryTaskRepository, RecordingMessagingService,
        ScriptedReasoningService,
    },
    domain::DEADLINE_FORMAT,
    services::{PipelineCapabilities, PipelineSettings, TaskCoordinator},
};
use mockable::Clock;
use rstest::fixture;
use std::sync::Arc;

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Coordinator wired entirely to in-memory adapters.
pub type MemoryCoordinator = TaskCoordinator<
    InMemoryTaskRepository,
    InMemoryCalendarService,
    ScriptedReasoningService,
    RecordingMessagingService,
    FixedClock,
>;

/// Coordinator plus handles on its observable adapters.
pub struct Pipeline {
    /// Instant the pipeline clock is frozen at.
    pub now: DateTime<Utc>,
    /// Reasoning double.
    pub reasoning: Arc<ScriptedReasoningService>,
    /// Messaging double.
    pub messaging: Arc<RecordingMessagingService>,
    /// Calendar double.
    pub calendar: Arc<InMemoryCalendarService>,
    /// Coordinator under test.
    pub coordinator: MemoryCoordinator,
}

impl Pipeline {
    /// Builds a pipeline frozen at `now` with the given settings.
    #[must_use]
    pub fn at(now: DateTime<Utc>, settings: PipelineSettings) -> Self {
        let reasoning = Arc::new(ScriptedReasoningService::new());
        let messaging = Arc::new(RecordingMessagingService::new());
        let calendar = Arc::new(InMemoryCalendarService::new());
        let coordinator = TaskCoordinator::new(
            PipelineCapabilities {
                repository: Arc::new(InMemoryTaskRepository::new()),
                calendar: Arc::clone(&calendar),
                reasoning: Arc::clone(&reasoning),
                messaging: Arc::clone(&messaging),
                clock: Arc::new(FixedClock(now)),
            },
            settings,
        );
        Self {
            now,
            reasoning,
            messaging,
            calendar,
            coordinator,
        }
    }

    /// Formats a deadline `offset` away from the pipeline clock.
    #[must_use]
    pub fn deadline_in(&self, offset: TimeDelta) -> String {
        (self.now + offset).format(DEADLINE_FORMAT).to_string()
    }
}

/// 2025-12-01 12:00 UTC.
#[fixture]
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Provides a pipeline with default settings.
#[fixture]
pub fn pipeline(now: DateTime<Utc>) -> Pipeline {
    Pipeline::at(now, PipelineSettings::default())
}
