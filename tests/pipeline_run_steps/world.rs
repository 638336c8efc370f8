//! Shared world state for pipeline run BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use concierge::task::{
    adapters::memory::{
        InMemoryCalendarService, InMemoryTaskRepository, RecordingMessagingService,
        ScriptedReasoningService,
    },
    domain::Task,
    services::{PipelineCapabilities, PipelineSettings, TaskCoordinator, TaskCoordinatorError},
};
use mockable::Clock;
use rstest::fixture;

/// Clock frozen at the scenario start time.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioClock(pub DateTime<Utc>);

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Coordinator type used by the BDD world.
pub type TestCoordinator = TaskCoordinator<
    InMemoryTaskRepository,
    InMemoryCalendarService,
    ScriptedReasoningService,
    RecordingMessagingService,
    ScenarioClock,
>;

/// Scenario world for pipeline run behaviour tests.
pub struct PipelineWorld {
    pub now: DateTime<Utc>,
    pub reasoning: Arc<ScriptedReasoningService>,
    pub messaging: Arc<RecordingMessagingService>,
    pub coordinator: TestCoordinator,
    pub last_submission: Option<Result<Task, TaskCoordinatorError>>,
    pub last_report: Option<String>,
}

impl PipelineWorld {
    /// Creates a world frozen at 2025-12-01 12:00 UTC.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc
            .with_ymd_and_hms(2025, 12, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();
        let reasoning = Arc::new(ScriptedReasoningService::new());
        let messaging = Arc::new(RecordingMessagingService::new());
        let coordinator = TaskCoordinator::new(
            PipelineCapabilities {
                repository: Arc::new(InMemoryTaskRepository::new()),
                calendar: Arc::new(InMemoryCalendarService::new()),
                reasoning: Arc::clone(&reasoning),
                messaging: Arc::clone(&messaging),
                clock: Arc::new(ScenarioClock(now)),
            },
            PipelineSettings::default(),
        );

        Self {
            now,
            reasoning,
            messaging,
            coordinator,
            last_submission: None,
            last_report: None,
        }
    }

    /// Looks up a stored task by name.
    ///
    /// # Errors
    ///
    /// Returns an error when listing fails or no task has `name`.
    pub fn task_named(&self, name: &str) -> Result<Task, eyre::Report> {
        let tasks = run_async(self.coordinator.list_tasks())?;
        tasks
            .into_iter()
            .find(|task| task.name() == name)
            .ok_or_else(|| eyre::eyre!("no task named {name}"))
    }
}

impl Default for PipelineWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PipelineWorld {
    PipelineWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
