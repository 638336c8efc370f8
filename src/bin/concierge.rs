//! Submits a batch of tasks, runs one pipeline pass and prints the summary.
//!
//! Usage:
//!
//! ```text
//! concierge [tasks-path] [config-path]
//! ```
//!
//! `tasks-path` is a TOML task batch (see [`concierge::batch`]); without it
//! the built-in demonstration batch is used. `config-path` is an optional
//! [`ConciergeConfig`] file. Credentials are read from `GEMINI_API_KEY`,
//! `SLACK_TOKEN` and `GOOGLE_CALENDAR_TOKEN`; log verbosity follows
//! `RUST_LOG` and defaults to `concierge=info`.

use concierge::batch::TaskBatch;
use concierge::config::ConciergeConfig;
use concierge::task::{
    adapters::{
        http::{GeminiReasoningService, GoogleCalendarService, SlackMessagingService},
        memory::InMemoryTaskRepository,
    },
    services::{PipelineCapabilities, TaskCoordinator},
};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "concierge=info";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type LiveCoordinator = TaskCoordinator<
    InMemoryTaskRepository,
    GoogleCalendarService,
    GeminiReasoningService,
    SlackMessagingService,
    DefaultClock,
>;

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
}

#[derive(Debug, Default)]
struct CliArgs {
    tasks_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    let args = parse_args(std::env::args_os().skip(1).map(PathBuf::from))?;
    let config = ConciergeConfig::load(args.config_path.as_deref())?;
    let batch = match args.tasks_path.as_deref() {
        Some(path) => TaskBatch::from_file(path)?,
        None => TaskBatch::sample(),
    };

    let coordinator = build_coordinator(&config)?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    let report = runtime.block_on(async {
        submit_batch(&coordinator, &batch).await;
        coordinator.run().await
    })?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "\n--- Executive Task Summary ---")?;
    writeln!(stdout, "{report}")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_args(mut args: impl Iterator<Item = PathBuf>) -> Result<CliArgs, CliError> {
    let parsed = CliArgs {
        tasks_path: args.next(),
        config_path: args.next(),
    };
    if let Some(extra) = args.next() {
        return Err(CliError::InvalidArgs(format!(
            "unexpected extra argument: {}",
            extra.display()
        )));
    }
    Ok(parsed)
}

fn build_coordinator(config: &ConciergeConfig) -> Result<LiveCoordinator, BoxError> {
    let timeout = config.request_timeout();
    let reasoning = GeminiReasoningService::new(
        config.reasoning.api_key.clone(),
        config.reasoning.model.clone(),
        timeout,
    )?
    .with_base_url(config.reasoning.base_url.clone());
    let messaging = SlackMessagingService::new(config.messaging.token.clone(), timeout)?
        .with_base_url(config.messaging.base_url.clone());
    let calendar = GoogleCalendarService::new(
        config.calendar.token.clone(),
        config.calendar.calendar_id.clone(),
        timeout,
    )?
    .with_base_url(config.calendar.base_url.clone());

    Ok(TaskCoordinator::new(
        PipelineCapabilities {
            repository: Arc::new(InMemoryTaskRepository::new()),
            calendar: Arc::new(calendar),
            reasoning: Arc::new(reasoning),
            messaging: Arc::new(messaging),
            clock: Arc::new(DefaultClock),
        },
        config.pipeline_settings(),
    ))
}

/// Rejected entries are logged and skipped so the rest of the batch runs.
async fn submit_batch(coordinator: &LiveCoordinator, batch: &TaskBatch) {
    for entry in batch.entries() {
        let priority = match entry.priority() {
            Ok(level) => level,
            Err(err) => {
                warn!(task_name = %entry.name, error = %err, "Skipping task");
                continue;
            }
        };
        if let Err(err) = coordinator
            .submit_task(entry.name.clone(), &entry.deadline, priority)
            .await
        {
            warn!(task_name = %entry.name, error = %err, "Skipping task");
        }
    }
}
