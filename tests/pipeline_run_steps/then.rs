//! Then steps for pipeline run BDD scenarios.

use super::world::{PipelineWorld, run_async};
use concierge::task::{
    domain::{TaskDomainError, TaskPriority},
    services::TaskCoordinatorError,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then("{count:usize} reminder is sent")]
fn reminders_sent(world: &PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    let posted = world.messaging.posted().wrap_err("read posted reminders")?;
    eyre::ensure!(
        posted.len() == count,
        "expected {count} reminders, found {}",
        posted.len()
    );
    Ok(())
}

#[then(r#"a reminder mentions "{name}""#)]
fn reminder_mentions(world: &PipelineWorld, name: String) -> Result<(), eyre::Report> {
    let posted = world.messaging.posted().wrap_err("read posted reminders")?;
    let quoted = format!("'{name}'");
    eyre::ensure!(
        posted.iter().any(|post| post.text.contains(&quoted)),
        "no reminder mentions {name}"
    );
    Ok(())
}

#[then(r#"the report mentions "{name}""#)]
fn report_mentions(world: &PipelineWorld, name: String) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing report in scenario world"))?;
    eyre::ensure!(report.contains(&name), "report does not mention {name}");
    Ok(())
}

#[then("the submission fails with an invalid deadline error")]
fn submission_fails_with_invalid_deadline(world: &PipelineWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_submission
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission result"))?;

    if !matches!(
        result,
        Err(TaskCoordinatorError::Input(TaskDomainError::InvalidDeadline { .. }))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidDeadline error, got {result:?}"
        ));
    }

    Ok(())
}

#[then("the queue holds {count:usize} tasks")]
fn queue_holds(world: &PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    let queued = run_async(world.coordinator.queue_len());
    eyre::ensure!(queued == count, "expected {count} queued tasks, found {queued}");
    Ok(())
}

#[then(r#"the task "{name}" has priority "{priority}""#)]
fn task_has_priority(
    world: &PipelineWorld,
    name: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let expected = TaskPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid expected priority in scenario: {err}"))?;
    let task = world.task_named(&name)?;
    eyre::ensure!(
        task.priority() == expected,
        "expected priority {expected}, found {}",
        task.priority()
    );
    Ok(())
}

#[then(r#"the task "{name}" has status "{status}""#)]
fn task_has_status(
    world: &PipelineWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = world.task_named(&name)?;
    eyre::ensure!(
        task.status().as_str() == status,
        "expected status {status}, found {}",
        task.status()
    );
    Ok(())
}
