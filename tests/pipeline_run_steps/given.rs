//! Given steps for pipeline run BDD scenarios.

use super::world::{PipelineWorld, run_async};
use chrono::TimeDelta;
use concierge::task::domain::{DEADLINE_FORMAT, TaskPriority};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a task "{name}" due in {hours:i64} hours with priority "{priority}""#)]
fn task_due_in_hours(
    world: &mut PipelineWorld,
    name: String,
    hours: i64,
    priority: String,
) -> Result<(), eyre::Report> {
    let level = TaskPriority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let deadline = (world.now + TimeDelta::hours(hours))
        .format(DEADLINE_FORMAT)
        .to_string();
    run_async(world.coordinator.submit_task(name, &deadline, Some(level)))
        .wrap_err("submit task in scenario setup")?;
    Ok(())
}

#[given(r#"the reasoning service answers "{answer}""#)]
fn reasoning_answers(world: &mut PipelineWorld, answer: String) -> Result<(), eyre::Report> {
    world
        .reasoning
        .push_response(answer)
        .wrap_err("queue reasoning response")
}

#[given(r#"reminders mentioning "{marker}" cannot be delivered"#)]
fn reminders_fail_for(world: &mut PipelineWorld, marker: String) -> Result<(), eyre::Report> {
    world
        .messaging
        .fail_when_text_contains(marker)
        .wrap_err("configure messaging failure")
}
