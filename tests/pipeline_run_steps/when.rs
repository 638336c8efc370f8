//! When steps for pipeline run BDD scenarios.

use super::world::{PipelineWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the pipeline runs")]
fn pipeline_runs(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let report = run_async(world.coordinator.run()).wrap_err("run pipeline")?;
    world.last_report = Some(report);
    Ok(())
}

#[when(r#"a task "{name}" is submitted with deadline "{deadline}""#)]
fn task_submitted_with_deadline(world: &mut PipelineWorld, name: String, deadline: String) {
    let result = run_async(world.coordinator.submit_task(name, &deadline, None));
    world.last_submission = Some(result);
}
