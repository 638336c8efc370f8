//! In-memory integration tests for full pipeline runs.

use super::helpers::{Pipeline, now, pipeline};
use chrono::{DateTime, TimeDelta, Utc};
use concierge::task::{
    domain::{TaskPriority, TaskStatus},
    services::{PipelineSettings, TaskCoordinatorError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn near_deadline_task_is_reminded_and_distant_one_is_not(pipeline: Pipeline) {
    pipeline
        .coordinator
        .submit_task(
            "T1",
            &pipeline.deadline_in(TimeDelta::hours(1)),
            Some(TaskPriority::High),
        )
        .await
        .expect("submission should succeed");
    pipeline
        .coordinator
        .submit_task(
            "T2",
            &pipeline.deadline_in(TimeDelta::hours(48)),
            Some(TaskPriority::Low),
        )
        .await
        .expect("submission should succeed");

    let report = pipeline.coordinator.run().await.expect("run should succeed");

    let posted = pipeline.messaging.posted().expect("posts readable");
    assert_eq!(posted.len(), 1);
    let reminder = posted.first().expect("one reminder");
    assert_eq!(reminder.channel, "#general");
    assert!(reminder.text.starts_with("Reminder: 'T1' is due at "));
    assert!(reminder.text.ends_with("(Priority: High)"));
    assert!(report.contains("T1"));
    assert!(report.contains("T2"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analysis_prompt_lists_tasks_in_urgency_order(pipeline: Pipeline) {
    pipeline
        .coordinator
        .submit_task(
            "Low later",
            &pipeline.deadline_in(TimeDelta::hours(80)),
            Some(TaskPriority::Low),
        )
        .await
        .expect("submission should succeed");
    pipeline
        .coordinator
        .submit_task(
            "High later",
            &pipeline.deadline_in(TimeDelta::hours(90)),
            Some(TaskPriority::High),
        )
        .await
        .expect("submission should succeed");
    pipeline
        .coordinator
        .submit_task(
            "High sooner",
            &pipeline.deadline_in(TimeDelta::hours(70)),
            Some(TaskPriority::High),
        )
        .await
        .expect("submission should succeed");

    let report = pipeline.coordinator.run().await.expect("run should succeed");

    let position = |name: &str| report.find(name).expect("task listed in report");
    assert!(report.starts_with("Analyze these tasks and suggest which need urgent attention:"));
    assert!(position("High sooner") < position("High later"));
    assert!(position("High later") < position("Low later"));
    assert!(pipeline.messaging.posted().expect("posts readable").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_task_is_consulted_once_then_analyzed(pipeline: Pipeline) {
    for (name, hours) in [("A", 5), ("B", 30), ("C", 60)] {
        pipeline
            .coordinator
            .submit_task(name, &pipeline.deadline_in(TimeDelta::hours(hours)), None)
            .await
            .expect("submission should succeed");
    }

    pipeline.coordinator.run().await.expect("run should succeed");

    let prompts = pipeline.reasoning.prompts().expect("prompts readable");
    assert_eq!(prompts.len(), 4);
    let priority_prompts = prompts
        .iter()
        .filter(|prompt| prompt.contains("Suggest new priority: High, Medium, or Low"))
        .count();
    assert_eq!(priority_prompts, 3);
    assert!(
        prompts
            .last()
            .is_some_and(|prompt| prompt.starts_with("Analyze these tasks"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_run_without_submissions_reminds_nobody_again(pipeline: Pipeline) {
    let task = pipeline
        .coordinator
        .submit_task(
            "Deploy",
            &pipeline.deadline_in(TimeDelta::minutes(30)),
            None,
        )
        .await
        .expect("submission should succeed");

    pipeline.coordinator.run().await.expect("first run should succeed");
    let empty_report = pipeline.coordinator.run().await.expect("second run should succeed");

    assert_eq!(pipeline.messaging.posted().expect("posts readable").len(), 1);
    assert!(!empty_report.contains("Deploy"));
    let stored = pipeline.coordinator.list_tasks().await.expect("listing");
    let status = stored
        .iter()
        .find(|candidate| candidate.id() == task.id())
        .map(|candidate| candidate.status());
    assert_eq!(status, Some(TaskStatus::Notified));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_window_and_channel_are_honoured(now: DateTime<Utc>) {
    let settings = PipelineSettings {
        reminder_channel: "#deadlines".to_owned(),
        notification_window: TimeDelta::hours(72),
        ..PipelineSettings::default()
    };
    let pipeline = Pipeline::at(now, settings);
    pipeline
        .coordinator
        .submit_task(
            "Quarterly plan",
            &pipeline.deadline_in(TimeDelta::hours(60)),
            None,
        )
        .await
        .expect("submission should succeed");

    pipeline.coordinator.run().await.expect("run should succeed");

    let posted = pipeline.messaging.posted().expect("posts readable");
    assert_eq!(
        posted.first().map(|post| post.channel.as_str()),
        Some("#deadlines")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_submission_leaves_the_pipeline_untouched(pipeline: Pipeline) {
    let result = pipeline
        .coordinator
        .submit_task("T3", "2025-13-01 00:00", Some(TaskPriority::High))
        .await;

    assert!(matches!(result, Err(TaskCoordinatorError::Input(_))));
    assert_eq!(pipeline.coordinator.queue_len().await, 0);
    assert!(pipeline.calendar.events().expect("events readable").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reasoning_outage_during_analysis_surfaces_and_keeps_queue(pipeline: Pipeline) {
    pipeline
        .coordinator
        .submit_task("Invoice", &pipeline.deadline_in(TimeDelta::hours(2)), None)
        .await
        .expect("submission should succeed");
    pipeline.reasoning.push_response("High").expect("queue response");
    pipeline.reasoning.push_failure("connection reset").expect("queue failure");

    let failed = pipeline.coordinator.run().await;
    assert!(matches!(failed, Err(TaskCoordinatorError::Analysis(_))));
    assert_eq!(pipeline.coordinator.queue_len().await, 1);

    let report = pipeline.coordinator.run().await.expect("retry should succeed");
    assert!(report.contains("Invoice | Priority: High"));
    assert_eq!(pipeline.coordinator.queue_len().await, 0);
}
