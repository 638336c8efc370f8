//! Integration tests driving task batches through the pipeline.

use super::helpers::Pipeline;
use chrono::{TimeZone, Utc};
use concierge::batch::TaskBatch;
use concierge::task::{domain::TaskPriority, services::PipelineSettings};
use rstest::rstest;

async fn submit_all(pipeline: &Pipeline, batch: &TaskBatch) -> usize {
    let mut accepted = 0;
    for entry in batch.entries() {
        let Ok(priority) = entry.priority() else {
            continue;
        };
        if pipeline
            .coordinator
            .submit_task(entry.name.clone(), &entry.deadline, priority)
            .await
            .is_ok()
        {
            accepted += 1;
        }
    }
    accepted
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sample_batch_reminds_only_the_same_day_deadline() {
    let morning = Utc
        .with_ymd_and_hms(2025, 12, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    let pipeline = Pipeline::at(morning, PipelineSettings::default());

    let accepted = submit_all(&pipeline, &TaskBatch::sample()).await;
    let report = pipeline.coordinator.run().await.expect("run should succeed");

    assert_eq!(accepted, 4);
    let posted = pipeline.messaging.posted().expect("posts readable");
    let reminded: Vec<&str> = posted.iter().map(|post| post.text.as_str()).collect();
    assert_eq!(
        reminded,
        vec!["Reminder: 'Submit Report' is due at 2025-12-02 17:00 (Priority: High)"]
    );
    assert_eq!(pipeline.calendar.events().expect("events readable").len(), 4);
    for name in ["Submit Report", "Team Meeting", "Code Review", "Prepare Presentation"] {
        assert!(report.contains(name), "report should mention {name}");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_entries_are_skipped_without_affecting_the_rest() {
    let now = Utc
        .with_ymd_and_hms(2025, 12, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let pipeline = Pipeline::at(now, PipelineSettings::default());
    let batch = TaskBatch::from_toml_str(
        r#"
        [[task]]
        name = "T1"
        deadline = "2025-12-01 13:00"
        priority = "high"

        [[task]]
        name = "T3"
        deadline = "2025-13-01 00:00"

        [[task]]
        name = "T4"
        deadline = "2025-12-01 14:00"
        priority = "critical"
        "#,
    )
    .expect("batch should parse");

    let accepted = submit_all(&pipeline, &batch).await;
    let listed = pipeline.coordinator.list_tasks().await.expect("listing");

    assert_eq!(accepted, 1);
    assert_eq!(
        listed.first().map(|task| (task.name().to_owned(), task.priority())),
        Some(("T1".to_owned(), TaskPriority::High))
    );
    assert_eq!(listed.len(), 1);
}
