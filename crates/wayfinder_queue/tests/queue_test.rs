//! Tests for the in-process queue and the no-op fallback.

use std::time::Duration;
use uuid::Uuid;
use wayfinder_queue::{
    GenerationJob, InProcessQueue, JobQueue, JobState, NoopQueue, QueueConfig, QueueMode,
    QueueProvider,
};

fn fast_config() -> QueueConfig {
    QueueConfig {
        max_delivery_attempts: 3,
        delivery_backoff: Duration::from_millis(5),
        completed_retention: Duration::from_millis(20),
        failed_retention: Duration::from_millis(50),
    }
}

#[tokio::test]
async fn test_enqueue_then_deliver_tracks_state() {
    let queue = InProcessQueue::new();
    let job = GenerationJob::for_site(Uuid::new_v4());

    let job_id = queue.enqueue(job.clone()).await.unwrap();
    let record = queue.status(job_id).await.unwrap();
    assert_eq!(*record.state(), JobState::Queued);

    let delivery = queue.next_delivery().await.unwrap();
    assert_eq!(delivery.job_id, job_id);
    assert_eq!(delivery.job, job);
    assert_eq!(delivery.attempt, 1);

    let record = queue.status(job_id).await.unwrap();
    assert_eq!(*record.state(), JobState::Active { progress: 0.0 });
}

#[tokio::test]
async fn test_progress_then_complete() {
    let queue = InProcessQueue::new();
    let job_id = queue
        .enqueue(GenerationJob::for_site(Uuid::new_v4()))
        .await
        .unwrap();
    queue.next_delivery().await.unwrap();

    assert!(queue.set_progress(job_id, 50.0).await);
    assert_eq!(
        *queue.status(job_id).await.unwrap().state(),
        JobState::Active { progress: 50.0 }
    );

    assert!(queue.complete(job_id, 4).await);
    assert_eq!(
        *queue.status(job_id).await.unwrap().state(),
        JobState::Completed {
            sections_generated: 4
        }
    );
}

#[tokio::test]
async fn test_terminal_state_is_immutable() {
    let queue = InProcessQueue::new();
    let job_id = queue
        .enqueue(GenerationJob::for_site(Uuid::new_v4()))
        .await
        .unwrap();
    queue.next_delivery().await.unwrap();
    queue.complete(job_id, 1).await;

    assert!(!queue.complete(job_id, 2).await);
    assert!(!queue.set_progress(job_id, 10.0).await);
    assert_eq!(
        *queue.status(job_id).await.unwrap().state(),
        JobState::Completed {
            sections_generated: 1
        }
    );
}

#[tokio::test]
async fn test_delivery_retries_then_fails() {
    let queue = InProcessQueue::with_config(fast_config());
    let job_id = queue
        .enqueue(GenerationJob::for_site(Uuid::new_v4()))
        .await
        .unwrap();

    let first = queue.next_delivery().await.unwrap();
    assert!(queue.retry_or_fail(first, "handler crashed").await);

    let second = queue.next_delivery().await.unwrap();
    assert_eq!(second.attempt, 2);
    assert!(queue.retry_or_fail(second, "handler crashed").await);

    let third = queue.next_delivery().await.unwrap();
    assert_eq!(third.attempt, 3);
    assert!(!queue.retry_or_fail(third, "handler crashed").await);

    match queue.status(job_id).await.unwrap().state() {
        JobState::Failed { error } => assert_eq!(error, "handler crashed"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_prune_respects_retention_windows() {
    let queue = InProcessQueue::with_config(fast_config());

    let done = queue
        .enqueue(GenerationJob::for_site(Uuid::new_v4()))
        .await
        .unwrap();
    queue.next_delivery().await.unwrap();
    queue.complete(done, 1).await;

    let pending = queue
        .enqueue(GenerationJob::for_site(Uuid::new_v4()))
        .await
        .unwrap();

    // Past completed retention, before failed retention.
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(queue.prune().await, 1);
    assert!(queue.status(done).await.is_none());
    assert!(queue.status(pending).await.is_some());
}

#[tokio::test]
async fn test_job_payload_roundtrips_with_optional_fields() {
    let job = GenerationJob::for_site(Uuid::new_v4())
        .with_language("es".to_string())
        .with_regenerate(true);

    let encoded = serde_json::to_value(&job).unwrap();
    assert!(encoded.get("pageId").is_none());
    assert_eq!(encoded["language"], "es");

    let decoded: GenerationJob = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, job);
}

#[tokio::test]
async fn test_noop_queue_degrades_silently() {
    let queue = NoopQueue::new();
    assert!(!queue.is_operational());

    assert!(
        queue
            .enqueue(GenerationJob::for_site(Uuid::new_v4()))
            .await
            .is_none()
    );
    assert!(queue.status(Uuid::new_v4()).await.is_none());
    assert!(!queue.set_progress(Uuid::new_v4(), 10.0).await);
    assert!(!queue.complete(Uuid::new_v4(), 1).await);
    assert_eq!(queue.prune().await, 0);
}

#[tokio::test]
async fn test_redelivery_into_closed_queue_fails_the_job() {
    let queue = InProcessQueue::with_config(fast_config());
    let job_id = queue
        .enqueue(GenerationJob::for_site(Uuid::new_v4()))
        .await
        .unwrap();

    let first = queue.next_delivery().await.unwrap();
    assert!(queue.retry_or_fail(first, "handler crashed").await);

    // Close before the redelivery backoff elapses; the job must not stay
    // Active forever.
    queue.close().await;
    tokio::time::sleep(Duration::from_millis(30)).await;

    match queue.status(job_id).await.unwrap().state() {
        JobState::Failed { error } => assert_eq!(error, "handler crashed"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_provider_selects_disabled_queue() {
    let provider = QueueProvider::disabled();
    assert!(!provider.queue().is_operational());

    let provider = QueueProvider::in_process(fast_config());
    assert!(provider.queue().is_operational());
}

#[test]
fn test_unknown_queue_mode_error_names_the_mode() {
    assert_eq!(QueueMode::parse("in-process").unwrap(), QueueMode::InProcess);
    assert_eq!(QueueMode::parse("off").unwrap(), QueueMode::Disabled);

    let err = QueueMode::parse("rabbitmq").unwrap_err();
    assert!(err.to_string().contains("unknown queue mode: rabbitmq"));
}
