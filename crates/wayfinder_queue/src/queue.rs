//! The `JobQueue` trait.
//!
//! Every operation is fail-soft: a degraded or disabled queue answers with
//! `None`/`false`/`0` instead of an error, so callers on the request path
//! never need a queue-specific failure branch.

use crate::job::{Delivery, GenerationJob, JobRecord};
use async_trait::async_trait;
use uuid::Uuid;

/// At-least-once job queue with per-job status tracking.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Queue name.
    fn name(&self) -> &str;

    /// Whether jobs enqueued here will ever be delivered.
    fn is_operational(&self) -> bool;

    /// Enqueues a job, returning its id, or `None` when the queue is
    /// unavailable.
    async fn enqueue(&self, job: GenerationJob) -> Option<Uuid>;

    /// Current status of a job.
    async fn status(&self, job_id: Uuid) -> Option<JobRecord>;

    /// Waits for the next delivery. `None` means the queue is closed or
    /// disabled.
    async fn next_delivery(&self) -> Option<Delivery>;

    /// Records progress for an active job.
    async fn set_progress(&self, job_id: Uuid, progress: f32) -> bool;

    /// Marks a job completed.
    async fn complete(&self, job_id: Uuid, sections_generated: usize) -> bool;

    /// Requeues a failed delivery for another attempt, or marks the job
    /// failed once attempts are exhausted. Returns `true` when the job will
    /// be retried.
    async fn retry_or_fail(&self, delivery: Delivery, error: &str) -> bool;

    /// Drops terminal job records older than the retention windows,
    /// returning how many were removed.
    async fn prune(&self) -> usize;
}
