//! Null-object queue for degraded mode.

use crate::job::{CONTENT_GENERATION_QUEUE, Delivery, GenerationJob, JobRecord};
use crate::queue::JobQueue;
use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

/// Queue that accepts every call and does nothing.
///
/// Used when queueing is disabled or the backend is unavailable, so the
/// rest of the system degrades to "no background generation" instead of
/// erroring.
#[derive(Debug, Clone, Default)]
pub struct NoopQueue;

impl NoopQueue {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobQueue for NoopQueue {
    fn name(&self) -> &str {
        CONTENT_GENERATION_QUEUE
    }

    fn is_operational(&self) -> bool {
        false
    }

    async fn enqueue(&self, job: GenerationJob) -> Option<Uuid> {
        warn!(site_id = %job.site_id, "Queue disabled; dropping generation job");
        None
    }

    async fn status(&self, _job_id: Uuid) -> Option<JobRecord> {
        None
    }

    async fn next_delivery(&self) -> Option<Delivery> {
        None
    }

    async fn set_progress(&self, _job_id: Uuid, _progress: f32) -> bool {
        false
    }

    async fn complete(&self, _job_id: Uuid, _sections_generated: usize) -> bool {
        false
    }

    async fn retry_or_fail(&self, _delivery: Delivery, _error: &str) -> bool {
        false
    }

    async fn prune(&self) -> usize {
        0
    }
}
