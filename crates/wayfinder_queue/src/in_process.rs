//! In-process queue over a tokio channel.
//!
//! Single consumer per process; at-least-once within the process. Delivery
//! failures are retried with exponential backoff independently of the model
//! call retry inside the generator, so a crash-prone handler gets a bounded
//! number of fresh deliveries before the job goes to Failed.

use crate::job::{CONTENT_GENERATION_QUEUE, Delivery, GenerationJob, JobRecord, JobState};
use crate::queue::JobQueue;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, mpsc};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Tuning for delivery retry and record retention.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Delivery attempts per job before it is marked failed
    pub max_delivery_attempts: usize,
    /// Base backoff before a redelivery; doubles per attempt
    pub delivery_backoff: Duration,
    /// How long completed job records are kept
    pub completed_retention: Duration,
    /// How long failed job records are kept
    pub failed_retention: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_delivery_attempts: 3,
            delivery_backoff: Duration::from_millis(2000),
            completed_retention: Duration::from_secs(24 * 60 * 60),
            failed_retention: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

/// Channel-backed queue with job status tracking.
pub struct InProcessQueue {
    name: String,
    config: QueueConfig,
    tx: mpsc::UnboundedSender<Delivery>,
    rx: Mutex<mpsc::UnboundedReceiver<Delivery>>,
    records: Arc<RwLock<HashMap<Uuid, JobRecord>>>,
}

impl InProcessQueue {
    /// Creates the content generation queue with default configuration.
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Creates the queue with explicit configuration.
    pub fn with_config(config: QueueConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            name: CONTENT_GENERATION_QUEUE.to_string(),
            config,
            tx,
            rx: Mutex::new(rx),
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The queue configuration.
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Stops accepting new deliveries, for shutdown.
    ///
    /// Already-buffered deliveries still drain; a redelivery scheduled after
    /// the close marks its job failed instead of re-entering the channel.
    pub async fn close(&self) {
        self.rx.lock().await.close();
    }

    async fn transition(&self, job_id: Uuid, state: JobState) -> bool {
        let mut records = self.records.write().await;
        match records.get_mut(&job_id) {
            Some(record) => record.transition(state),
            None => false,
        }
    }
}

impl Default for InProcessQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobQueue for InProcessQueue {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_operational(&self) -> bool {
        true
    }

    #[instrument(skip(self, job), fields(queue = %self.name, site_id = %job.site_id))]
    async fn enqueue(&self, job: GenerationJob) -> Option<Uuid> {
        let job_id = Uuid::new_v4();
        let record = JobRecord::queued(job_id, job.clone());
        self.records.write().await.insert(job_id, record);

        let delivery = Delivery {
            job_id,
            job,
            attempt: 1,
        };
        if self.tx.send(delivery).is_err() {
            warn!(%job_id, "Queue channel closed; dropping job");
            self.records.write().await.remove(&job_id);
            return None;
        }
        debug!(%job_id, "Job enqueued");
        Some(job_id)
    }

    async fn status(&self, job_id: Uuid) -> Option<JobRecord> {
        self.records.read().await.get(&job_id).cloned()
    }

    async fn next_delivery(&self) -> Option<Delivery> {
        let delivery = self.rx.lock().await.recv().await?;
        self.transition(delivery.job_id, JobState::Active { progress: 0.0 })
            .await;
        Some(delivery)
    }

    async fn set_progress(&self, job_id: Uuid, progress: f32) -> bool {
        self.transition(job_id, JobState::Active { progress }).await
    }

    async fn complete(&self, job_id: Uuid, sections_generated: usize) -> bool {
        debug!(%job_id, sections_generated, "Job completed");
        self.transition(job_id, JobState::Completed { sections_generated })
            .await
    }

    #[instrument(skip(self, delivery), fields(job_id = %delivery.job_id, attempt = delivery.attempt))]
    async fn retry_or_fail(&self, delivery: Delivery, error: &str) -> bool {
        if delivery.attempt >= self.config.max_delivery_attempts {
            warn!(error, "Delivery attempts exhausted; job failed");
            self.transition(
                delivery.job_id,
                JobState::Failed {
                    error: error.to_string(),
                },
            )
            .await;
            return false;
        }

        let backoff = self.config.delivery_backoff * 2u32.pow((delivery.attempt - 1) as u32);
        warn!(error, backoff_ms = backoff.as_millis() as u64, "Delivery failed; requeueing");

        let next = Delivery {
            job_id: delivery.job_id,
            job: delivery.job,
            attempt: delivery.attempt + 1,
        };
        let job_id = next.job_id;
        let tx = self.tx.clone();
        let records = Arc::clone(&self.records);
        let error = error.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(backoff).await;
            if tx.send(next).is_err() {
                warn!(%job_id, "Queue closed during redelivery backoff; job failed");
                if let Some(record) = records.write().await.get_mut(&job_id) {
                    record.transition(JobState::Failed { error });
                }
            }
        });
        true
    }

    async fn prune(&self) -> usize {
        let completed =
            chrono::Duration::from_std(self.config.completed_retention).unwrap_or_default();
        let failed = chrono::Duration::from_std(self.config.failed_retention).unwrap_or_default();

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| match record.state() {
            JobState::Completed { .. } => record.updated_age() < completed,
            JobState::Failed { .. } => record.updated_age() < failed,
            _ => true,
        });
        let removed = before - records.len();
        if removed > 0 {
            debug!(removed, "Pruned terminal job records");
        }
        removed
    }
}
