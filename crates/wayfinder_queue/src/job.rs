//! Job payloads and the per-job state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the content generation queue.
pub const CONTENT_GENERATION_QUEUE: &str = "content-generation";

/// A unit of generation work.
///
/// `site_id` is always required; `section_id` narrows the job to one
/// section, `page_id` to one page, and `language` to one language.
/// `regenerate` forces fresh content for sections that already have rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
#[serde(rename_all = "camelCase")]
pub struct GenerationJob {
    #[setters(skip)]
    pub site_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub regenerate: bool,
}

impl GenerationJob {
    /// A full-site job with no narrowing.
    pub fn for_site(site_id: Uuid) -> Self {
        Self {
            site_id,
            page_id: None,
            section_id: None,
            language: None,
            regenerate: false,
        }
    }
}

/// Terminal and intermediate job states.
///
/// Queued -> Active -> Completed or Failed. There is no partial-success
/// terminal state; per-language failures inside a Completed job surface
/// through logs and the persisted rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Active { progress: f32 },
    Completed { sections_generated: usize },
    Failed { error: String },
}

impl JobState {
    /// Whether the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed { .. } | JobState::Failed { .. })
    }
}

/// Status record tracked per enqueued job.
#[derive(Debug, Clone, Serialize, Deserialize, derive_getters::Getters)]
pub struct JobRecord {
    id: Uuid,
    job: GenerationJob,
    state: JobState,
    enqueued_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl JobRecord {
    pub(crate) fn queued(id: Uuid, job: GenerationJob) -> Self {
        let now = Utc::now();
        Self {
            id,
            job,
            state: JobState::Queued,
            enqueued_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn transition(&mut self, state: JobState) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = state;
        self.updated_at = Utc::now();
        true
    }

    pub(crate) fn updated_age(&self) -> chrono::Duration {
        Utc::now() - self.updated_at
    }
}

/// One attempt at handing a job to a consumer.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub job_id: Uuid,
    pub job: GenerationJob,
    pub attempt: usize,
}
