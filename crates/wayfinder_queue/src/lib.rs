//! Job queue layer for the Wayfinder content pipeline.
//!
//! Jobs describe a generation scope (site, optionally narrowed to a page,
//! section, or language); the queue delivers them at least once to a worker
//! and tracks a Queued -> Active -> Completed/Failed state machine per job.

mod in_process;
mod job;
mod noop;
mod provider;
mod queue;

pub use in_process::{InProcessQueue, QueueConfig};
pub use job::{CONTENT_GENERATION_QUEUE, Delivery, GenerationJob, JobRecord, JobState};
pub use noop::NoopQueue;
pub use provider::{QueueMode, QueueProvider};
pub use queue::JobQueue;
