//! Generation job worker for the Wayfinder content pipeline.
//!
//! Consumes jobs from the queue, resolves their scope against the site
//! hierarchy, drives the content generator per section and language, and
//! persists validated results.

mod config;
mod section;
mod worker;

pub use config::{CacheSettings, GeneratorSettings, QueueSettings, WorkerConfig};
pub use section::generate_section_content;
pub use worker::{GenerationWorker, JobOutcome};
