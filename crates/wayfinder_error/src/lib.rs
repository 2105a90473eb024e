//! Error types for the Wayfinder content pipeline.
//!
//! Each domain (generation, database, queue, worker, config) defines its own
//! error kind enum plus an error struct that records the source location of
//! the failure. The aggregate [`WayfinderError`] wraps them all for crates
//! that cross domain boundaries.

mod config;
mod database;
mod generation;
mod queue;
mod worker;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};
pub use queue::{QueueError, QueueErrorKind};
pub use worker::{WorkerError, WorkerErrorKind};

/// Aggregate error type for operations that cross domain boundaries.
#[derive(Debug, Clone, derive_more::From)]
pub enum WayfinderError {
    /// Content generation / model call error
    Generation(GenerationError),
    /// Database error
    Database(DatabaseError),
    /// Queue error
    Queue(QueueError),
    /// Job scope resolution error
    Worker(WorkerError),
    /// Configuration error
    Config(ConfigError),
}

impl std::fmt::Display for WayfinderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WayfinderError::Generation(e) => write!(f, "{}", e),
            WayfinderError::Database(e) => write!(f, "{}", e),
            WayfinderError::Queue(e) => write!(f, "{}", e),
            WayfinderError::Worker(e) => write!(f, "{}", e),
            WayfinderError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WayfinderError {}

/// Result alias used across Wayfinder crates.
pub type WayfinderResult<T> = Result<T, WayfinderError>;
