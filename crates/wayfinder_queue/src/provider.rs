//! Queue selection at startup.
//!
//! The provider is an explicit object handed to whoever needs the queue;
//! there is no process-global queue state.

use crate::in_process::{InProcessQueue, QueueConfig};
use crate::noop::NoopQueue;
use crate::queue::JobQueue;
use std::sync::Arc;
use tracing::warn;
use wayfinder_error::{QueueError, QueueErrorKind};

/// Which queue implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    InProcess,
    Disabled,
}

impl QueueMode {
    /// Parses a mode string (`in-process` or `off`).
    pub fn parse(value: &str) -> Result<Self, QueueError> {
        match value {
            "in-process" => Ok(QueueMode::InProcess),
            "off" | "disabled" => Ok(QueueMode::Disabled),
            other => Err(QueueError::new(QueueErrorKind::Unavailable(format!(
                "unknown queue mode: {other}"
            )))),
        }
    }
}

/// Resolves and holds the process's job queue.
#[derive(Clone)]
pub struct QueueProvider {
    queue: Arc<dyn JobQueue>,
}

impl QueueProvider {
    /// An in-process queue with the given configuration.
    pub fn in_process(config: QueueConfig) -> Self {
        Self {
            queue: Arc::new(InProcessQueue::with_config(config)),
        }
    }

    /// The no-op queue.
    pub fn disabled() -> Self {
        Self {
            queue: Arc::new(NoopQueue::new()),
        }
    }

    /// Chooses the queue from `WAYFINDER_QUEUE`; unknown or unset values
    /// fall back to the in-process queue, `off` disables queueing.
    pub fn from_env() -> Self {
        match std::env::var("WAYFINDER_QUEUE") {
            Ok(value) => match QueueMode::parse(&value) {
                Ok(QueueMode::InProcess) => Self::in_process(QueueConfig::default()),
                Ok(QueueMode::Disabled) => Self::disabled(),
                Err(e) => {
                    warn!(error = %e, "Falling back to in-process queue");
                    Self::in_process(QueueConfig::default())
                }
            },
            Err(_) => Self::in_process(QueueConfig::default()),
        }
    }

    /// The selected queue.
    pub fn queue(&self) -> Arc<dyn JobQueue> {
        Arc::clone(&self.queue)
    }
}
