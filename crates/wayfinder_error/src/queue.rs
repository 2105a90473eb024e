//! Queue error types.

/// Specific error conditions for queue operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueueErrorKind {
    /// Broker connection unavailable
    Unavailable(String),
    /// Job enqueue failed
    Enqueue(String),
    /// Job not found in the queue
    JobNotFound(String),
    /// Queue has been shut down
    Closed,
}

impl std::fmt::Display for QueueErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueErrorKind::Unavailable(msg) => {
                write!(f, "Queue broker unavailable: {}", msg)
            }
            QueueErrorKind::Enqueue(msg) => write!(f, "Failed to enqueue job: {}", msg),
            QueueErrorKind::JobNotFound(id) => write!(f, "Job '{}' not found", id),
            QueueErrorKind::Closed => write!(f, "Queue has been shut down"),
        }
    }
}

/// Queue error with source location tracking.
#[derive(Debug, Clone)]
pub struct QueueError {
    /// The kind of error that occurred
    pub kind: QueueErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl QueueError {
    /// Create a new QueueError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: QueueErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Queue Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for QueueError {}
