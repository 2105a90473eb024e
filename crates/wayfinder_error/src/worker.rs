//! Worker error types for job scope resolution.

/// Specific error conditions for generation job processing.
///
/// These are the fatal errors: a job that cannot resolve its scope fails as
/// a whole. Per-language content failures are not errors at this level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorkerErrorKind {
    /// Site referenced by the job does not exist
    SiteNotFound(String),
    /// Page referenced by the job does not exist
    PageNotFound(String),
    /// Section referenced by the job does not exist
    SectionNotFound(String),
    /// Template referenced by a section does not exist
    TemplateNotFound(String),
    /// Template exists but is not active
    TemplateInactive(String),
    /// Template schema could not be parsed
    InvalidTemplateSchema {
        /// Template name
        template: String,
        /// Parse error message
        message: String,
    },
}

impl std::fmt::Display for WorkerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerErrorKind::SiteNotFound(id) => write!(f, "Site '{}' not found", id),
            WorkerErrorKind::PageNotFound(id) => write!(f, "Page '{}' not found", id),
            WorkerErrorKind::SectionNotFound(id) => write!(f, "Section '{}' not found", id),
            WorkerErrorKind::TemplateNotFound(id) => write!(f, "Template '{}' not found", id),
            WorkerErrorKind::TemplateInactive(name) => {
                write!(f, "Template '{}' is not active", name)
            }
            WorkerErrorKind::InvalidTemplateSchema { template, message } => {
                write!(f, "Template '{}' has an invalid schema: {}", template, message)
            }
        }
    }
}

/// Worker error with source location tracking.
///
/// # Examples
///
/// ```
/// use wayfinder_error::{WorkerError, WorkerErrorKind};
///
/// let err = WorkerError::new(WorkerErrorKind::SiteNotFound("rome".into()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone)]
pub struct WorkerError {
    /// The kind of error that occurred
    pub kind: WorkerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl WorkerError {
    /// Create a new WorkerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for WorkerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Worker Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for WorkerError {}
