//! Generation error types and retry classification for model calls.

/// Specific error conditions for content generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationErrorKind {
    /// API key not found in environment
    MissingApiKey,
    /// API request failed before a response was received
    ApiRequest(String),
    /// HTTP error with status code and message
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Model call exceeded its timeout
    Timeout(u64),
    /// Model returned text that could not be parsed as JSON
    ResponseParsing(String),
    /// Model returned an empty response body
    EmptyResponse,
    /// Parsed JSON did not satisfy the template schema
    SchemaValidation(Vec<String>),
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::MissingApiKey => {
                write!(f, "GEMINI_API_KEY environment variable not set")
            }
            GenerationErrorKind::ApiRequest(msg) => {
                write!(f, "Model API request failed: {}", msg)
            }
            GenerationErrorKind::HttpError {
                status_code,
                message,
            } => write!(f, "HTTP {} error: {}", status_code, message),
            GenerationErrorKind::Timeout(secs) => {
                write!(f, "Model call timed out after {}s", secs)
            }
            GenerationErrorKind::ResponseParsing(msg) => {
                write!(f, "Failed to parse model response as JSON: {}", msg)
            }
            GenerationErrorKind::EmptyResponse => {
                write!(f, "Model returned an empty response")
            }
            GenerationErrorKind::SchemaValidation(errors) => {
                write!(f, "Generated content failed schema validation: {}", errors.join("; "))
            }
        }
    }
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Schema validation failures count as retryable: the assumption is that
    /// a fresh sample from the model may produce a compliant response.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::HttpError { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            GenerationErrorKind::ApiRequest(_) => true,
            GenerationErrorKind::Timeout(_) => true,
            GenerationErrorKind::ResponseParsing(_) => true,
            GenerationErrorKind::EmptyResponse => true,
            GenerationErrorKind::SchemaValidation(_) => true,
            GenerationErrorKind::MissingApiKey => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            GenerationErrorKind::HttpError { status_code, .. } => match *status_code {
                429 => (5000, 3, 40),
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 4, 30),
                _ => (2000, 5, 60),
            },
            GenerationErrorKind::Timeout(_) => (2000, 4, 30),
            GenerationErrorKind::ResponseParsing(_) => (500, 3, 10),
            GenerationErrorKind::SchemaValidation(_) => (500, 3, 10),
            _ => (2000, 5, 60),
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use wayfinder_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for GenerationError {}

/// Trait for errors that support retry logic.
///
/// Transient errors like 503 (service unavailable), 429 (rate limit), or
/// network timeouts should return true from `is_retryable`. Permanent errors
/// like 401 (unauthorized) or a missing API key should return false.
///
/// # Examples
///
/// ```
/// use wayfinder_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::HttpError {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    /// Default implementation returns standard parameters.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 5, 60)
    }
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
