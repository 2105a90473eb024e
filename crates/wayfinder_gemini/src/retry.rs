//! Retry with exponential backoff for model calls.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};
use wayfinder_error::{GenerationError, RetryableError};

/// Retry configuration for model calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (first try included).
    pub max_attempts: usize,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

/// Retries an operation with exponential backoff.
///
/// Non-retryable errors fail immediately; retryable ones back off and try
/// again until the attempt budget is exhausted. Each error kind supplies its
/// own pacing through [`RetryableError::retry_strategy_params`]: a rate
/// limit waits seconds between attempts while a parse failure resamples
/// almost immediately. The configured attempt count and backoff window bound
/// whatever the kind asks for.
#[instrument(skip(operation))]
pub async fn retry_with_backoff<F, Fut, T>(
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, GenerationError>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;
        debug!(attempt, "Executing model call");

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "Model call succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                warn!(attempt, error = %err, "Model call attempt failed");

                let (_, kind_attempts, _) = err.retry_strategy_params();
                if attempt >= config.max_attempts.min(kind_attempts) {
                    warn!(attempt, "All retry attempts exhausted");
                    return Err(err);
                }

                if !err.is_retryable() {
                    warn!("Error is not retryable, failing immediately");
                    return Err(err);
                }

                let backoff = backoff_delay(&err, attempt, config);
                debug!(backoff_ms = backoff.as_millis() as u64, "Retrying after backoff");
                sleep(backoff).await;
            }
        }
    }
}

/// The delay before the next attempt after a failure on `attempt`.
///
/// Starts from the error kind's initial backoff, doubles (or whatever the
/// configured multiplier says) per attempt, and is clamped into the window
/// `[config.initial_backoff, min(kind max delay, config.max_backoff)]`.
fn backoff_delay(err: &GenerationError, attempt: usize, config: &RetryConfig) -> Duration {
    let (initial_ms, _, max_delay_secs) = err.retry_strategy_params();
    let factor = config.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
    let scaled = Duration::from_millis(initial_ms).mul_f64(factor);
    let cap = Duration::from_secs(max_delay_secs).min(config.max_backoff);
    scaled.clamp(config.initial_backoff.min(cap), cap)
}
