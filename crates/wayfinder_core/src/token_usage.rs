//! Token usage tracking for model calls.

use serde::{Deserialize, Serialize};

/// Token usage information for a completed generation.
///
/// Reported as the model returns it; callers omit the whole value when the
/// provider does not report usage rather than zero-filling.
///
/// # Examples
///
/// ```
/// use wayfinder_core::TokenUsageData;
///
/// let usage = TokenUsageData::new(150, 50, 200);
/// assert_eq!(usage.prompt_tokens(), &150);
/// assert_eq!(usage.completion_tokens(), &50);
/// assert_eq!(usage.total_tokens(), &200);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
pub struct TokenUsageData {
    /// Number of tokens in the prompt.
    prompt_tokens: u64,
    /// Number of tokens in the generated output.
    completion_tokens: u64,
    /// Total tokens consumed (may differ from prompt + completion due to provider accounting).
    total_tokens: u64,
}

impl TokenUsageData {
    /// Creates new token usage data.
    pub fn new(prompt_tokens: u64, completion_tokens: u64, total_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }

    /// Creates a builder for TokenUsageData.
    pub fn builder() -> TokenUsageDataBuilder {
        TokenUsageDataBuilder::default()
    }
}
