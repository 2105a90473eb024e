//! Driver trait: the seam between the content generator and a concrete
//! model backend.

use async_trait::async_trait;
use serde_json::Value;
use wayfinder_core::TokenUsageData;
use wayfinder_error::GenerationError;

/// One structured-output model request.
///
/// No streaming, no multi-turn state: the pipeline sends exactly one request
/// per (template, language) and expects a single JSON object back.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct DriverRequest {
    /// System instruction for the model
    system_instruction: String,
    /// Fully assembled user prompt
    user_prompt: String,
    /// Required response shape, passed to the model verbatim
    response_schema: Value,
    /// Sampling temperature
    temperature: f32,
}

impl DriverRequest {
    /// Creates a driver request.
    pub fn new(
        system_instruction: impl Into<String>,
        user_prompt: impl Into<String>,
        response_schema: Value,
        temperature: f32,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_prompt: user_prompt.into(),
            response_schema,
            temperature,
        }
    }
}

/// Raw model response: the response text plus usage when reported.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct DriverResponse {
    /// Response body text (expected to be JSON)
    text: String,
    /// Token usage, when the provider reported it
    usage: Option<TokenUsageData>,
}

impl DriverResponse {
    /// Creates a driver response.
    pub fn new(text: impl Into<String>, usage: Option<TokenUsageData>) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// A model backend capable of structured-output generation.
///
/// Implementations perform exactly one network call per `generate`
/// invocation; retry policy lives in the generator, not the driver.
#[async_trait]
pub trait ContentDriver: Send + Sync {
    /// Issues one generation request.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] classifying the failure for the retry
    /// policy (transient HTTP errors and timeouts retry, a missing API key
    /// does not).
    async fn generate(&self, request: &DriverRequest) -> Result<DriverResponse, GenerationError>;

    /// Model identifier recorded on generated content.
    fn model_name(&self) -> &str;
}
