//! HTTP client for the Gemini generateContent API.

use crate::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::{ContentDriver, DriverRequest, DriverResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};
use wayfinder_core::TokenUsageData;
use wayfinder_error::{GenerationError, GenerationErrorKind};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the Gemini structured-output endpoint.
///
/// Performs exactly one request per call; retries are the generator's
/// responsibility.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Creates a client with an explicit API key and model.
    #[instrument(skip(api_key), fields(model = %model))]
    pub fn new(api_key: String, model: String) -> Self {
        debug!(model = %model, "Created Gemini client");
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Creates a client from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GenerationError::new(GenerationErrorKind::MissingApiKey))?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Overrides the API base URL (used by tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the per-call timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[async_trait]
impl ContentDriver for GeminiClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &DriverRequest) -> Result<DriverResponse, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user(request.user_prompt().clone())],
            system_instruction: Some(Content::system(request.system_instruction().clone())),
            generation_config: GenerationConfig {
                temperature: *request.temperature(),
                response_mime_type: "application/json".to_string(),
                response_schema: request.response_schema().clone(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        debug!(model = %self.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(timeout_secs = self.timeout_secs, "Model call timed out");
                    GenerationError::new(GenerationErrorKind::Timeout(self.timeout_secs))
                } else {
                    error!(error = %e, "HTTP request failed");
                    GenerationError::new(GenerationErrorKind::ApiRequest(e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "Gemini API error");
            return Err(GenerationError::new(GenerationErrorKind::HttpError {
                status_code: status.as_u16(),
                message: error_text,
            }));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse API response envelope");
            GenerationError::new(GenerationErrorKind::ResponseParsing(e.to_string()))
        })?;

        let usage = parsed.usage_metadata.map(|meta| {
            TokenUsageData::new(
                meta.prompt_token_count,
                meta.candidates_token_count,
                meta.total_token_count,
            )
        });

        let text = parsed
            .text()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

        debug!(response_length = text.len(), "Received model response");
        Ok(DriverResponse::new(text, usage))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
