//! The content generator: prompt assembly, model call, JSON salvage,
//! schema check, and retry, normalized into a [`GeneratedContent`].

use crate::{ContentDriver, DriverRequest, RetryConfig, retry::retry_with_backoff};
use futures::StreamExt;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use wayfinder_core::{GeneratedContent, GenerationContext, TemplateSpec, build_prompt};
use wayfinder_error::{GenerationError, GenerationErrorKind};
use wayfinder_schema::SchemaCache;

/// Greedy first-`{` to last-`}` match, used to salvage JSON from responses
/// that wrap the object in prose or code fences.
static JSON_OBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Tuning knobs for the content generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Maximum model-call attempts per (template, language)
    pub max_retries: usize,
    /// Sampling temperature
    pub temperature: f32,
    /// Concurrent model calls in batch mode
    pub concurrency: usize,
    /// Initial retry backoff
    pub initial_backoff: Duration,
    /// Ceiling on the backoff between attempts
    pub max_backoff: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            temperature: 0.7,
            concurrency: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Generates structured content by driving a model backend.
///
/// The public entry points never return an error: after retries are
/// exhausted the failure is folded into a `GeneratedContent` with
/// `success == false`, so callers never need a catch path.
pub struct ContentGenerator<D: ContentDriver> {
    driver: D,
    config: GeneratorConfig,
    schemas: SchemaCache,
}

impl<D: ContentDriver> ContentGenerator<D> {
    /// Creates a generator with default configuration.
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, GeneratorConfig::default())
    }

    /// Creates a generator with explicit configuration.
    pub fn with_config(driver: D, config: GeneratorConfig) -> Self {
        Self {
            driver,
            config,
            schemas: SchemaCache::new(),
        }
    }

    /// Generates content for one (template, context) pair.
    ///
    /// Each attempt builds the prompt, calls the model, parses the response
    /// as JSON (with a salvage pass for fenced or prose-wrapped objects),
    /// and checks the parsed value against the template schema. A schema
    /// miss counts as a failed attempt so a retry can yield a compliant
    /// sample.
    #[instrument(skip(self, template, context), fields(template = %template.name()))]
    pub async fn generate(
        &self,
        template: &TemplateSpec,
        context: &GenerationContext,
    ) -> GeneratedContent {
        let prompt = build_prompt(template.user_prompt_template(), context);
        let compiled = self
            .schemas
            .get_or_compile(*template.id(), template.schema());

        let request = DriverRequest::new(
            template.system_prompt().clone(),
            prompt,
            compiled.schema().clone(),
            self.config.temperature,
        );

        let retry = RetryConfig {
            max_attempts: self.config.max_retries,
            initial_backoff: self.config.initial_backoff,
            max_backoff: self.config.max_backoff,
            ..RetryConfig::default()
        };

        let attempt = || async {
            let response = self.driver.generate(&request).await?;
            let data = parse_response_json(response.text())?;

            compiled.validate(&data).map_err(|errors| {
                GenerationError::new(GenerationErrorKind::SchemaValidation(
                    errors.iter().map(|e| e.to_string()).collect(),
                ))
            })?;

            Ok((data, response.usage().to_owned()))
        };

        match retry_with_backoff(&retry, attempt).await {
            Ok((data, usage)) => {
                debug!(template = %template.name(), "Generation succeeded");
                GeneratedContent::succeeded(data, self.driver.model_name(), usage)
            }
            Err(err) => {
                warn!(template = %template.name(), error = %err, "Generation failed after retries");
                GeneratedContent::failed(err.to_string(), self.driver.model_name())
            }
        }
    }

    /// Runs a batch of (template, context) pairs through a bounded worker
    /// pool, returning results in input order.
    ///
    /// Concurrency is capped by `config.concurrency` regardless of batch
    /// size, bounding concurrent outbound model calls.
    #[instrument(skip(self, pairs), fields(batch_size = pairs.len()))]
    pub async fn generate_batch(
        &self,
        pairs: &[(TemplateSpec, GenerationContext)],
    ) -> Vec<GeneratedContent> {
        futures::stream::iter(
            pairs
                .iter()
                .map(|(template, context)| self.generate(template, context)),
        )
        .buffered(self.config.concurrency.max(1))
        .collect()
        .await
    }

    /// The underlying model driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The generator configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

/// Parses model response text as a JSON object.
///
/// Tries a direct parse first, then salvages the first top-level `{...}`
/// substring before giving up.
fn parse_response_json(text: &str) -> Result<Value, GenerationError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(value),
        Err(direct_err) => {
            if let Some(found) = JSON_OBJECT.find(text)
                && let Ok(value) = serde_json::from_str::<Value>(found.as_str())
            {
                debug!("Salvaged JSON object from non-JSON response text");
                return Ok(value);
            }
            Err(GenerationError::new(GenerationErrorKind::ResponseParsing(
                direct_err.to_string(),
            )))
        }
    }
}
