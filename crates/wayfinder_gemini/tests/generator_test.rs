//! Tests for the content generator's retry and normalization behavior.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;
use wayfinder_core::{GenerationContext, TemplateSpec};
use wayfinder_error::{GenerationError, GenerationErrorKind};
use wayfinder_gemini::{
    ContentDriver, ContentGenerator, DriverRequest, DriverResponse, GeneratorConfig,
};

/// Driver returning a scripted sequence of outcomes, then repeating the last.
struct ScriptedDriver {
    script: Mutex<Vec<Result<String, GenerationErrorKind>>>,
    calls: AtomicUsize,
}

impl ScriptedDriver {
    fn new(script: Vec<Result<String, GenerationErrorKind>>) -> Self {
        let mut script = script;
        script.reverse();
        Self {
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentDriver for ScriptedDriver {
    async fn generate(&self, _request: &DriverRequest) -> Result<DriverResponse, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop().unwrap()
        } else {
            script.last().cloned().unwrap()
        };
        match next {
            Ok(text) => Ok(DriverResponse::new(text, None)),
            Err(kind) => Err(GenerationError::new(kind)),
        }
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

fn hero_template() -> TemplateSpec {
    TemplateSpec::new(
        Uuid::new_v4(),
        "hero-banner",
        "hero",
        "You write tourism copy.",
        "Generate a hero for {siteName}",
        json!({
            "type": "object",
            "required": ["headline", "subheadline", "ctaText"],
            "properties": {
                "headline": {"type": "string"},
                "subheadline": {"type": "string"},
                "ctaText": {"type": "string"}
            }
        }),
    )
}

fn valid_body() -> String {
    json!({
        "headline": "Discover Rome",
        "subheadline": "The eternal city awaits",
        "ctaText": "Plan your trip"
    })
    .to_string()
}

fn fast_config() -> GeneratorConfig {
    GeneratorConfig {
        max_retries: 3,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(1),
        ..GeneratorConfig::default()
    }
}

fn ctx() -> GenerationContext {
    GenerationContext::new().with("siteName", "Rome Tourism")
}

#[tokio::test]
async fn test_fail_twice_then_succeed_returns_success() {
    let driver = ScriptedDriver::new(vec![
        Err(GenerationErrorKind::HttpError {
            status_code: 503,
            message: "overloaded".to_string(),
        }),
        Err(GenerationErrorKind::Timeout(30)),
        Ok(valid_body()),
    ]);
    let generator = ContentGenerator::with_config(driver, fast_config());

    let result = generator.generate(&hero_template(), &ctx()).await;
    assert!(*result.success());
    assert_eq!(result.data().as_ref().unwrap()["headline"], "Discover Rome");
    assert_eq!(result.model(), "scripted-model");
    assert_eq!(generator.driver().calls(), 3);
}

#[tokio::test]
async fn test_persistent_failure_returns_failed_result_without_throwing() {
    let driver = ScriptedDriver::new(vec![Err(GenerationErrorKind::HttpError {
        status_code: 503,
        message: "overloaded".to_string(),
    })]);
    let generator = ContentGenerator::with_config(driver, fast_config());

    let result = generator.generate(&hero_template(), &ctx()).await;
    assert!(!result.success());
    assert!(result.data().is_none());
    assert!(!result.error().as_ref().unwrap().is_empty());
    assert_eq!(generator.driver().calls(), 3);
}

#[tokio::test]
async fn test_schema_violation_counts_as_attempt_and_retries() {
    // First response parses but misses a required field; second complies.
    let driver = ScriptedDriver::new(vec![
        Ok(json!({"headline": "Discover Rome"}).to_string()),
        Ok(valid_body()),
    ]);
    let generator = ContentGenerator::with_config(driver, fast_config());

    let result = generator.generate(&hero_template(), &ctx()).await;
    assert!(*result.success());
    assert_eq!(generator.driver().calls(), 2);
}

#[tokio::test]
async fn test_non_retryable_error_fails_fast() {
    let driver = ScriptedDriver::new(vec![Err(GenerationErrorKind::MissingApiKey)]);
    let generator = ContentGenerator::with_config(driver, fast_config());

    let result = generator.generate(&hero_template(), &ctx()).await;
    assert!(!result.success());
    assert_eq!(generator.driver().calls(), 1);
}

#[tokio::test]
async fn test_fenced_response_is_salvaged() {
    let fenced = format!("```json\n{}\n```", valid_body());
    let driver = ScriptedDriver::new(vec![Ok(fenced)]);
    let generator = ContentGenerator::with_config(driver, fast_config());

    let result = generator.generate(&hero_template(), &ctx()).await;
    assert!(*result.success());
}

/// Driver that echoes the site marker from the prompt back as the headline,
/// with later batch entries finishing first.
struct EchoDriver;

#[async_trait]
impl ContentDriver for EchoDriver {
    async fn generate(&self, request: &DriverRequest) -> Result<DriverResponse, GenerationError> {
        let markers = [("alpha", 40u64), ("bravo", 30), ("charlie", 20), ("delta", 10)];
        let (name, delay_ms) = markers
            .iter()
            .find(|(name, _)| request.user_prompt().contains(name))
            .copied()
            .unwrap();
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let body = json!({
            "headline": name,
            "subheadline": "echo",
            "ctaText": "Go"
        });
        Ok(DriverResponse::new(body.to_string(), None))
    }

    fn model_name(&self) -> &str {
        "echo-model"
    }
}

#[tokio::test]
async fn test_batch_preserves_input_order() {
    let generator = ContentGenerator::with_config(EchoDriver, fast_config());

    let names = ["alpha", "bravo", "charlie", "delta"];
    let pairs: Vec<_> = names
        .iter()
        .map(|name| (hero_template(), GenerationContext::new().with("siteName", *name)))
        .collect();

    let results = generator.generate_batch(&pairs).await;
    let headlines: Vec<_> = results
        .iter()
        .map(|r| r.data().as_ref().unwrap()["headline"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(headlines, names);
}

#[tokio::test]
async fn test_usage_is_omitted_when_not_reported() {
    let driver = ScriptedDriver::new(vec![Ok(valid_body())]);
    let generator = ContentGenerator::with_config(driver, fast_config());

    let result = generator.generate(&hero_template(), &ctx()).await;
    assert!(result.usage().is_none());
}
