//! Generated content result types.

use crate::TokenUsageData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one model call for one (template, language) pair.
///
/// The content generator never surfaces an error to its caller: a failed
/// call (after retries are exhausted) is reported as `success == false` with
/// `data == None` and a non-empty `error` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GeneratedContent {
    /// Whether generation produced schema-valid content
    success: bool,
    /// The generated JSON payload, present only on success
    data: Option<Value>,
    /// Failure message, present only on failure
    error: Option<String>,
    /// When the result was produced
    generated_at: DateTime<Utc>,
    /// Model identifier that produced (or failed to produce) the content
    model: String,
    /// Token usage, when the provider reported it
    usage: Option<TokenUsageData>,
}

impl GeneratedContent {
    /// Creates a successful result.
    pub fn succeeded(data: Value, model: impl Into<String>, usage: Option<TokenUsageData>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            generated_at: Utc::now(),
            model: model.into(),
            usage,
        }
    }

    /// Creates a failed result.
    pub fn failed(error: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            generated_at: Utc::now(),
            model: model.into(),
            usage: None,
        }
    }
}

/// Per-language results for one section, in requested-language order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SectionContentResult {
    /// The section the results belong to
    section_id: uuid::Uuid,
    /// One entry per requested language, in input order
    contents: Vec<LanguageContent>,
}

/// One language's generation outcome within a section result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct LanguageContent {
    /// Language code the content was generated for
    language: String,
    /// The generation outcome
    content: GeneratedContent,
}

impl SectionContentResult {
    /// Creates a section result.
    pub fn new(section_id: uuid::Uuid, contents: Vec<LanguageContent>) -> Self {
        Self {
            section_id,
            contents,
        }
    }
}

impl LanguageContent {
    /// Creates a per-language result entry.
    pub fn new(language: impl Into<String>, content: GeneratedContent) -> Self {
        Self {
            language: language.into(),
            content,
        }
    }
}
