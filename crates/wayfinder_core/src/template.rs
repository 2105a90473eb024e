//! Template contract carried into the generation pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The generation-relevant fields of a content template.
///
/// Templates are shared across sites and effectively immutable at generation
/// time; this is the slice of the template row the pipeline needs, detached
/// from its persistence representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TemplateSpec {
    /// Template id, also the schema-cache key
    id: Uuid,
    /// Unique template name (`hero-banner`, `attraction-grid`, ...)
    name: String,
    /// Template family category (`hero`, `grid`, `map`, ...)
    category: String,
    /// System instruction sent with every model call
    system_prompt: String,
    /// User prompt with `{placeholder}` tokens
    user_prompt_template: String,
    /// Declarative schema for the generated content
    schema: Value,
}

impl TemplateSpec {
    /// Creates a template spec.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        category: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt_template: impl Into<String>,
        schema: Value,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            system_prompt: system_prompt.into(),
            user_prompt_template: user_prompt_template.into(),
            schema,
        }
    }
}
