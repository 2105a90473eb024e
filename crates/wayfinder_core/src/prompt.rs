//! Prompt assembly from template strings and generation context.
//!
//! Substitution is purely textual: every `{key}` occurrence is replaced with
//! the stringified context value. Keys absent from the context stay as
//! literal `{key}` text, since templates may intentionally omit optional
//! placeholders.

use crate::{GenerationContext, language_name};
use serde_json::Value;

/// Default style suffix appended to image-generation prompts.
const DEFAULT_IMAGE_STYLE: &str =
    "professional travel photography, vibrant colors, golden hour lighting, high resolution";

/// Builds a user prompt from a template string and context variables.
///
/// After substitution, two optional instruction blocks are appended:
/// a full-language-name directive when `language` is set and not `"en"`,
/// and the free-text `additionalPrompt` block when present.
///
/// # Examples
///
/// ```
/// use wayfinder_core::{GenerationContext, build_prompt};
///
/// let ctx = GenerationContext::new()
///     .with("siteName", "Rome")
///     .with("locationContext", "Italy");
/// let prompt = build_prompt("Generate for {siteName} in {locationContext}", &ctx);
/// assert_eq!(prompt, "Generate for Rome in Italy");
/// ```
pub fn build_prompt(template: &str, context: &GenerationContext) -> String {
    let mut prompt = template.to_string();

    for (key, value) in context.iter() {
        let token = format!("{{{}}}", key);
        if prompt.contains(&token) {
            prompt = prompt.replace(&token, &stringify(value));
        }
    }

    if let Some(language) = context.language()
        && language != "en"
    {
        let name = language_name(language);
        prompt.push_str(&format!(
            "\n\nIMPORTANT: Generate all content in {}. Every text field in the response must be written in {}.",
            name, name
        ));
    }

    if let Some(additional) = context.additional_prompt() {
        prompt.push_str(&format!("\n\nAdditional instructions: {}", additional));
    }

    prompt
}

/// Appends a photographic-style suffix to an image-generation prompt.
///
/// Uses the caller-supplied style when given, otherwise the default travel
/// photography suffix. Deterministic, no side effects.
///
/// # Examples
///
/// ```
/// use wayfinder_core::enhance_image_prompt;
///
/// let prompt = enhance_image_prompt("The Colosseum at dusk", Some("watercolor painting"));
/// assert_eq!(prompt, "The Colosseum at dusk, watercolor painting");
/// ```
pub fn enhance_image_prompt(base_prompt: &str, style: Option<&str>) -> String {
    format!("{}, {}", base_prompt, style.unwrap_or(DEFAULT_IMAGE_STYLE))
}

/// Renders a context value for substitution into a prompt string.
///
/// Strings substitute without surrounding quotes; other values use their
/// JSON rendering.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
