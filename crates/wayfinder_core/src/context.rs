//! Generation context passed to the prompt builder and model client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named context variables for one generation request.
///
/// Keys mirror the `{placeholder}` tokens in template prompt strings
/// (`siteName`, `locationContext`, `language`, ...). Values are arbitrary
/// JSON; strings substitute without quotes, everything else substitutes as
/// its JSON rendering.
///
/// # Examples
///
/// ```
/// use wayfinder_core::GenerationContext;
///
/// let ctx = GenerationContext::new()
///     .with("siteName", "Rome Tourism")
///     .with("language", "es");
/// assert_eq!(ctx.language(), Some("es"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationContext {
    vars: BTreeMap<String, Value>,
}

impl GenerationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, consuming and returning the context for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Inserts a variable in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Looks up a variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Looks up a string-valued variable.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.vars.get(key).and_then(Value::as_str)
    }

    /// Returns the requested output language, if set.
    pub fn language(&self) -> Option<&str> {
        self.get_str("language")
    }

    /// Returns the free-text instruction block appended after the prompt, if set.
    pub fn additional_prompt(&self) -> Option<&str> {
        self.get_str("additionalPrompt")
    }

    /// Returns a copy of this context with `language` overridden.
    ///
    /// Used by the section generator to derive one context per requested
    /// language from a shared base context.
    pub fn for_language(&self, language: &str) -> Self {
        self.clone().with("language", language)
    }

    /// Iterates over all variables.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }
}
