//! Post-hoc content validation: structural schema check plus
//! template-family semantic rules.

use crate::{FieldError, SchemaCache, rules::RuleRegistry, sanitize::sanitize_fields};
use serde_json::Value;
use uuid::Uuid;

/// The template fields the validator needs, borrowed from the caller's row.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRef<'a> {
    /// Template id, used as the schema-cache key
    pub id: Uuid,
    /// Template name (`hero-banner`, `attraction-grid`, ...)
    pub name: &'a str,
    /// Template category (`hero`, `grid`, `map`, `weather`, ...)
    pub category: &'a str,
    /// The declarative content schema
    pub schema: &'a Value,
}

/// A non-fatal validation finding.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ValidationWarning {
    /// Dotted path to the field the warning refers to
    path: String,
    /// Human-readable message
    message: String,
}

impl ValidationWarning {
    /// Creates a warning.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating one piece of generated content.
///
/// `is_valid` is true iff the error list is empty; warnings never block
/// persistence. `sanitized` is populated only for structurally valid
/// content.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    errors: Vec<FieldError>,
    warnings: Vec<ValidationWarning>,
    sanitized: Option<Value>,
}

impl ValidationOutcome {
    /// Creates an empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validation errors (block persistence).
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Validation warnings (review only).
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Sanitized copy of the content, when structurally valid.
    pub fn sanitized(&self) -> Option<&Value> {
        self.sanitized.as_ref()
    }

    /// Consumes the outcome, returning the sanitized content.
    pub fn into_sanitized(self) -> Option<Value> {
        self.sanitized
    }

    /// Adds an error.
    pub fn add_error(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Adds a warning.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats errors as a human-readable string.
    pub fn format_errors(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validates generated content against a template's schema and family rules.
///
/// Family rules are resolved through a [`RuleRegistry`] built once at
/// startup; compiled schemas are memoized per template id.
#[derive(Debug, Default)]
pub struct ContentValidator {
    registry: RuleRegistry,
    cache: SchemaCache,
}

impl ContentValidator {
    /// Creates a validator with the built-in family rules.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_builtin_rules(),
            cache: SchemaCache::new(),
        }
    }

    /// Creates a validator with a caller-supplied rule registry.
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            cache: SchemaCache::new(),
        }
    }

    /// Validates and sanitizes one piece of generated content.
    ///
    /// Runs the structural schema check first, then every family rule whose
    /// `applies` matches the template. Sanitization runs only when the
    /// content is structurally valid.
    #[tracing::instrument(skip(self, content, template), fields(template = template.name))]
    pub fn validate_content(&self, content: &Value, template: &TemplateRef<'_>) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        let compiled = self.cache.get_or_compile(template.id, template.schema);
        let structurally_valid = match compiled.validate(content) {
            Ok(()) => true,
            Err(errors) => {
                for error in errors {
                    outcome.add_error(error);
                }
                false
            }
        };

        let mut text_fields: Vec<&'static str> = Vec::new();
        for rule in self.registry.rules() {
            if rule.applies(template) {
                tracing::debug!(rule = rule.name(), template = template.name, "Applying family rule");
                rule.check(content, &mut outcome);
                text_fields.extend_from_slice(rule.text_fields());
            }
        }

        if structurally_valid {
            let mut sanitized = content.clone();
            sanitize_fields(&mut sanitized, &text_fields);
            outcome.sanitized = Some(sanitized);
        }

        outcome
    }

    /// The schema cache, shared with callers that need the compiled form.
    pub fn schema_cache(&self) -> &SchemaCache {
        &self.cache
    }
}
