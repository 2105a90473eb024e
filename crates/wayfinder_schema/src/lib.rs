//! Template schema conversion and content validation for Wayfinder.
//!
//! [`CompiledSchema`] turns a template's declarative JSON schema into a
//! runtime validator while keeping the schema itself verbatim for the
//! model's structured-output contract. [`ContentValidator`] layers
//! template-family semantic rules and sanitization on top.

mod cache;
mod convert;
mod rules;
mod sanitize;
mod validator;

pub use cache::SchemaCache;
pub use convert::{CompiledSchema, FieldError};
pub use rules::{FamilyRule, RuleRegistry};
pub use sanitize::{sanitize_fields, sanitize_text};
pub use validator::{ContentValidator, TemplateRef, ValidationOutcome, ValidationWarning};
