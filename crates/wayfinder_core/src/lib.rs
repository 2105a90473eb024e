//! Core data types for the Wayfinder content pipeline.
//!
//! This crate provides the foundation data types shared across the
//! generation, persistence, and worker crates.

mod content;
mod context;
mod domain;
mod language;
mod prompt;
mod template;
mod token_usage;

pub use content::{GeneratedContent, LanguageContent, SectionContentResult};
pub use context::GenerationContext;
pub use domain::{PageType, SiteStatus, SiteType};
pub use language::language_name;
pub use prompt::{build_prompt, enhance_image_prompt};
pub use template::TemplateSpec;
pub use token_usage::{TokenUsageData, TokenUsageDataBuilder};
