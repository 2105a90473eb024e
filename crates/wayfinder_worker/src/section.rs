//! Per-section orchestration over the content generator.

use tracing::instrument;
use uuid::Uuid;
use wayfinder_core::{GenerationContext, LanguageContent, SectionContentResult, TemplateSpec};
use wayfinder_gemini::{ContentDriver, ContentGenerator};

/// Generates content for one section in every requested language.
///
/// Each language gets a copy of the base context with `language` overridden;
/// the generator's batch mode bounds concurrency. Results come back in the
/// input-language order regardless of completion order, and nothing is
/// persisted here: the caller decides what to do with each outcome.
#[instrument(skip(generator, template, context), fields(section_id = %section_id, languages = languages.len()))]
pub async fn generate_section_content<D: ContentDriver>(
    generator: &ContentGenerator<D>,
    section_id: Uuid,
    template: &TemplateSpec,
    context: &GenerationContext,
    languages: &[String],
) -> SectionContentResult {
    let pairs: Vec<(TemplateSpec, GenerationContext)> = languages
        .iter()
        .map(|language| (template.clone(), context.for_language(language)))
        .collect();

    let results = generator.generate_batch(&pairs).await;

    let contents = languages
        .iter()
        .zip(results)
        .map(|(language, content)| LanguageContent::new(language.as_str(), content))
        .collect();

    SectionContentResult::new(section_id, contents)
}
