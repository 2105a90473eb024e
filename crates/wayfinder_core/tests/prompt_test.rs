//! Tests for prompt assembly and placeholder substitution.

use wayfinder_core::{GenerationContext, build_prompt, enhance_image_prompt};

#[test]
fn test_substitutes_known_placeholders() {
    let ctx = GenerationContext::new()
        .with("siteName", "Rome")
        .with("locationContext", "Italy");

    let prompt = build_prompt("Generate for {siteName} in {locationContext}", &ctx);
    assert_eq!(prompt, "Generate for Rome in Italy");
}

#[test]
fn test_absent_key_stays_literal() {
    let ctx = GenerationContext::new().with("siteName", "Rome");

    let prompt = build_prompt("Generate for {siteName} near {landmark}", &ctx);
    assert_eq!(prompt, "Generate for Rome near {landmark}");
}

#[test]
fn test_repeated_placeholder_replaced_everywhere() {
    let ctx = GenerationContext::new().with("siteName", "Rome");

    let prompt = build_prompt("{siteName}, {siteName}, {siteName}", &ctx);
    assert_eq!(prompt, "Rome, Rome, Rome");
}

#[test]
fn test_non_string_values_use_json_rendering() {
    let ctx = GenerationContext::new().with("count", 5);

    let prompt = build_prompt("List {count} attractions", &ctx);
    assert_eq!(prompt, "List 5 attractions");
}

#[test]
fn test_spanish_language_appends_directive() {
    let ctx = GenerationContext::new()
        .with("siteName", "Rome")
        .with("language", "es");

    let prompt = build_prompt("Generate for {siteName}", &ctx);
    assert!(prompt.starts_with("Generate for Rome"));
    assert!(prompt.contains("Spanish"));
}

#[test]
fn test_english_language_appends_nothing() {
    let ctx = GenerationContext::new()
        .with("siteName", "Rome")
        .with("language", "en");

    let prompt = build_prompt("Generate for {siteName}", &ctx);
    assert_eq!(prompt, "Generate for Rome");
}

#[test]
fn test_unmapped_language_code_passes_through_raw() {
    let ctx = GenerationContext::new().with("language", "xx");

    let prompt = build_prompt("Generate content", &ctx);
    assert!(prompt.contains("Generate all content in xx"));
}

#[test]
fn test_additional_prompt_appended_last() {
    let ctx = GenerationContext::new()
        .with("language", "es")
        .with("additionalPrompt", "Mention the metro station.");

    let prompt = build_prompt("Generate content", &ctx);
    let directive_pos = prompt.find("Spanish").unwrap();
    let additional_pos = prompt.find("Mention the metro station.").unwrap();
    assert!(additional_pos > directive_pos);
}

#[test]
fn test_enhance_image_prompt_default_style() {
    let prompt = enhance_image_prompt("The Colosseum at dusk", None);
    assert!(prompt.starts_with("The Colosseum at dusk, "));
    assert!(prompt.contains("travel photography"));
}

#[test]
fn test_enhance_image_prompt_custom_style() {
    let prompt = enhance_image_prompt("The Colosseum at dusk", Some("watercolor painting"));
    assert_eq!(prompt, "The Colosseum at dusk, watercolor painting");
}

#[test]
fn test_for_language_overrides_base_context() {
    let base = GenerationContext::new()
        .with("siteName", "Rome")
        .with("language", "en");

    let derived = base.for_language("fr");
    assert_eq!(derived.language(), Some("fr"));
    assert_eq!(base.language(), Some("en"));
    assert_eq!(derived.get_str("siteName"), Some("Rome"));
}
