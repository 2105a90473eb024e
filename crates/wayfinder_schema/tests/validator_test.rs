//! Tests for family-rule validation and sanitization.

use serde_json::json;
use uuid::Uuid;
use wayfinder_schema::{ContentValidator, TemplateRef};

fn template<'a>(name: &'a str, category: &'a str, schema: &'a serde_json::Value) -> TemplateRef<'a> {
    TemplateRef {
        id: Uuid::new_v4(),
        name,
        category,
        schema,
    }
}

fn open_schema() -> serde_json::Value {
    json!({"type": "object"})
}

#[test]
fn test_hero_headline_warning_is_non_fatal() {
    let validator = ContentValidator::new();
    let schema = open_schema();
    let content = json!({
        "headline": "A very long headline that easily exceeds the sixty character guideline limit",
        "ctaText": "Go"
    });

    let outcome = validator.validate_content(&content, &template("hero-banner", "hero", &schema));
    assert!(outcome.is_valid());
    assert_eq!(outcome.warnings().len(), 1);
    assert_eq!(outcome.warnings()[0].path(), "headline");
}

#[test]
fn test_hero_cta_over_limit_is_fatal() {
    let validator = ContentValidator::new();
    let schema = open_schema();
    let content = json!({"ctaText": "Click here right now to book today"});

    let outcome = validator.validate_content(&content, &template("hero-banner", "hero", &schema));
    assert!(!outcome.is_valid());
    assert!(outcome.errors().iter().any(|e| e.code() == "cta_too_long"));
}

#[test]
fn test_attraction_rating_out_of_range_is_fatal() {
    let validator = ContentValidator::new();
    let schema = open_schema();
    let content = json!({
        "items": [
            {"name": "Colosseum", "rating": 4.8, "price": "$$"},
            {"name": "Forum", "rating": 6.1, "price": "free"}
        ]
    });

    let outcome =
        validator.validate_content(&content, &template("attraction-grid", "grid", &schema));
    assert!(!outcome.is_valid());
    assert!(outcome.errors().iter().any(|e| e.path() == "items.1.rating"));
}

#[test]
fn test_attraction_price_format_is_warning_only() {
    let validator = ContentValidator::new();
    let schema = open_schema();
    let content = json!({
        "items": [{"name": "Colosseum", "rating": 4.8, "price": "25 EUR"}]
    });

    let outcome =
        validator.validate_content(&content, &template("attraction-grid", "grid", &schema));
    assert!(outcome.is_valid());
    assert_eq!(outcome.warnings().len(), 1);
}

#[test]
fn test_map_rejects_out_of_range_coordinates() {
    let validator = ContentValidator::new();
    let schema = open_schema();
    let content = json!({
        "center": {"lat": 41.9, "lng": 12.5},
        "markers": [
            {"name": "Colosseum", "lat": 41.89, "lng": 12.49},
            {"name": "Nowhere", "lat": 95.0, "lng": 200.0}
        ]
    });

    let outcome = validator.validate_content(&content, &template("city-map", "map", &schema));
    assert!(!outcome.is_valid());
    assert!(outcome.errors().iter().any(|e| e.path() == "markers.1.lat"));
    assert!(outcome.errors().iter().any(|e| e.path() == "markers.1.lng"));
}

#[test]
fn test_weather_requires_twelve_months() {
    let validator = ContentValidator::new();
    let schema = open_schema();
    let content = json!({
        "months": [{"month": "Jan", "high": 12.0, "low": 3.0}]
    });

    let outcome = validator.validate_content(&content, &template("climate-table", "weather", &schema));
    assert!(!outcome.is_valid());
    assert!(outcome.errors().iter().any(|e| e.code() == "month_count"));
}

#[test]
fn test_weather_high_below_low_is_fatal_and_extremes_warn() {
    let validator = ContentValidator::new();
    let schema = open_schema();
    let months: Vec<_> = (0..12)
        .map(|i| {
            if i == 0 {
                json!({"month": "Jan", "high": 2.0, "low": 8.0})
            } else if i == 6 {
                json!({"month": "Jul", "high": 72.0, "low": 20.0})
            } else {
                json!({"month": "x", "high": 20.0, "low": 10.0})
            }
        })
        .collect();
    let content = json!({"months": months});

    let outcome = validator.validate_content(&content, &template("climate-table", "weather", &schema));
    assert!(!outcome.is_valid());
    assert!(outcome.errors().iter().any(|e| e.code() == "high_below_low"));
    assert!(outcome.warnings().iter().any(|w| w.path() == "months.6.high"));
}

#[test]
fn test_sanitization_strips_html_when_structurally_valid() {
    let validator = ContentValidator::new();
    let schema = json!({
        "type": "object",
        "required": ["headline"],
        "properties": {"headline": {"type": "string"}}
    });
    let content = json!({"headline": "<b>Rome</b>   by   night"});

    let outcome = validator.validate_content(&content, &template("hero-banner", "hero", &schema));
    assert!(outcome.is_valid());
    let sanitized = outcome.sanitized().unwrap();
    assert_eq!(sanitized["headline"], "Rome by night");
}

#[test]
fn test_no_sanitized_content_when_structurally_invalid() {
    let validator = ContentValidator::new();
    let schema = json!({
        "type": "object",
        "required": ["headline"],
        "properties": {"headline": {"type": "string"}}
    });
    let content = json!({"wrong": true});

    let outcome = validator.validate_content(&content, &template("hero-banner", "hero", &schema));
    assert!(!outcome.is_valid());
    assert!(outcome.sanitized().is_none());
}

#[test]
fn test_unmatched_template_family_runs_schema_check_only() {
    let validator = ContentValidator::new();
    let schema = json!({
        "type": "object",
        "required": ["body"],
        "properties": {"body": {"type": "string"}}
    });
    let content = json!({"body": "Plain text section"});

    let outcome = validator.validate_content(&content, &template("faq-list", "faq", &schema));
    assert!(outcome.is_valid());
    assert!(outcome.warnings().is_empty());
}
