//! Tests for compiled schema validation.

use serde_json::json;
use wayfinder_schema::CompiledSchema;

fn hero_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["headline", "subheadline", "ctaText"],
        "properties": {
            "headline": {"type": "string", "minLength": 5, "maxLength": 80},
            "subheadline": {"type": "string"},
            "ctaText": {"type": "string", "maxLength": 20},
            "tone": {"type": "string", "enum": ["friendly", "formal"]},
            "rating": {"type": "number", "minimum": 0, "maximum": 5},
            "highlights": {
                "type": "array",
                "minItems": 1,
                "maxItems": 3,
                "items": {"type": "string"}
            }
        }
    })
}

fn valid_hero() -> serde_json::Value {
    json!({
        "headline": "Discover Rome",
        "subheadline": "The eternal city awaits",
        "ctaText": "Plan your trip",
        "tone": "friendly",
        "rating": 4.5,
        "highlights": ["Colosseum", "Trevi Fountain"]
    })
}

#[test]
fn test_satisfying_value_passes() {
    let compiled = CompiledSchema::compile(&hero_schema());
    assert!(compiled.validate(&valid_hero()).is_ok());
}

#[test]
fn test_missing_required_field_fails_with_path() {
    let compiled = CompiledSchema::compile(&hero_schema());
    let mut data = valid_hero();
    data.as_object_mut().unwrap().remove("ctaText");

    let errors = compiled.validate(&data).unwrap_err();
    assert!(errors.iter().any(|e| e.path().contains("ctaText") && e.code() == "required"));
}

#[test]
fn test_wrong_type_fails() {
    let compiled = CompiledSchema::compile(&hero_schema());
    let mut data = valid_hero();
    data["headline"] = json!(42);

    let errors = compiled.validate(&data).unwrap_err();
    assert!(errors.iter().any(|e| e.path().contains("headline") && e.code() == "type_mismatch"));
}

#[test]
fn test_out_of_range_number_fails() {
    let compiled = CompiledSchema::compile(&hero_schema());
    let mut data = valid_hero();
    data["rating"] = json!(7.2);

    let errors = compiled.validate(&data).unwrap_err();
    assert!(errors.iter().any(|e| e.path().contains("rating") && e.code() == "maximum"));
}

#[test]
fn test_too_short_string_fails() {
    let compiled = CompiledSchema::compile(&hero_schema());
    let mut data = valid_hero();
    data["headline"] = json!("Hi");

    let errors = compiled.validate(&data).unwrap_err();
    assert!(errors.iter().any(|e| e.path().contains("headline") && e.code() == "min_length"));
}

#[test]
fn test_enum_violation_fails() {
    let compiled = CompiledSchema::compile(&hero_schema());
    let mut data = valid_hero();
    data["tone"] = json!("sarcastic");

    let errors = compiled.validate(&data).unwrap_err();
    assert!(errors.iter().any(|e| e.path().contains("tone") && e.code() == "enum"));
}

#[test]
fn test_array_bounds_and_item_paths() {
    let compiled = CompiledSchema::compile(&hero_schema());

    let mut data = valid_hero();
    data["highlights"] = json!([]);
    let errors = compiled.validate(&data).unwrap_err();
    assert!(errors.iter().any(|e| e.code() == "min_items"));

    let mut data = valid_hero();
    data["highlights"] = json!(["Colosseum", 42]);
    let errors = compiled.validate(&data).unwrap_err();
    assert!(errors.iter().any(|e| e.path().contains("highlights.1")));
}

#[test]
fn test_pattern_violation_fails() {
    let schema = json!({
        "type": "object",
        "properties": {
            "slug": {"type": "string", "pattern": "^[a-z-]+$"}
        }
    });
    let compiled = CompiledSchema::compile(&schema);

    assert!(compiled.validate(&json!({"slug": "rome-tourism"})).is_ok());
    let errors = compiled.validate(&json!({"slug": "Rome Tourism"})).unwrap_err();
    assert!(errors.iter().any(|e| e.code() == "pattern"));
}

#[test]
fn test_integer_rejects_fraction() {
    let schema = json!({
        "type": "object",
        "properties": {"order": {"type": "integer", "minimum": 0}}
    });
    let compiled = CompiledSchema::compile(&schema);

    assert!(compiled.validate(&json!({"order": 3})).is_ok());
    let errors = compiled.validate(&json!({"order": 3.5})).unwrap_err();
    assert!(errors.iter().any(|e| e.code() == "type_mismatch"));
}

#[test]
fn test_unknown_type_degrades_to_accept_anything() {
    let schema = json!({
        "type": "object",
        "properties": {
            "blob": {"type": "mystery"},
            "untyped": {"minLength": 3}
        }
    });
    let compiled = CompiledSchema::compile(&schema);

    // Both nodes accept anything, and the leniency is observable.
    assert!(compiled.validate(&json!({"blob": [1, 2], "untyped": 9})).is_ok());
    assert_eq!(compiled.permissive_paths().len(), 2);
    assert!(compiled.permissive_paths().iter().any(|p| p.contains("blob")));
}

#[test]
fn test_schema_round_trips_verbatim() {
    let schema = hero_schema();
    let compiled = CompiledSchema::compile(&schema);
    assert_eq!(compiled.schema(), &schema);
}

#[test]
fn test_unlisted_properties_are_accepted() {
    let compiled = CompiledSchema::compile(&hero_schema());
    let mut data = valid_hero();
    data["extra"] = json!({"anything": true});
    assert!(compiled.validate(&data).is_ok());
}
