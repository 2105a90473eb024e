//! Template-family validation rules and their registry.
//!
//! Rules are registered once at startup and routed by template name or
//! category, so semantic checks for a family live in one place instead of a
//! switch statement scattered across call sites.

use crate::{FieldError, TemplateRef, ValidationOutcome, ValidationWarning};
use serde_json::Value;
use std::sync::LazyLock;

/// A semantic validation rule for one template family.
pub trait FamilyRule: Send + Sync {
    /// Whether this rule handles the given template.
    fn applies(&self, template: &TemplateRef<'_>) -> bool;

    /// Runs the family checks, recording errors and warnings.
    fn check(&self, content: &Value, outcome: &mut ValidationOutcome);

    /// Free-text field paths to sanitize for this family.
    fn text_fields(&self) -> &[&'static str] {
        &[]
    }

    /// Human-readable rule name for logging.
    fn name(&self) -> &str;
}

/// Registry of family rules with name/category routing.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn FamilyRule>>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in family rules.
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(HeroRule));
        registry.register(Box::new(AttractionGridRule));
        registry.register(Box::new(MapRule));
        registry.register(Box::new(WeatherRule));
        registry
    }

    /// Registers a rule. Rules are consulted in registration order.
    pub fn register(&mut self, rule: Box<dyn FamilyRule>) {
        self.rules.push(rule);
    }

    /// All registered rules.
    pub fn rules(&self) -> &[Box<dyn FamilyRule>] {
        &self.rules
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn matches_family(template: &TemplateRef<'_>, needles: &[&str]) -> bool {
    let name = template.name.to_lowercase();
    let category = template.category.to_lowercase();
    needles
        .iter()
        .any(|needle| name.contains(needle) || category.contains(needle))
}

/// Hero banner checks: headline/subheadline length warnings, CTA label cap.
struct HeroRule;

impl FamilyRule for HeroRule {
    fn applies(&self, template: &TemplateRef<'_>) -> bool {
        matches_family(template, &["hero"])
    }

    fn check(&self, content: &Value, outcome: &mut ValidationOutcome) {
        if let Some(headline) = content.get("headline").and_then(Value::as_str)
            && headline.chars().count() > 60
        {
            outcome.add_warning(ValidationWarning::new(
                "headline",
                format!("headline is {} chars, over the 60-char guideline", headline.chars().count()),
            ));
        }
        if let Some(subheadline) = content.get("subheadline").and_then(Value::as_str)
            && subheadline.chars().count() > 150
        {
            outcome.add_warning(ValidationWarning::new(
                "subheadline",
                format!(
                    "subheadline is {} chars, over the 150-char guideline",
                    subheadline.chars().count()
                ),
            ));
        }
        if let Some(cta) = content.get("ctaText").and_then(Value::as_str)
            && cta.chars().count() > 20
        {
            outcome.add_error(FieldError::new(
                "ctaText",
                format!("CTA label is {} chars, maximum is 20", cta.chars().count()),
                "cta_too_long",
            ));
        }
    }

    fn text_fields(&self) -> &[&'static str] {
        &["headline", "subheadline", "description"]
    }

    fn name(&self) -> &str {
        "HeroRule"
    }
}

static PRICE_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^(?i:free|\$+)$").unwrap());

/// Attraction grid checks: rating range, price format.
struct AttractionGridRule;

impl FamilyRule for AttractionGridRule {
    fn applies(&self, template: &TemplateRef<'_>) -> bool {
        matches_family(template, &["attraction", "grid"])
    }

    fn check(&self, content: &Value, outcome: &mut ValidationOutcome) {
        let Some(items) = content.get("items").and_then(Value::as_array) else {
            return;
        };

        for (index, item) in items.iter().enumerate() {
            if let Some(rating) = item.get("rating").and_then(Value::as_f64)
                && !(0.0..=5.0).contains(&rating)
            {
                outcome.add_error(FieldError::new(
                    format!("items.{}.rating", index),
                    format!("rating {} is outside [0, 5]", rating),
                    "rating_out_of_range",
                ));
            }
            if let Some(price) = item.get("price").and_then(Value::as_str)
                && !PRICE_PATTERN.is_match(price)
            {
                outcome.add_warning(ValidationWarning::new(
                    format!("items.{}.price", index),
                    format!("price '{}' does not match 'free' or '$'..'$$$$'", price),
                ));
            }
        }
    }

    fn text_fields(&self) -> &[&'static str] {
        &["title", "items.*.name", "items.*.description"]
    }

    fn name(&self) -> &str {
        "AttractionGridRule"
    }
}

/// Map checks: coordinate bounds for the center and every marker.
struct MapRule;

impl MapRule {
    fn check_point(point: &Value, path: &str, outcome: &mut ValidationOutcome) {
        if let Some(lat) = point.get("lat").and_then(Value::as_f64)
            && !(-90.0..=90.0).contains(&lat)
        {
            outcome.add_error(FieldError::new(
                format!("{}.lat", path),
                format!("latitude {} is outside [-90, 90]", lat),
                "latitude_out_of_range",
            ));
        }
        if let Some(lng) = point.get("lng").and_then(Value::as_f64)
            && !(-180.0..=180.0).contains(&lng)
        {
            outcome.add_error(FieldError::new(
                format!("{}.lng", path),
                format!("longitude {} is outside [-180, 180]", lng),
                "longitude_out_of_range",
            ));
        }
    }
}

impl FamilyRule for MapRule {
    fn applies(&self, template: &TemplateRef<'_>) -> bool {
        matches_family(template, &["map"])
    }

    fn check(&self, content: &Value, outcome: &mut ValidationOutcome) {
        if let Some(center) = content.get("center") {
            Self::check_point(center, "center", outcome);
        }
        if let Some(markers) = content.get("markers").and_then(Value::as_array) {
            for (index, marker) in markers.iter().enumerate() {
                Self::check_point(marker, &format!("markers.{}", index), outcome);
            }
        }
    }

    fn text_fields(&self) -> &[&'static str] {
        &["title", "markers.*.name", "markers.*.description"]
    }

    fn name(&self) -> &str {
        "MapRule"
    }
}

/// Weather/climate checks: 12 monthly entries, high >= low, plausible extremes.
struct WeatherRule;

impl FamilyRule for WeatherRule {
    fn applies(&self, template: &TemplateRef<'_>) -> bool {
        matches_family(template, &["weather", "climate"])
    }

    fn check(&self, content: &Value, outcome: &mut ValidationOutcome) {
        let Some(months) = content.get("months").and_then(Value::as_array) else {
            return;
        };

        if months.len() != 12 {
            outcome.add_error(FieldError::new(
                "months",
                format!("expected 12 monthly entries, got {}", months.len()),
                "month_count",
            ));
        }

        for (index, month) in months.iter().enumerate() {
            let high = month.get("high").and_then(Value::as_f64);
            let low = month.get("low").and_then(Value::as_f64);

            if let (Some(high), Some(low)) = (high, low)
                && high < low
            {
                outcome.add_error(FieldError::new(
                    format!("months.{}", index),
                    format!("high {} is below low {}", high, low),
                    "high_below_low",
                ));
            }
            for (field, temp) in [("high", high), ("low", low)] {
                if let Some(temp) = temp
                    && !(-60.0..=60.0).contains(&temp)
                {
                    outcome.add_warning(ValidationWarning::new(
                        format!("months.{}.{}", index, field),
                        format!("{}°C is physically implausible", temp),
                    ));
                }
            }
        }
    }

    fn text_fields(&self) -> &[&'static str] {
        &["summary"]
    }

    fn name(&self) -> &str {
        "WeatherRule"
    }
}
