//! Sanitization of generated free-text fields.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static RUN_ON_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strips HTML tags and collapses run-on whitespace.
///
/// # Examples
///
/// ```
/// use wayfinder_schema::sanitize_text;
///
/// assert_eq!(sanitize_text("<b>Rome</b>  by   night"), "Rome by night");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, "");
    RUN_ON_WHITESPACE
        .replace_all(stripped.trim(), " ")
        .into_owned()
}

/// Sanitizes the string values at the given field paths in place.
///
/// A path is a dot-separated chain of object keys where a `*` segment maps
/// over every element of an array (`items.*.description`). Paths that do not
/// resolve are skipped.
pub fn sanitize_fields(content: &mut Value, paths: &[&str]) {
    for path in paths {
        let segments: Vec<&str> = path.split('.').collect();
        sanitize_path(content, &segments);
    }
}

fn sanitize_path(value: &mut Value, segments: &[&str]) {
    let Some((head, rest)) = segments.split_first() else {
        if let Value::String(text) = value {
            *text = sanitize_text(text);
        }
        return;
    };

    match (*head, value) {
        ("*", Value::Array(elements)) => {
            for element in elements {
                sanitize_path(element, rest);
            }
        }
        (key, Value::Object(fields)) => {
            if let Some(child) = fields.get_mut(key) {
                sanitize_path(child, rest);
            }
        }
        _ => {}
    }
}
