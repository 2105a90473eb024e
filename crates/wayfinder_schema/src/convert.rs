//! Conversion of declarative template schemas into runtime validators.
//!
//! A template's schema is stored as plain JSON and is sent to the model
//! verbatim as its structured-output contract. [`CompiledSchema`] walks the
//! same JSON once and builds a validation tree, so the validator checks the
//! identical shape the model was asked to produce.
//!
//! A node with a missing or unknown `type` degrades to accept-anything.
//! Templates with loosely-specified nested objects rely on this, so it is
//! deliberate; the affected paths are recorded in `permissive_paths` and
//! logged at debug level rather than silently swallowed.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// A single structural validation failure.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct FieldError {
    /// Dotted path to the offending field (`items.2.rating`)
    path: String,
    /// Human-readable message
    message: String,
    /// Stable machine-readable code (`type_mismatch`, `required`, ...)
    #[getter(skip)]
    code: &'static str,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(path: impl Into<String>, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            code,
        }
    }

    /// The stable machine-readable code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.code)
    }
}

/// Validation tree compiled from a declarative schema node.
#[derive(Debug, Clone)]
enum Node {
    /// String with optional enum, length bounds, and regex pattern
    String {
        enum_values: Option<Vec<String>>,
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<Regex>,
    },
    /// Number or integer with optional bounds
    Number {
        integer: bool,
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    /// Boolean
    Boolean,
    /// Array with recursive item schema and optional size bounds
    Array {
        items: Option<Box<Node>>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    /// Object with recursive property schemas and required-field list
    Object {
        properties: BTreeMap<String, Node>,
        required: Vec<String>,
    },
    /// Accept anything (missing/unknown type)
    Any,
}

/// A compiled template schema: the verbatim schema JSON plus its validator.
///
/// Compile once per template and reuse; the same template is validated
/// against repeatedly across languages and sites.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    schema: Value,
    root: Node,
    permissive_paths: Vec<String>,
}

impl CompiledSchema {
    /// Compiles a declarative schema into a runtime validator.
    ///
    /// Never fails: malformed or unknown nodes degrade to accept-anything
    /// so a sloppy template schema cannot crash generation.
    pub fn compile(schema: &Value) -> Self {
        let mut permissive_paths = Vec::new();
        let root = compile_node(schema, "$", &mut permissive_paths);

        if !permissive_paths.is_empty() {
            tracing::debug!(
                paths = ?permissive_paths,
                "Schema nodes without a recognized type degrade to accept-anything"
            );
        }

        Self {
            schema: schema.clone(),
            root,
            permissive_paths,
        }
    }

    /// The schema exactly as given, for use as the model's response contract.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Paths of schema nodes that degraded to accept-anything.
    pub fn permissive_paths(&self) -> &[String] {
        &self.permissive_paths
    }

    /// Validates a value against the compiled schema.
    ///
    /// # Errors
    ///
    /// Returns the full list of structural violations, each referencing the
    /// offending field path.
    pub fn validate(&self, data: &Value) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_node(&self.root, data, "$", &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn compile_node(schema: &Value, path: &str, permissive: &mut Vec<String>) -> Node {
    let obj = match schema.as_object() {
        Some(obj) => obj,
        None => {
            permissive.push(path.to_string());
            return Node::Any;
        }
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("string") => Node::String {
            enum_values: obj.get("enum").and_then(Value::as_array).map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            min_length: get_usize(obj, "minLength"),
            max_length: get_usize(obj, "maxLength"),
            pattern: obj
                .get("pattern")
                .and_then(Value::as_str)
                .and_then(|p| match Regex::new(p) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::debug!(path, pattern = p, error = %e, "Ignoring unparseable pattern");
                        None
                    }
                }),
        },
        Some("number") | Some("integer") => Node::Number {
            integer: obj.get("type").and_then(Value::as_str) == Some("integer"),
            minimum: obj.get("minimum").and_then(Value::as_f64),
            maximum: obj.get("maximum").and_then(Value::as_f64),
        },
        Some("boolean") => Node::Boolean,
        Some("array") => Node::Array {
            items: obj
                .get("items")
                .map(|items| Box::new(compile_node(items, &format!("{}[]", path), permissive))),
            min_items: get_usize(obj, "minItems"),
            max_items: get_usize(obj, "maxItems"),
        },
        Some("object") => {
            let properties = obj
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| {
                    props
                        .iter()
                        .map(|(name, prop)| {
                            let child_path = format!("{}.{}", path, name);
                            (name.clone(), compile_node(prop, &child_path, permissive))
                        })
                        .collect()
                })
                .unwrap_or_default();

            let required = obj
                .get("required")
                .and_then(Value::as_array)
                .map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            Node::Object {
                properties,
                required,
            }
        }
        _ => {
            permissive.push(path.to_string());
            Node::Any
        }
    }
}

fn get_usize(obj: &serde_json::Map<String, Value>, key: &str) -> Option<usize> {
    obj.get(key).and_then(Value::as_u64).map(|n| n as usize)
}

fn validate_node(node: &Node, data: &Value, path: &str, errors: &mut Vec<FieldError>) {
    match node {
        Node::Any => {}
        Node::String {
            enum_values,
            min_length,
            max_length,
            pattern,
        } => {
            let text = match data.as_str() {
                Some(text) => text,
                None => {
                    errors.push(FieldError::new(
                        path,
                        format!("expected string, got {}", type_name(data)),
                        "type_mismatch",
                    ));
                    return;
                }
            };

            if let Some(allowed) = enum_values
                && !allowed.iter().any(|v| v == text)
            {
                errors.push(FieldError::new(
                    path,
                    format!("'{}' is not one of {:?}", text, allowed),
                    "enum",
                ));
            }
            if let Some(min) = min_length
                && text.chars().count() < *min
            {
                errors.push(FieldError::new(
                    path,
                    format!("length {} is below minimum {}", text.chars().count(), min),
                    "min_length",
                ));
            }
            if let Some(max) = max_length
                && text.chars().count() > *max
            {
                errors.push(FieldError::new(
                    path,
                    format!("length {} exceeds maximum {}", text.chars().count(), max),
                    "max_length",
                ));
            }
            if let Some(re) = pattern
                && !re.is_match(text)
            {
                errors.push(FieldError::new(
                    path,
                    format!("'{}' does not match pattern '{}'", text, re.as_str()),
                    "pattern",
                ));
            }
        }
        Node::Number {
            integer,
            minimum,
            maximum,
        } => {
            let number = match data.as_f64() {
                Some(n) => n,
                None => {
                    errors.push(FieldError::new(
                        path,
                        format!("expected number, got {}", type_name(data)),
                        "type_mismatch",
                    ));
                    return;
                }
            };

            if *integer && data.as_i64().is_none() && data.as_u64().is_none() {
                errors.push(FieldError::new(
                    path,
                    format!("expected integer, got {}", number),
                    "type_mismatch",
                ));
            }
            if let Some(min) = minimum
                && number < *min
            {
                errors.push(FieldError::new(
                    path,
                    format!("{} is below minimum {}", number, min),
                    "minimum",
                ));
            }
            if let Some(max) = maximum
                && number > *max
            {
                errors.push(FieldError::new(
                    path,
                    format!("{} exceeds maximum {}", number, max),
                    "maximum",
                ));
            }
        }
        Node::Boolean => {
            if !data.is_boolean() {
                errors.push(FieldError::new(
                    path,
                    format!("expected boolean, got {}", type_name(data)),
                    "type_mismatch",
                ));
            }
        }
        Node::Array {
            items,
            min_items,
            max_items,
        } => {
            let elements = match data.as_array() {
                Some(elements) => elements,
                None => {
                    errors.push(FieldError::new(
                        path,
                        format!("expected array, got {}", type_name(data)),
                        "type_mismatch",
                    ));
                    return;
                }
            };

            if let Some(min) = min_items
                && elements.len() < *min
            {
                errors.push(FieldError::new(
                    path,
                    format!("{} items is below minimum {}", elements.len(), min),
                    "min_items",
                ));
            }
            if let Some(max) = max_items
                && elements.len() > *max
            {
                errors.push(FieldError::new(
                    path,
                    format!("{} items exceeds maximum {}", elements.len(), max),
                    "max_items",
                ));
            }
            if let Some(item_node) = items {
                for (index, element) in elements.iter().enumerate() {
                    validate_node(item_node, element, &format!("{}.{}", path, index), errors);
                }
            }
        }
        Node::Object {
            properties,
            required,
        } => {
            let fields = match data.as_object() {
                Some(fields) => fields,
                None => {
                    errors.push(FieldError::new(
                        path,
                        format!("expected object, got {}", type_name(data)),
                        "type_mismatch",
                    ));
                    return;
                }
            };

            for name in required {
                if !fields.contains_key(name) {
                    errors.push(FieldError::new(
                        format!("{}.{}", path, name),
                        format!("required field '{}' is missing", name),
                        "required",
                    ));
                }
            }
            for (name, value) in fields {
                if let Some(prop_node) = properties.get(name) {
                    validate_node(prop_node, value, &format!("{}.{}", path, name), errors);
                }
            }
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
