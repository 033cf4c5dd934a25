//! Declarative payload shapes and validation
//!
//! Every inbound payload is checked against a static [`Shape`] before any
//! store mutation happens. Validation is a pure function: it never panics on
//! malformed input and reports **every** violated field, not just the first.
//!
//! ## Rules
//!
//! - The input must be a JSON object. Anything else is a single violation on `$`.
//! - Required fields must be present and non-null.
//! - Optional fields may be absent or `null`; when present they must satisfy their kind.
//! - `Integer` accepts JSON integers, and floats with no fractional part that fit in `i64`.
//! - `Enum` accepts only the listed wire names (case-sensitive).
//! - `EnumOrEnumList` accepts one wire name or an array of wire names.
//! - `StringList` and `NumberList` accept arrays whose every element is a string or a number.
//! - Forbidden fields are violations whenever present, even when `null`.
//! - Fields not named by the shape are dropped from the normalized output.
//!
//! Typed parsing goes through [`parse`], which validates, normalizes, then
//! deserializes into the target type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of value a field must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON string
    String,
    /// Whole number representable as `i64`
    Integer,
    /// One of a closed set of string values
    Enum(&'static [&'static str]),
    /// One value of the closed set, or an array of them
    EnumOrEnumList(&'static [&'static str]),
    /// Array of strings
    StringList,
    /// Array of numbers
    NumberList,
}

/// A single field declaration within a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name in the JSON object
    pub name: &'static str,
    /// Expected kind
    pub kind: FieldKind,
    /// Whether the field must be present
    pub required: bool,
}

impl FieldSpec {
    /// Declare a required field
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// Declare an optional field
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Declarative description of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Human-readable payload name, used in messages
    pub name: &'static str,
    /// Declared fields
    pub fields: &'static [FieldSpec],
    /// Fields that must not appear at all
    pub forbidden: &'static [&'static str],
}

/// A payload type with a declared shape
pub trait Schema: DeserializeOwned {
    /// Shape the raw payload must satisfy
    const SHAPE: Shape;
}

/// One violated field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Offending field name (`$` for the payload itself)
    pub field: String,
    /// What was wrong with it
    pub reason: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Payload failed validation
///
/// Always carries at least one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{}", render(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Build an error with a single violation
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, reason)],
        }
    }

    /// All violations, in shape declaration order
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether the given field was reported
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn render(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate `input` against `shape`.
///
/// On success returns the normalized object: only declared fields, integers
/// rewritten as `i64`, `null` optionals removed.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation.
pub fn validate(input: &Value, shape: &Shape) -> Result<Map<String, Value>, ValidationError> {
    let Some(object) = input.as_object() else {
        return Err(ValidationError::single(
            "$",
            format!("expected {} object, got {}", shape.name, type_name(input)),
        ));
    };

    let mut violations = Vec::new();
    let mut normalized = Map::new();

    for field in shape.forbidden {
        if object.contains_key(*field) {
            violations.push(FieldViolation::new(*field, "field cannot be set here"));
        }
    }

    for spec in shape.fields {
        match object.get(spec.name) {
            None | Some(Value::Null) if !spec.required => {}
            None => violations.push(FieldViolation::new(spec.name, "required field is missing")),
            Some(value) => match check_kind(value, spec.kind) {
                Ok(value) => {
                    normalized.insert(spec.name.to_string(), value);
                }
                Err(reason) => violations.push(FieldViolation::new(spec.name, reason)),
            },
        }
    }

    if violations.is_empty() {
        Ok(normalized)
    } else {
        Err(ValidationError { violations })
    }
}

/// Validate `input` and deserialize it into `T`.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the shape check or the final
/// deserialization fails.
pub fn parse<T: Schema>(input: &Value) -> Result<T, ValidationError> {
    let normalized = validate(input, &T::SHAPE)?;
    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| ValidationError::single("$", e.to_string()))
}

fn check_kind(value: &Value, kind: FieldKind) -> Result<Value, String> {
    match kind {
        FieldKind::String => match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(format!("expected string, got {}", type_name(other))),
        },
        FieldKind::Integer => as_integer(value)
            .map(Value::from)
            .ok_or_else(|| format!("expected integer, got {}", describe(value))),
        FieldKind::Enum(allowed) => check_enum(value, allowed),
        FieldKind::EnumOrEnumList(allowed) => match value {
            Value::Array(items) => {
                let mut checked = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item =
                        check_enum(item, allowed).map_err(|e| format!("element {}: {}", index, e))?;
                    checked.push(item);
                }
                Ok(Value::Array(checked))
            }
            other => check_enum(other, allowed),
        },
        FieldKind::StringList => check_list(value, "string", Value::is_string),
        FieldKind::NumberList => check_list(value, "number", Value::is_number),
    }
}

fn check_list(value: &Value, element: &str, accepts: fn(&Value) -> bool) -> Result<Value, String> {
    let Value::Array(items) = value else {
        return Err(format!("expected array of {}s, got {}", element, type_name(value)));
    };
    match items.iter().position(|item| !accepts(item)) {
        None => Ok(value.clone()),
        Some(index) => Err(format!(
            "element {}: expected {}, got {}",
            index,
            element,
            type_name(&items[index])
        )),
    }
}

fn check_enum(value: &Value, allowed: &[&str]) -> Result<Value, String> {
    match value {
        Value::String(s) if allowed.contains(&s.as_str()) => Ok(value.clone()),
        other => Err(format!(
            "expected one of [{}], got {}",
            allowed.join(", "),
            describe(other)
        )),
    }
}

/// Interpret a JSON number as a whole `i64`, if it is one.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
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

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Number(n) => n.to_string(),
        other => type_name(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLORS: &[&str] = &["red", "green"];

    const SAMPLE: Shape = Shape {
        name: "sample",
        fields: &[
            FieldSpec::required("name", FieldKind::String),
            FieldSpec::required("count", FieldKind::Integer),
            FieldSpec::optional("color", FieldKind::Enum(COLORS)),
            FieldSpec::optional("palette", FieldKind::EnumOrEnumList(COLORS)),
        ],
        forbidden: &["id"],
    };

    #[test]
    fn test_valid_payload_is_normalized() {
        let input = json!({"name": "x", "count": 3, "color": "red", "extra": true});
        let out = validate(&input, &SAMPLE).unwrap();
        assert_eq!(out.get("name"), Some(&json!("x")));
        assert_eq!(out.get("count"), Some(&json!(3)));
        assert_eq!(out.get("color"), Some(&json!("red")));
        assert!(!out.contains_key("extra"), "unknown fields are dropped");
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = validate(&json!([1, 2]), &SAMPLE).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.has_field("$"));
        assert!(err.to_string().contains("expected sample object, got array"));
    }

    #[test]
    fn test_every_violation_is_reported() {
        let input = json!({"count": "three", "color": "blue", "id": "x"});
        let err = validate(&input, &SAMPLE).unwrap_err();
        assert!(err.has_field("id"));
        assert!(err.has_field("name"));
        assert!(err.has_field("count"));
        assert!(err.has_field("color"));
        assert_eq!(err.violations().len(), 4);
    }

    #[test]
    fn test_integer_rejects_fractions() {
        let err = validate(&json!({"name": "x", "count": 1.5}), &SAMPLE).unwrap_err();
        assert!(err.has_field("count"));
        assert!(err.to_string().contains("expected integer, got 1.5"));
    }

    #[test]
    fn test_integer_accepts_whole_float() {
        let out = validate(&json!({"name": "x", "count": 100.0}), &SAMPLE).unwrap();
        assert_eq!(out.get("count").and_then(Value::as_i64), Some(100));
    }

    #[test]
    fn test_integer_rejects_bool_and_string() {
        assert!(validate(&json!({"name": "x", "count": true}), &SAMPLE).is_err());
        assert!(validate(&json!({"name": "x", "count": "1"}), &SAMPLE).is_err());
    }

    #[test]
    fn test_null_optional_is_absent() {
        let out = validate(&json!({"name": "x", "count": 1, "color": null}), &SAMPLE).unwrap();
        assert!(!out.contains_key("color"));
    }

    #[test]
    fn test_null_required_is_violation() {
        let err = validate(&json!({"name": null, "count": 1}), &SAMPLE).unwrap_err();
        assert!(err.to_string().contains("name: expected string, got null"));
    }

    #[test]
    fn test_enum_or_list_accepts_both_forms() {
        assert!(validate(&json!({"name": "x", "count": 1, "palette": "green"}), &SAMPLE).is_ok());
        assert!(
            validate(&json!({"name": "x", "count": 1, "palette": ["green", "red"]}), &SAMPLE)
                .is_ok()
        );
        assert!(validate(&json!({"name": "x", "count": 1, "palette": []}), &SAMPLE).is_ok());
    }

    #[test]
    fn test_enum_list_reports_bad_element() {
        let err = validate(
            &json!({"name": "x", "count": 1, "palette": ["green", "blue"]}),
            &SAMPLE,
        )
        .unwrap_err();
        assert!(err.to_string().contains("palette: element 1:"));
    }

    #[test]
    fn test_lists_check_every_element() {
        const LISTS: Shape = Shape {
            name: "lists",
            fields: &[
                FieldSpec::optional("labels", FieldKind::StringList),
                FieldSpec::optional("weights", FieldKind::NumberList),
            ],
            forbidden: &[],
        };

        let out = validate(&json!({"labels": ["a", "b"], "weights": [0.5, 2]}), &LISTS).unwrap();
        assert_eq!(out.get("weights"), Some(&json!([0.5, 2])));
        assert!(validate(&json!({"labels": []}), &LISTS).is_ok());

        let err = validate(&json!({"labels": ["a", 1], "weights": "heavy"}), &LISTS).unwrap_err();
        assert!(err.to_string().contains("labels: element 1: expected string, got number"));
        assert!(err.to_string().contains("weights: expected array of numbers, got string"));
    }

    #[test]
    fn test_forbidden_field_rejected_even_when_null() {
        let err = validate(&json!({"name": "x", "count": 1, "id": null}), &SAMPLE).unwrap_err();
        assert!(err.has_field("id"));
    }

    #[test]
    fn test_as_integer_bounds() {
        assert_eq!(as_integer(&json!(i64::MAX)), Some(i64::MAX));
        assert_eq!(as_integer(&json!(u64::MAX)), None);
        assert_eq!(as_integer(&json!(1e300)), None);
        assert_eq!(as_integer(&json!(-2.0)), Some(-2));
    }
}
