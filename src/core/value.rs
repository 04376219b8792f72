//! Immutable domain values managed by a state slot.
//!
//! Structured values are reference counted, so "changing" a value always
//! means building a new one. The engine detects change by identity
//! ([`Value::same`]), never by deep comparison.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A string-keyed record of values.
pub type Record = BTreeMap<String, Value>;

/// Domain value: a primitive, a structured record or an ordered sequence.
///
/// `PartialEq` is deep structural equality. It is convenient for callers
/// and tests, but the engine itself only ever asks [`Value::same`].
///
/// # Example
///
/// ```rust
/// use microstate::Value;
///
/// let pets = Value::object([("dog", Value::from("Rex"))]);
/// let copy = pets.clone();
/// let rebuilt = Value::object([("dog", Value::from("Rex"))]);
///
/// assert!(pets.same(&copy));
/// assert!(!pets.same(&rebuilt));
/// assert_eq!(pets, rebuilt);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "serde_json::Value", from = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(Arc<str>),
    Object(Arc<Record>),
    Array(Arc<Vec<Value>>),
}

impl Value {
    /// Build a record from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build an ordered sequence.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Array(Arc::new(items.into_iter().collect()))
    }

    /// Identity convention used for change detection.
    ///
    /// Scalars compare by value (`NaN` is never the same as itself),
    /// records and sequences compare by reference.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// True for ordered sequences only. Strings are scalars.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_) | Value::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Read a field of a record. Anything else has no fields.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|record| record.get(key))
    }

    /// Truthiness as the templating layer sees it.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) | Value::Array(_) => true,
        }
    }

    /// Convert into a `serde_json::Value`. Non-finite numbers become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serde_json::Value::from(*n as i64)
            }
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.to_string()),
            Value::Object(record) => serde_json::Value::Object(
                record.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => format_number(*n, f),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.into()),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        value.to_json()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(Arc::new(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_are_same_by_value() {
        assert!(Value::from(42).same(&Value::from(42.0)));
        assert!(Value::from("a").same(&Value::from("a".to_string())));
        assert!(Value::Null.same(&Value::Null));
        assert!(!Value::from(1).same(&Value::from("1")));
    }

    #[test]
    fn nan_is_never_the_same() {
        let nan = Value::from(f64::NAN);
        assert!(!nan.same(&nan.clone()));
    }

    #[test]
    fn structured_values_are_same_by_reference() {
        let list = Value::array([Value::from(1)]);
        assert!(list.same(&list.clone()));
        assert!(!list.same(&Value::array([Value::from(1)])));
        assert_eq!(list, Value::array([Value::from(1)]));
    }

    #[test]
    fn strings_are_not_sequences() {
        assert!(!Value::from("abc").is_sequence());
        assert!(Value::array([]).is_sequence());
        assert!(!Value::object([("length", Value::from(3))]).is_sequence());
    }

    #[test]
    fn primitive_classification() {
        assert!(Value::Null.is_primitive());
        assert!(Value::from(true).is_primitive());
        assert!(!Value::object::<String, _>([]).is_primitive());
        assert!(!Value::array([]).is_primitive());
    }

    #[test]
    fn display_follows_template_stringification() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(
            Value::array([Value::from("dog"), Value::from(2)]).to_string(),
            "dog,2"
        );
    }

    #[test]
    fn json_conversion_preserves_structure() {
        let json = json!({"dog": "Rex", "ages": [1, 2.5], "good": true, "bad": null});
        let value = Value::from(json.clone());

        assert_eq!(value.get("dog"), Some(&Value::from("Rex")));
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn value_serializes_through_json() {
        let value = Value::object([("n", Value::from(3))]);
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"n":3}"#);

        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn truthiness() {
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::array([]).is_truthy());
    }
}
