//! Cell values for semi-structured tables.
//!
//! A [`Value`] is either a scalar or a nested structure. Nested objects keep
//! their keys in source order, so two structurally equal objects are not
//! necessarily equal as `Value`s; see the canonical encoder in
//! `resto-transform` for order-insensitive comparison.

use std::fmt;

use chrono::NaiveDateTime;

/// Timestamp rendering shared by display and canonical encoding.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Format a timestamp as ISO 8601 (`YYYY-MM-DDTHH:MM:SS[.fff]`).
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// A single cell of a [`RawTable`](crate::RawTable).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Timestamp(NaiveDateTime),
    /// Ordered key/value pairs, insertion order preserved.
    Object(Vec<(String, Value)>),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for objects and lists.
    pub fn is_nested(&self) -> bool {
        matches!(self, Value::Object(_) | Value::List(_))
    }

    /// Short type label used in log fields and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Object(_) => "object",
            Value::List(_) => "list",
        }
    }

    /// Builds an object from pairs, keeping their order.
    pub fn object<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::List(items.into_iter().collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Best-effort text rendering.
///
/// Top-level strings render bare; strings nested inside objects or lists are
/// quoted. Object keys keep their source order and non-finite floats render
/// as `NaN`/`inf`, so the output is not canonical.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            other => write_nested(f, other),
        }
    }
}

fn write_nested(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int(i) => write!(f, "{i}"),
        Value::Float(v) => write!(f, "{v}"),
        Value::String(s) => write!(f, "{s:?}"),
        Value::Timestamp(ts) => f.write_str(&format_timestamp(ts)),
        Value::List(items) => {
            f.write_str("[")?;
            for (pos, item) in items.iter().enumerate() {
                if pos > 0 {
                    f.write_str(", ")?;
                }
                write_nested(f, item)?;
            }
            f.write_str("]")
        }
        Value::Object(pairs) => {
            f.write_str("{")?;
            for (pos, (key, item)) in pairs.iter().enumerate() {
                if pos > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key:?}: ")?;
                write_nested(f, item)?;
            }
            f.write_str("}")
        }
    }
}
