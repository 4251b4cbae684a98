//! Field values held by records.
//!
//! Records are flat: every field holds a scalar or a list of scalars. JSON
//! `null` has no representation here; a null field is simply absent from the
//! record.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// A single record: field name to value, in insertion order.
pub type Record = IndexMap<String, Value>;

#[derive(Error, Debug, PartialEq)]
pub enum ValueError {
    #[error("nested objects are not supported")]
    NestedObject,

    #[error("nested lists are not supported")]
    NestedList,

    #[error("null values are not allowed inside lists")]
    NullInList,

    #[error("number {0} cannot be represented")]
    UnrepresentableNumber(String),
}

/// A record field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    /// Attempts to extract the value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract the value as a signed 64-bit integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract the value as a 64-bit float. Integers convert.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Opaque key form used to compare identifiers.
    ///
    /// `123`, `123.0` and `"123"` all share the key `"123"`. Lists have no key.
    pub fn id_key(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some((*f as i64).to_string())
            }
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::List(_) => None,
        }
    }

    /// Loose equality: numbers compare numerically, everything else by key.
    pub fn loosely_eq(&self, other: &Value) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => match (self.id_key(), other.id_key()) {
                (Some(a), Some(b)) => a == b,
                _ => self == other,
            },
        }
    }

    /// True if this list contains an element loosely equal to `needle`.
    /// A scalar behaves like a one-element list.
    pub fn contains(&self, needle: &Value) -> bool {
        match self {
            Value::List(items) => items.iter().any(|item| item.loosely_eq(needle)),
            scalar => scalar.loosely_eq(needle),
        }
    }

    /// Total order used for sorting: numbers numerically, strings
    /// lexicographically, mixed kinds by kind rank.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    let ord = x.sort_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Str(_) => 2,
            Value::List(_) => 3,
        }
    }

    /// Converts a JSON value. `Ok(None)` means JSON `null` (absent field).
    pub fn from_json(json: &serde_json::Value) -> Result<Option<Value>, ValueError> {
        match json {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        serde_json::Value::Array(_) => return Err(ValueError::NestedList),
                        serde_json::Value::Null => return Err(ValueError::NullInList),
                        scalar => values.push(Self::scalar_from_json(scalar)?),
                    }
                }
                Ok(Some(Value::List(values)))
            }
            scalar => Self::scalar_from_json(scalar).map(Some),
        }
    }

    fn scalar_from_json(json: &serde_json::Value) -> Result<Value, ValueError> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(ValueError::UnrepresentableNumber(n.to_string()))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
            serde_json::Value::Object(_) => Err(ValueError::NestedObject),
            serde_json::Value::Array(_) => Err(ValueError::NestedList),
            serde_json::Value::Null => Err(ValueError::NullInList),
        }
    }

    /// Converts to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Converts a JSON object into a record, dropping null fields.
pub fn record_from_json(
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<Record, (String, ValueError)> {
    let mut record = Record::with_capacity(object.len());
    for (key, json) in object {
        if let Some(value) = Value::from_json(json).map_err(|e| (key.clone(), e))? {
            record.insert(key.clone(), value);
        }
    }
    Ok(record)
}

/// Converts a record into a JSON object.
pub fn record_to_json(record: &Record) -> serde_json::Value {
    serde_json::Value::Object(
        record
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}
