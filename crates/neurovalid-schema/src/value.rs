//! Dynamic value vocabulary for field validation
//!
//! Reference datasets and model parameters reach the schema layer as loosely
//! typed data (often straight from JSON), so fields validate against a small
//! dynamic `Value` enum rather than concrete Rust types. Model types appear
//! as first-class `TypeToken` values, which is what lets one field's element
//! type be supplied by a sibling field at validation time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A first-class model type: its own name plus the names of every base
/// schema it descends from, most-derived first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeToken {
    pub name: String,
    pub ancestry: Vec<String>,
}

impl TypeToken {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ancestry: Vec::new(),
        }
    }

    /// True if this token names `base` or descends from it.
    pub fn is_a(&self, base: &str) -> bool {
        self.name == base || self.ancestry.iter().any(|a| a == base)
    }
}

/// A runtime value a field can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// A model type as a value (late-bound element types, subtype fields)
    Type(TypeToken),
    /// A constructed record as a value (nested schema-bearing objects)
    Object(Box<Record>),
}

impl Value {
    /// Human-readable name of this value's runtime type, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Type(_) => "type",
            Value::Object(_) => "object",
        }
    }

    /// Convert a JSON value into the schema vocabulary.
    ///
    /// Integers that fit `i64` become `Int`; all other numbers become
    /// `Float`. There is no JSON spelling for `Type` or `Object` values.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render this value as JSON.
    ///
    /// `Type` tokens serialize as `{"type": name, "ancestry": [...]}` and
    /// `Object` values as the record's field map.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Type(token) => serde_json::json!({
                "type": token.name,
                "ancestry": token.ancestry,
            }),
            Value::Object(record) => record.to_json(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl From<TypeToken> for Value {
    fn from(v: TypeToken) -> Self {
        Value::Type(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Object(Box::new(v))
    }
}
