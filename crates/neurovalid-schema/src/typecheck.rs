//! Composable type-check combinators
//!
//! A `TypeCheck` is a pure structural predicate over [`Value`]s. Leaf checks
//! match scalar kinds; combinators build collection, mapping, alternative,
//! and subtype checks out of them. Element types may be late-bound: an
//! [`ElemType::FromField`] declares that the element type is supplied by a
//! sibling field of the owning record, resolved at check time.

use serde::{Deserialize, Serialize};

use crate::record::FieldBindings;
use crate::value::Value;

/// Element-type parameter of a collection or mapping check.
///
/// `FromField` is the explicit form of a cross-field dependency: the named
/// sibling field must already hold a `Value::Type` token when the check
/// runs. Resolution failure (field unset, or not a type) fails the check
/// rather than raising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElemType {
    Fixed(Box<TypeCheck>),
    FromField(String),
}

impl ElemType {
    fn resolve(&self, bindings: &FieldBindings<'_>) -> Option<TypeCheck> {
        match self {
            ElemType::Fixed(check) => Some((**check).clone()),
            ElemType::FromField(field) => match bindings.get(field) {
                Some(Value::Type(token)) => Some(TypeCheck::Instance(token.name.clone())),
                _ => None,
            },
        }
    }

    fn describe(&self) -> String {
        match self {
            ElemType::Fixed(check) => check.describe(),
            ElemType::FromField(field) => format!("from_field({})", field),
        }
    }
}

/// Structural predicate over a candidate [`Value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeCheck {
    /// Matches every value
    Any,
    Bool,
    Int,
    Float,
    /// Int or Float
    Number,
    Text,
    /// Any list, regardless of element types
    List,
    /// Any map, regardless of entry types
    Map,
    /// A list whose every element matches the element type
    Collection(ElemType),
    /// A map whose every key and value match the entry types
    Mapping(ElemType, ElemType),
    /// At least one alternative matches; empty is unsatisfiable
    AnyOf(Vec<TypeCheck>),
    /// A `Value::Type` token naming the base or descending from it
    Subtype(String),
    /// A `Value::Object` whose schema names the type or descends from it
    Instance(String),
}

impl TypeCheck {
    /// Collection with a fixed element type.
    pub fn collection(elem: TypeCheck) -> TypeCheck {
        TypeCheck::Collection(ElemType::Fixed(Box::new(elem)))
    }

    /// Collection whose element type is held by a sibling field.
    pub fn collection_of_field(field: impl Into<String>) -> TypeCheck {
        TypeCheck::Collection(ElemType::FromField(field.into()))
    }

    /// Mapping with fixed key and value types.
    pub fn mapping(key: TypeCheck, value: TypeCheck) -> TypeCheck {
        TypeCheck::Mapping(
            ElemType::Fixed(Box::new(key)),
            ElemType::Fixed(Box::new(value)),
        )
    }

    pub fn any_of(alternatives: Vec<TypeCheck>) -> TypeCheck {
        TypeCheck::AnyOf(alternatives)
    }

    /// Sugar for a two-way [`TypeCheck::AnyOf`].
    pub fn either(a: TypeCheck, b: TypeCheck) -> TypeCheck {
        TypeCheck::AnyOf(vec![a, b])
    }

    pub fn subtype(base: impl Into<String>) -> TypeCheck {
        TypeCheck::Subtype(base.into())
    }

    pub fn instance(type_name: impl Into<String>) -> TypeCheck {
        TypeCheck::Instance(type_name.into())
    }

    /// Apply this check to a candidate value. Pure; `bindings` exposes the
    /// owning record's already-assigned fields for late-bound element types.
    pub fn check(&self, bindings: &FieldBindings<'_>, candidate: &Value) -> bool {
        match self {
            TypeCheck::Any => true,
            TypeCheck::Bool => matches!(candidate, Value::Bool(_)),
            TypeCheck::Int => matches!(candidate, Value::Int(_)),
            TypeCheck::Float => matches!(candidate, Value::Float(_)),
            TypeCheck::Number => matches!(candidate, Value::Int(_) | Value::Float(_)),
            TypeCheck::Text => matches!(candidate, Value::Text(_)),
            TypeCheck::List => matches!(candidate, Value::List(_)),
            TypeCheck::Map => matches!(candidate, Value::Map(_)),
            TypeCheck::Collection(elem) => match candidate {
                Value::List(items) => match elem.resolve(bindings) {
                    Some(elem_check) => {
                        items.iter().all(|item| elem_check.check(bindings, item))
                    }
                    None => false,
                },
                _ => false,
            },
            TypeCheck::Mapping(key, value) => match candidate {
                Value::Map(entries) => {
                    let (Some(key_check), Some(value_check)) =
                        (key.resolve(bindings), value.resolve(bindings))
                    else {
                        return false;
                    };
                    entries.iter().all(|(k, v)| {
                        key_check.check(bindings, &Value::Text(k.clone()))
                            && value_check.check(bindings, v)
                    })
                }
                _ => false,
            },
            TypeCheck::AnyOf(alternatives) => {
                alternatives.iter().any(|alt| alt.check(bindings, candidate))
            }
            TypeCheck::Subtype(base) => {
                matches!(candidate, Value::Type(token) if token.is_a(base))
            }
            TypeCheck::Instance(type_name) => {
                matches!(candidate, Value::Object(record) if record.token().is_a(type_name))
            }
        }
    }

    /// Render this check for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TypeCheck::Any => "any".to_string(),
            TypeCheck::Bool => "bool".to_string(),
            TypeCheck::Int => "int".to_string(),
            TypeCheck::Float => "float".to_string(),
            TypeCheck::Number => "number".to_string(),
            TypeCheck::Text => "text".to_string(),
            TypeCheck::List => "list".to_string(),
            TypeCheck::Map => "map".to_string(),
            TypeCheck::Collection(elem) => format!("collection({})", elem.describe()),
            TypeCheck::Mapping(key, value) => {
                format!("mapping({}, {})", key.describe(), value.describe())
            }
            TypeCheck::AnyOf(alternatives) => {
                let parts: Vec<String> = alternatives.iter().map(TypeCheck::describe).collect();
                format!("any_of({})", parts.join(" | "))
            }
            TypeCheck::Subtype(base) => format!("subtype({})", base),
            TypeCheck::Instance(type_name) => format!("instance({})", type_name),
        }
    }
}
