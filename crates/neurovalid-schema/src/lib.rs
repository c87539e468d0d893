//! Declarative field/schema layer for neurovalid
//!
//! This crate provides the attribute-contract machinery the rest of the
//! validation framework is built on: a domain author declares typed,
//! validated, optionally-defaulted attributes ("fields") on a schema, and
//! record construction enforces that every declared field is either
//! supplied, defaulted, or reported as missing. No value is ever coerced;
//! validation is a strict contract check, not best-effort conversion.

pub mod field;
pub mod record;
pub mod schema;
pub mod typecheck;
pub mod value;

pub use field::{ClassAttributeSpec, FieldBuilder, FieldSpec, Validator};
pub use record::{construct, FieldBindings, Record, SchemaBearer};
pub use schema::{Schema, SchemaBuilder};
pub use typecheck::{ElemType, TypeCheck};
pub use value::{TypeToken, Value};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A field or schema declaration is self-contradictory
    #[error("Invalid declaration: {0}")]
    Configuration(String),

    /// Candidate value's runtime type does not match the field's type contract
    #[error("Field '{field}' expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Candidate value passed the type check but failed the field's validator
    #[error("Field '{field}' rejected value {value}: {doc}")]
    ValueRejected {
        field: String,
        value: String,
        doc: String,
    },

    /// A required field had neither a preset value nor a keyword argument
    #[error("Missing required field '{field}' when constructing {schema}")]
    MissingRequiredField { field: String, schema: String },

    /// A keyword argument named no declared field
    #[error("Unknown field '{field}' for {schema}")]
    UnknownField { field: String, schema: String },
}

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Build a `BTreeMap<String, Value>` of keyword arguments in place.
///
/// ```
/// use neurovalid_schema::{fields, Value};
///
/// let kwargs = fields! { "age" => 5, "label" => "layer 4" };
/// assert_eq!(kwargs.get("age"), Some(&Value::Int(5)));
/// ```
#[macro_export]
macro_rules! fields {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut kwargs = ::std::collections::BTreeMap::new();
        $(kwargs.insert(::std::string::String::from($name), $crate::Value::from($value));)*
        kwargs
    }};
}
