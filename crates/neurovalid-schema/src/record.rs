//! Record construction - the schema enforcement protocol
//!
//! A `Record` is the validated, immutable product of applying keyword
//! arguments to a [`Schema`]. Construction walks the schema's fields in
//! order and, for each one, takes the first of: a preset value (set by a
//! wrapping constructor), a keyword argument, or the declared default.
//! A required field with none of those fails the whole construction; no
//! partially-initialized record ever escapes.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;

use crate::schema::Schema;
use crate::value::{TypeToken, Value};
use crate::{Result, SchemaError};

static NO_BINDINGS: Lazy<BTreeMap<String, Value>> = Lazy::new(BTreeMap::new);

/// Read-only view of a record's already-assigned fields, handed to type
/// checks and validators while construction is still in progress.
#[derive(Debug, Clone, Copy)]
pub struct FieldBindings<'a> {
    values: &'a BTreeMap<String, Value>,
}

impl<'a> FieldBindings<'a> {
    pub fn new(values: &'a BTreeMap<String, Value>) -> Self {
        Self { values }
    }

    /// Bindings with no assigned fields, for checks outside construction.
    pub fn detached() -> FieldBindings<'static> {
        FieldBindings {
            values: &NO_BINDINGS,
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.values.get(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// A validated instance of a [`Schema`]. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<Schema>,
    values: BTreeMap<String, Value>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name()
            && self.schema.ancestry() == other.schema.ancestry()
            && self.values == other.values
    }
}

impl Record {
    /// Construct a record from keyword arguments alone.
    pub fn build(schema: &Arc<Schema>, kwargs: BTreeMap<String, Value>) -> Result<Record> {
        Self::build_with(schema, BTreeMap::new(), kwargs)
    }

    /// Construct a record from preset values plus keyword arguments.
    ///
    /// Presets model values a wrapping constructor has already decided on;
    /// they are validated exactly like keyword arguments but take
    /// precedence over them. For each field in schema order:
    ///
    /// 1. preset present: validate and assign;
    /// 2. else kwarg present: validate and assign;
    /// 3. else optional: assign the declared default if any, otherwise
    ///    leave unset;
    /// 4. else: fail with `MissingRequiredField`.
    ///
    /// Later fields see earlier assignments through [`FieldBindings`].
    /// Leftover presets or kwargs naming no declared field fail with
    /// `UnknownField`.
    pub fn build_with(
        schema: &Arc<Schema>,
        mut presets: BTreeMap<String, Value>,
        mut kwargs: BTreeMap<String, Value>,
    ) -> Result<Record> {
        let mut values: BTreeMap<String, Value> = BTreeMap::new();

        for field in schema.fields() {
            let candidate = if let Some(preset) = presets.remove(field.name()) {
                // A kwarg shadowed by a preset is still consumed
                kwargs.remove(field.name());
                Some(preset)
            } else if let Some(provided) = kwargs.remove(field.name()) {
                Some(provided)
            } else if field.is_required() {
                debug!(
                    "Construction of {} failed: required field '{}' not supplied",
                    schema.name(),
                    field.name()
                );
                return Err(SchemaError::MissingRequiredField {
                    field: field.name().to_string(),
                    schema: schema.name().to_string(),
                });
            } else {
                field.default().cloned()
            };

            if let Some(candidate) = candidate {
                field.check(&FieldBindings::new(&values), &candidate)?;
                values.insert(field.name().to_string(), candidate);
            }
        }

        if let Some(unknown) = presets.keys().chain(kwargs.keys()).next() {
            return Err(SchemaError::UnknownField {
                field: unknown.clone(),
                schema: schema.name().to_string(),
            });
        }

        debug!(
            "Built {} record with {} assigned fields",
            schema.name(),
            values.len()
        );

        Ok(Record {
            schema: Arc::clone(schema),
            values,
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The record's type identity, usable as a `Value::Type`.
    pub fn token(&self) -> TypeToken {
        self.schema.token()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// True if the field was assigned (supplied or defaulted). Optional
    /// fields without a default stay genuinely unset.
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn bindings(&self) -> FieldBindings<'_> {
        FieldBindings::new(&self.values)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

/// A domain type whose instances are constructed through a schema.
pub trait SchemaBearer {
    /// The type's schema; built once and memoized (typically in a
    /// `once_cell::sync::Lazy` static).
    fn schema() -> Arc<Schema>;
}

/// Construct a schema-bearing domain value from keyword arguments.
pub fn construct<T>(kwargs: BTreeMap<String, Value>) -> Result<T>
where
    T: SchemaBearer + From<Record>,
{
    Ok(T::from(Record::build(&T::schema(), kwargs)?))
}
