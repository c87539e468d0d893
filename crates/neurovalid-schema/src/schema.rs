//! Per-type schema tables and inheritance
//!
//! A `Schema` is the explicit, immutable declaration table for one domain
//! type: its ordered fields, its class attributes with their validated
//! values, and its ancestry. Schemas are built once per type (usually in a
//! memoized static) and shared by every record constructed from them.
//!
//! Inheritance is a merge at build time: a derived schema starts from its
//! parent's fields in declaration order, then appends its own new fields;
//! redeclaring an inherited name replaces the parent's spec in place, so
//! the most-derived declaration wins without disturbing the ordering
//! guarantees sibling validators rely on.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::field::{ClassAttributeSpec, FieldSpec};
use crate::value::{TypeToken, Value};
use crate::{Result, SchemaError};

/// Immutable declaration table for one domain type.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    ancestry: Vec<String>,
    doc: String,
    fields: Vec<FieldSpec>,
    class_attributes: Vec<ClassAttributeSpec>,
    class_values: BTreeMap<String, Value>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            parent: None,
            doc: String::new(),
            fields: Vec::new(),
            class_attributes: Vec::new(),
            class_values: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base schema names, nearest first.
    pub fn ancestry(&self) -> &[String] {
        &self.ancestry
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Declared fields in processing order: inherited (not overridden in
    /// place) before own.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn class_attributes(&self) -> impl Iterator<Item = &ClassAttributeSpec> {
        self.class_attributes.iter()
    }

    /// Validated schema-level constant, own or inherited.
    pub fn class_value(&self, name: &str) -> Option<&Value> {
        self.class_values.get(name)
    }

    /// This schema's identity as a first-class value.
    pub fn token(&self) -> TypeToken {
        TypeToken {
            name: self.name.clone(),
            ancestry: self.ancestry.clone(),
        }
    }

    /// Render the declared fields and class attributes into a docstring.
    ///
    /// This is documentation tooling only; nothing in the construction
    /// protocol consumes the rendered text.
    pub fn documentation(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name);
        if !self.doc.is_empty() {
            let _ = writeln!(out, "{}", self.doc);
        }

        if !self.fields.is_empty() {
            let _ = writeln!(out, "\nFields:");
            for field in &self.fields {
                let requirement = if field.is_required() {
                    "required".to_string()
                } else {
                    match field.default() {
                        Some(default) => format!("optional, default={}", default.to_json()),
                        None => "optional".to_string(),
                    }
                };
                let _ = writeln!(
                    out,
                    "  {} : {} ({})",
                    field.name(),
                    field.value_type().describe(),
                    requirement
                );
                if !field.doc().is_empty() {
                    let _ = writeln!(out, "      {}", field.doc());
                }
            }
        }

        if !self.class_attributes.is_empty() {
            let _ = writeln!(out, "\nClass attributes:");
            for attribute in &self.class_attributes {
                let _ = writeln!(
                    out,
                    "  {} : {}",
                    attribute.name(),
                    attribute.value_type().describe()
                );
                if !attribute.doc().is_empty() {
                    let _ = writeln!(out, "      {}", attribute.doc());
                }
                if let Some(value) = self.class_values.get(attribute.name()) {
                    let _ = writeln!(out, "      value: {}", value.to_json());
                }
            }
        }

        out
    }
}

/// Builder producing an immutable [`Schema`].
pub struct SchemaBuilder {
    name: String,
    parent: Option<Schema>,
    doc: String,
    fields: Vec<FieldSpec>,
    class_attributes: Vec<ClassAttributeSpec>,
    class_values: BTreeMap<String, Value>,
}

impl SchemaBuilder {
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Inherit fields, class attributes, and class values from a parent
    /// schema. At most one parent; a second call replaces the first.
    pub fn derives_from(mut self, parent: &Schema) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn class_attribute(mut self, attribute: ClassAttributeSpec) -> Self {
        self.class_attributes.push(attribute);
        self
    }

    /// Supply (or override) the value of a declared class attribute.
    pub fn class_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.class_values.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Schema> {
        // Own declarations must not collide with each other
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name() == field.name()) {
                return Err(SchemaError::Configuration(format!(
                    "schema '{}' declares field '{}' twice",
                    self.name,
                    field.name()
                )));
            }
        }
        for (i, attribute) in self.class_attributes.iter().enumerate() {
            if self.class_attributes[..i]
                .iter()
                .any(|a| a.name() == attribute.name())
            {
                return Err(SchemaError::Configuration(format!(
                    "schema '{}' declares class attribute '{}' twice",
                    self.name,
                    attribute.name()
                )));
            }
        }

        let (mut fields, mut class_attributes, mut class_values, ancestry) = match &self.parent {
            Some(parent) => {
                let mut ancestry = Vec::with_capacity(parent.ancestry.len() + 1);
                ancestry.push(parent.name.clone());
                ancestry.extend(parent.ancestry.iter().cloned());
                (
                    parent.fields.clone(),
                    parent.class_attributes.clone(),
                    parent.class_values.clone(),
                    ancestry,
                )
            }
            None => (Vec::new(), Vec::new(), BTreeMap::new(), Vec::new()),
        };

        // Merge own fields: an override replaces the inherited spec in
        // place, keeping its position; new fields append in declaration
        // order.
        for field in self.fields {
            match fields.iter().position(|f| f.name() == field.name()) {
                Some(index) => fields[index] = field,
                None => fields.push(field),
            }
        }
        for attribute in self.class_attributes {
            match class_attributes
                .iter()
                .position(|a| a.name() == attribute.name())
            {
                Some(index) => class_attributes[index] = attribute,
                None => class_attributes.push(attribute),
            }
        }

        // Own class values override inherited ones, then everything
        // supplied is validated against the nearest declaration.
        class_values.extend(self.class_values);
        for (name, value) in &class_values {
            let Some(attribute) = class_attributes.iter().find(|a| a.name() == name.as_str())
            else {
                return Err(SchemaError::Configuration(format!(
                    "schema '{}' supplies a value for undeclared class attribute '{}'",
                    self.name, name
                )));
            };
            attribute.check(value)?;
        }

        Ok(Schema {
            name: self.name,
            ancestry,
            doc: self.doc,
            fields,
            class_attributes,
            class_values,
        })
    }
}
