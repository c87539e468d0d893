//! Field and class-attribute declarations
//!
//! A `FieldSpec` declares one named instance attribute: its type contract,
//! an optional semantic validator on top of the type check, whether it is
//! required, and an optional default. Specs are immutable once built and
//! shared by every record of the owning schema. `ClassAttributeSpec` is the
//! schema-level (per-type, not per-instance) counterpart, checked once when
//! a schema supplies or overrides the value.

use std::fmt;
use std::sync::Arc;

use crate::record::FieldBindings;
use crate::typecheck::TypeCheck;
use crate::value::Value;
use crate::{Result, SchemaError};

/// Semantic predicate applied after the structural type check. Receives the
/// owning record's already-assigned fields; must not assume any sibling
/// field is set unless that ordering is documented on the schema.
pub type Validator = Arc<dyn Fn(&FieldBindings<'_>, &Value) -> bool + Send + Sync>;

/// Declaration of one typed, validated instance attribute.
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    value_type: TypeCheck,
    validator: Option<Validator>,
    required: bool,
    default: Option<Value>,
    doc: String,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("value_type", &self.value_type.describe())
            .field("required", &self.required)
            .field("default", &self.default)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

impl FieldSpec {
    /// Start a required field declaration.
    pub fn required(name: impl Into<String>, value_type: TypeCheck) -> FieldBuilder {
        FieldBuilder {
            name: name.into(),
            value_type,
            validator: None,
            required: true,
            default: None,
            doc: String::new(),
        }
    }

    /// Start an optional field declaration.
    pub fn optional(name: impl Into<String>, value_type: TypeCheck) -> FieldBuilder {
        FieldBuilder {
            name: name.into(),
            value_type,
            validator: None,
            required: false,
            default: None,
            doc: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &TypeCheck {
        &self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Check a candidate value against this field's contract.
    ///
    /// Structural check first; on mismatch the error carries the expected
    /// and actual type descriptions. Then the semantic validator, if any;
    /// rejection carries the offending value and this field's doc. Pure.
    pub fn check(&self, bindings: &FieldBindings<'_>, candidate: &Value) -> Result<()> {
        if !self.value_type.check(bindings, candidate) {
            return Err(SchemaError::TypeMismatch {
                field: self.name.clone(),
                expected: self.value_type.describe(),
                actual: candidate.kind().to_string(),
            });
        }

        if let Some(validator) = &self.validator {
            if !validator(bindings, candidate) {
                return Err(SchemaError::ValueRejected {
                    field: self.name.clone(),
                    value: candidate.to_json().to_string(),
                    doc: self.doc.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Builder for [`FieldSpec`]; `build` fails on contradictory declarations.
pub struct FieldBuilder {
    name: String,
    value_type: TypeCheck,
    validator: Option<Validator>,
    required: bool,
    default: Option<Value>,
    doc: String,
}

impl FieldBuilder {
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&FieldBindings<'_>, &Value) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Declare a default, assigned when construction omits this field.
    /// Only meaningful on optional fields; `build` rejects the combination
    /// with `required`.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn build(self) -> Result<FieldSpec> {
        if self.required && self.default.is_some() {
            return Err(SchemaError::Configuration(format!(
                "field '{}' is required and cannot carry a default",
                self.name
            )));
        }

        Ok(FieldSpec {
            name: self.name,
            value_type: self.value_type,
            validator: self.validator,
            required: self.required,
            default: self.default,
            doc: self.doc,
        })
    }
}

/// Declaration of one schema-level constant.
///
/// Unlike a field, a class attribute has no per-record value: the owning
/// schema (or a derived schema overriding it) supplies one value, validated
/// once at schema build time.
#[derive(Clone)]
pub struct ClassAttributeSpec {
    name: String,
    value_type: TypeCheck,
    validator: Option<Validator>,
    doc: String,
}

impl fmt::Debug for ClassAttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassAttributeSpec")
            .field("name", &self.name)
            .field("value_type", &self.value_type.describe())
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

impl ClassAttributeSpec {
    pub fn new(name: impl Into<String>, value_type: TypeCheck) -> Self {
        Self {
            name: name.into(),
            value_type,
            validator: None,
            doc: String::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&FieldBindings<'_>, &Value) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &TypeCheck {
        &self.value_type
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn check(&self, candidate: &Value) -> Result<()> {
        let bindings = FieldBindings::detached();
        if !self.value_type.check(&bindings, candidate) {
            return Err(SchemaError::TypeMismatch {
                field: self.name.clone(),
                expected: self.value_type.describe(),
                actual: candidate.kind().to_string(),
            });
        }

        if let Some(validator) = &self.validator {
            if !validator(&bindings, candidate) {
                return Err(SchemaError::ValueRejected {
                    field: self.name.clone(),
                    value: candidate.to_json().to_string(),
                    doc: self.doc.clone(),
                });
            }
        }

        Ok(())
    }
}
