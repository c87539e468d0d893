//! # neurovalid
//!
//! Declarative schema validation and capability interfaces for validating
//! brain-circuit models against experimental reference data.
//!
//! The framework's domain code (sampling, statistics, plotting) consumes
//! two pieces of shared infrastructure, which this crate provides:
//!
//! - **Schema layer** ([`schema`]): domain types declare typed, validated,
//!   optionally-defaulted fields; constructing a record enforces that every
//!   required field was supplied and every value satisfies its contract.
//! - **Capability layer** ([`interfaces`]): validations declare the
//!   capabilities they need from a model as an `Interface`; adapters are
//!   verified structurally and recorded in an implementation registry
//!   before any capability method is invoked.
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use neurovalid::prelude::*;
//! use neurovalid::fields;
//!
//! // Declare a schema with typed, validated fields
//! let schema = Arc::new(
//!     Schema::builder("CellDensityMeasurement")
//!         .field(
//!             FieldSpec::required("density", TypeCheck::Float)
//!                 .with_doc("Cells per cubic millimeter, non-negative")
//!                 .with_validator(|_, v| matches!(v, Value::Float(f) if *f >= 0.0))
//!                 .build()?,
//!         )
//!         .build()?,
//! );
//!
//! // Construct a validated record from keyword arguments
//! let record = Record::build(&schema, fields! { "density" => 120_000.0 })?;
//! assert!(record.is_set("density"));
//!
//! // Declare a capability contract and verify an adapter against it
//! let circuit_model = Interface::builder("CircuitModel")
//!     .requires("cell_density", "Mean cell density for a brain region")
//!     .build()?;
//! let adapter = TypeProfile::new("AtlasAdapter").with_capability("cell_density");
//!
//! let registry = InterfaceRegistry::new();
//! registry.register_implementation(&circuit_model, &adapter)?;
//! assert!(registry.is_registered("CircuitModel", "AtlasAdapter"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Schema layer: neurovalid-schema                        │
//! │  (FieldSpec, TypeCheck, Schema, Record)                 │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Capability layer: neurovalid-interfaces                │
//! │  (Interface, TypeProfile, Adapter, registry)            │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Domain consumers (external): sampling, statistics,     │
//! │  plotting, report templating                            │
//! └─────────────────────────────────────────────────────────┘
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export the schema layer
pub use neurovalid_schema as schema;

// Re-export the capability layer
pub use neurovalid_interfaces as interfaces;

pub use neurovalid_schema::fields;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::interfaces::{
        global, register_adapter, Adapter, AdapterTag, Describes, Interface, InterfaceError,
        InterfaceRegistry, TypeProfile,
    };
    pub use crate::schema::{
        construct, ClassAttributeSpec, FieldSpec, Record, Schema, SchemaBearer, SchemaError,
        TypeCheck, TypeToken, Value,
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        // Just test that re-exports work
        use crate::prelude::*;
        let _spec = FieldSpec::required("x", TypeCheck::Int).build().unwrap();
        let _registry = InterfaceRegistry::new();
        assert!(!crate::VERSION.is_empty());
    }
}
