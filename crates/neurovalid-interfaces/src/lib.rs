//! Capability interfaces and implementation registry for neurovalid
//!
//! A validation asks "does this model answer the measurements I need?"
//! before it runs. This crate provides the vocabulary for that question:
//! an `Interface` names the capabilities a conforming type must provide,
//! a `TypeProfile` describes what a concrete type actually provides, and
//! the `InterfaceRegistry` records which types have been verified against
//! which interfaces. Conformance is structural - a type satisfies an
//! interface iff every required capability name resolves on it, regardless
//! of nominal ancestry.

pub mod adapter;
pub mod interface;
pub mod registry;

pub use adapter::{register_adapter, Adapter, AdapterTag};
pub use interface::{Describes, Interface, InterfaceBuilder, TypeProfile};
pub use registry::{global, InterfaceRegistry};

#[derive(Debug, thiserror::Error)]
pub enum InterfaceError {
    /// A candidate type is missing required capabilities; carries the
    /// missing names and the interface's implementation guide
    #[error("Type '{type_name}' does not satisfy interface '{interface}': missing {missing:?}")]
    NotSatisfied {
        interface: String,
        type_name: String,
        missing: Vec<String>,
        guide: String,
    },

    /// An interface declaration without any required capability
    #[error("Interface '{0}' declares no required capabilities")]
    EmptyContract(String),

    /// A registry query named an interface never seen by the registry
    #[error("Interface not known to this registry: {0}")]
    UnknownInterface(String),
}

pub type Result<T> = std::result::Result<T, InterfaceError>;
