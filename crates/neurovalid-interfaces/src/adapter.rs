//! Adapter declarations
//!
//! An adapter translates a foreign type (a circuit model, an atlas, a raw
//! dataset) into the vocabulary an interface expects. The tag is purely
//! declarative: it records which type is adapted and, optionally, which
//! interface the adapter is registered against, and makes both facts
//! introspectable. All behavior lives in the adapter type itself.

use serde::{Deserialize, Serialize};

use crate::interface::{Interface, TypeProfile};
use crate::registry::InterfaceRegistry;
use crate::Result;

/// Declarative marker pairing an adapter with the foreign type it adapts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterTag {
    adapted_type: String,
    implemented_interface: Option<String>,
}

impl AdapterTag {
    pub fn new(adapted_type: impl Into<String>) -> Self {
        Self {
            adapted_type: adapted_type.into(),
            implemented_interface: None,
        }
    }

    /// Also name the interface this adapter is registered against.
    pub fn implementing(mut self, interface_name: impl Into<String>) -> Self {
        self.implemented_interface = Some(interface_name.into());
        self
    }

    pub fn adapted_type(&self) -> &str {
        &self.adapted_type
    }

    pub fn implemented_interface(&self) -> Option<&str> {
        self.implemented_interface.as_deref()
    }
}

/// Implemented by concrete adapter types to expose their tag.
pub trait Adapter {
    fn adapter_tag() -> AdapterTag;
}

/// Declare an adapter in one step: verify and register the adapter type
/// against the interface, then record the adapted-type mapping so
/// `adapters_for` queries can find it.
pub fn register_adapter(
    registry: &InterfaceRegistry,
    interface: &Interface,
    profile: &TypeProfile,
    tag: &AdapterTag,
) -> Result<()> {
    registry.register_implementation(interface, profile)?;
    registry.record_adapter(tag.adapted_type(), profile.type_name());
    Ok(())
}
