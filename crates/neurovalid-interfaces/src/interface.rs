//! Interface contracts and type profiles

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{InterfaceError, Result};

/// A named capability contract: the set of capability names a conforming
/// type must provide, each with a doc string used to build the
/// implementation guide. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    name: String,
    /// capability name -> documentation
    requirements: BTreeMap<String, String>,
}

impl Interface {
    pub fn builder(name: impl Into<String>) -> InterfaceBuilder {
        InterfaceBuilder {
            name: name.into(),
            requirements: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement_names(&self) -> impl Iterator<Item = &str> {
        self.requirements.keys().map(String::as_str)
    }

    pub fn requires(&self, capability: &str) -> bool {
        self.requirements.contains_key(capability)
    }

    /// Every required capability name not provided by the profile. Pure
    /// structural query; sorted.
    pub fn unimplemented(&self, profile: &TypeProfile) -> Vec<String> {
        self.requirements
            .keys()
            .filter(|name| !profile.provides(name))
            .cloned()
            .collect()
    }

    pub fn is_implemented_by(&self, profile: &TypeProfile) -> bool {
        self.unimplemented(profile).is_empty()
    }

    /// Combine two contracts into one requiring the union of both. On a
    /// doc collision the left interface's doc wins.
    pub fn extend(&self, other: &Interface) -> Interface {
        let mut requirements = other.requirements.clone();
        requirements.extend(self.requirements.clone());
        Interface {
            name: format!("{}+{}", self.name, other.name),
            requirements,
        }
    }

    /// Human-readable listing of required capabilities and their docs.
    /// Diagnostics only; no control flow consumes it.
    pub fn implementation_guide(&self) -> String {
        let mut guide = format!("Interface '{}' requires:\n", self.name);
        for (name, doc) in &self.requirements {
            if doc.is_empty() {
                guide.push_str(&format!("  - {}\n", name));
            } else {
                guide.push_str(&format!("  - {}: {}\n", name, doc));
            }
        }
        guide
    }
}

/// Builder for [`Interface`].
pub struct InterfaceBuilder {
    name: String,
    requirements: BTreeMap<String, String>,
}

impl InterfaceBuilder {
    /// Declare a required capability with its documentation.
    pub fn requires(mut self, capability: impl Into<String>, doc: impl Into<String>) -> Self {
        self.requirements.insert(capability.into(), doc.into());
        self
    }

    pub fn build(self) -> Result<Interface> {
        if self.requirements.is_empty() {
            return Err(InterfaceError::EmptyContract(self.name));
        }
        Ok(Interface {
            name: self.name,
            requirements: self.requirements,
        })
    }
}

/// Structural description of a concrete type: its name and the capability
/// names it provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeProfile {
    type_name: String,
    capabilities: BTreeSet<String>,
}

impl TypeProfile {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities
            .extend(capabilities.into_iter().map(Into::into));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn provides(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn capability_names(&self) -> impl Iterator<Item = &str> {
        self.capabilities.iter().map(String::as_str)
    }
}

/// Implemented by concrete types that can describe their own capabilities.
pub trait Describes {
    fn profile() -> TypeProfile;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurable() -> Interface {
        Interface::builder("Measurable")
            .requires("measure", "Return the measured quantity")
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_contract_rejected() {
        let result = Interface::builder("Hollow").build();
        assert!(matches!(result, Err(InterfaceError::EmptyContract(_))));
    }

    #[test]
    fn test_conformance_is_structural() {
        let interface = measurable();

        let gauge = TypeProfile::new("Gauge").with_capability("measure");
        let empty = TypeProfile::new("Empty");

        assert!(interface.is_implemented_by(&gauge));
        assert!(!interface.is_implemented_by(&empty));
        assert_eq!(interface.unimplemented(&empty), vec!["measure".to_string()]);
        assert!(interface.unimplemented(&gauge).is_empty());
    }

    #[test]
    fn test_extend_unions_requirements() {
        let a = Interface::builder("A").requires("x", "").build().unwrap();
        let b = Interface::builder("B").requires("y", "").build().unwrap();

        let combined = a.extend(&b);
        assert_eq!(combined.name(), "A+B");
        assert!(combined.requires("x"));
        assert!(combined.requires("y"));

        // A type implementing only x fails the extended contract
        let partial = TypeProfile::new("OnlyX").with_capability("x");
        assert_eq!(combined.unimplemented(&partial), vec!["y".to_string()]);
    }

    #[test]
    fn test_extend_doc_collision_left_wins() {
        let a = Interface::builder("A")
            .requires("x", "left doc")
            .build()
            .unwrap();
        let b = Interface::builder("B")
            .requires("x", "right doc")
            .build()
            .unwrap();

        let combined = a.extend(&b);
        assert!(combined.implementation_guide().contains("left doc"));
        assert!(!combined.implementation_guide().contains("right doc"));
    }

    #[test]
    fn test_implementation_guide() {
        let interface = Interface::builder("CircuitModel")
            .requires("neuron_density", "Neuron count per cubic millimeter")
            .requires("layer_thickness", "")
            .build()
            .unwrap();

        let guide = interface.implementation_guide();
        assert!(guide.contains("Interface 'CircuitModel' requires:"));
        assert!(guide.contains("- neuron_density: Neuron count per cubic millimeter"));
        assert!(guide.contains("- layer_thickness\n"));
    }

    #[test]
    fn test_profile_capabilities() {
        let profile = TypeProfile::new("AtlasAdapter")
            .with_capabilities(["neuron_density", "layer_thickness"]);

        assert_eq!(profile.type_name(), "AtlasAdapter");
        assert!(profile.provides("neuron_density"));
        assert!(!profile.provides("synapse_count"));
        assert_eq!(profile.capability_names().count(), 2);
    }
}
