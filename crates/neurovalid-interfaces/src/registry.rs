//! Implementation registry
//!
//! Records which concrete types have been verified against which
//! interfaces. The registry is append-only: a (interface, type) pair moves
//! from unregistered to registered at most once and is never revoked;
//! re-registration re-validates and leaves a single entry.
//!
//! Registries are ordinary values so tests can use isolated instances; the
//! process-wide singleton behind [`global`] exists for drop-in use by
//! applications with a single initialization path.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use log::{debug, info, warn};
use once_cell::sync::Lazy;

use crate::interface::{Interface, TypeProfile};
use crate::{InterfaceError, Result};

#[derive(Default)]
struct RegistryState {
    /// Interface definitions seen at registration, for guide queries
    interfaces: HashMap<String, Interface>,

    /// interface name -> verified implementation type names
    implementations: HashMap<String, BTreeSet<String>>,

    /// type name -> interfaces the type is registered against
    implemented_by: HashMap<String, BTreeSet<String>>,

    /// adapted type name -> adapter type names
    adapters: HashMap<String, BTreeSet<String>>,
}

/// Append-only record of verified interface implementations.
pub struct InterfaceRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState::default())),
        }
    }

    /// Verify a type against an interface and record it.
    ///
    /// Recomputes the structural conformance check on every call; a type
    /// missing any required capability is rejected with the missing names
    /// and the interface's implementation guide, and the registry is left
    /// untouched. Idempotent on success.
    pub fn register_implementation(
        &self,
        interface: &Interface,
        profile: &TypeProfile,
    ) -> Result<()> {
        debug!(
            "Registration request: {} against interface {}",
            profile.type_name(),
            interface.name()
        );

        let missing = interface.unimplemented(profile);
        if !missing.is_empty() {
            warn!(
                "Type {} does not satisfy interface {} (missing: {:?})",
                profile.type_name(),
                interface.name(),
                missing
            );
            return Err(InterfaceError::NotSatisfied {
                interface: interface.name().to_string(),
                type_name: profile.type_name().to_string(),
                missing,
                guide: interface.implementation_guide(),
            });
        }

        let mut state = self.state.write().unwrap();

        state
            .interfaces
            .entry(interface.name().to_string())
            .or_insert_with(|| interface.clone());
        let newly_added = state
            .implementations
            .entry(interface.name().to_string())
            .or_default()
            .insert(profile.type_name().to_string());
        state
            .implemented_by
            .entry(profile.type_name().to_string())
            .or_default()
            .insert(interface.name().to_string());

        if newly_added {
            info!(
                "✓ Implementation registered: {} satisfies {}",
                profile.type_name(),
                interface.name()
            );
        } else {
            debug!(
                "Re-registration of {} against {} (already recorded)",
                profile.type_name(),
                interface.name()
            );
        }

        Ok(())
    }

    /// Record that an adapter type translates an adapted type. Called by
    /// [`crate::register_adapter`] alongside implementation registration.
    pub(crate) fn record_adapter(&self, adapted_type: &str, adapter_type: &str) {
        let mut state = self.state.write().unwrap();
        state
            .adapters
            .entry(adapted_type.to_string())
            .or_default()
            .insert(adapter_type.to_string());
    }

    /// True if the (interface, type) pair has been registered.
    pub fn is_registered(&self, interface_name: &str, type_name: &str) -> bool {
        let state = self.state.read().unwrap();
        state
            .implementations
            .get(interface_name)
            .is_some_and(|types| types.contains(type_name))
    }

    /// Verified implementation type names of an interface, sorted.
    pub fn implementations_of(&self, interface_name: &str) -> Vec<String> {
        let state = self.state.read().unwrap();
        state
            .implementations
            .get(interface_name)
            .map(|types| types.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Interfaces a type has been registered against, sorted.
    pub fn implemented_by(&self, type_name: &str) -> Vec<String> {
        let state = self.state.read().unwrap();
        state
            .implemented_by
            .get(type_name)
            .map(|interfaces| interfaces.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// True if the type has been registered against any interface.
    pub fn is_implementation(&self, type_name: &str) -> bool {
        let state = self.state.read().unwrap();
        state.implemented_by.contains_key(type_name)
    }

    /// Adapter type names recorded for an adapted type, sorted.
    pub fn adapters_for(&self, adapted_type: &str) -> Vec<String> {
        let state = self.state.read().unwrap();
        state
            .adapters
            .get(adapted_type)
            .map(|adapters| adapters.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The implementation guide of a registered interface.
    pub fn implementation_guide(&self, interface_name: &str) -> Result<String> {
        let state = self.state.read().unwrap();
        state
            .interfaces
            .get(interface_name)
            .map(Interface::implementation_guide)
            .ok_or_else(|| InterfaceError::UnknownInterface(interface_name.to_string()))
    }

    /// JSON snapshot of the registry contents, for reports and debugging.
    pub fn snapshot(&self) -> serde_json::Value {
        let state = self.state.read().unwrap();
        let implementations: serde_json::Map<String, serde_json::Value> = state
            .implementations
            .iter()
            .map(|(interface, types)| {
                (
                    interface.clone(),
                    serde_json::Value::Array(
                        types
                            .iter()
                            .map(|t| serde_json::Value::String(t.clone()))
                            .collect(),
                    ),
                )
            })
            .collect();
        let adapters: serde_json::Map<String, serde_json::Value> = state
            .adapters
            .iter()
            .map(|(adapted, adapter_types)| {
                (
                    adapted.clone(),
                    serde_json::Value::Array(
                        adapter_types
                            .iter()
                            .map(|t| serde_json::Value::String(t.clone()))
                            .collect(),
                    ),
                )
            })
            .collect();
        serde_json::json!({
            "implementations": implementations,
            "adapters": adapters,
        })
    }

    pub fn interface_count(&self) -> usize {
        self.state.read().unwrap().interfaces.len()
    }

    pub fn implementation_count(&self) -> usize {
        let state = self.state.read().unwrap();
        state.implementations.values().map(BTreeSet::len).sum()
    }
}

static GLOBAL: Lazy<InterfaceRegistry> = Lazy::new(InterfaceRegistry::new);

/// The process-wide registry. Lives for the process lifetime; tests should
/// prefer isolated `InterfaceRegistry` instances.
pub fn global() -> &'static InterfaceRegistry {
    &GLOBAL
}
