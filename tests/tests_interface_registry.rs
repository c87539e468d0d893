//! End-to-end tests of the capability interface protocol: declaring
//! contracts, verifying adapters structurally, and querying the
//! implementation registry the way validations do before invoking
//! capability methods.

use neurovalid::prelude::*;

fn circuit_model() -> Interface {
    Interface::builder("CircuitModel")
        .requires(
            "cell_density",
            "Mean cell density for a brain region, cells per cubic millimeter",
        )
        .requires("layer_thickness", "Cortical layer thickness in micrometers")
        .build()
        .unwrap()
}

fn connectome_model() -> Interface {
    Interface::builder("ConnectomeModel")
        .requires("synapse_count", "Synapse count between two cell groups")
        .build()
        .unwrap()
}

/// Adapter translating an atlas volume into CircuitModel vocabulary.
struct AtlasAdapter;

impl Describes for AtlasAdapter {
    fn profile() -> TypeProfile {
        TypeProfile::new("AtlasAdapter").with_capabilities(["cell_density", "layer_thickness"])
    }
}

impl Adapter for AtlasAdapter {
    fn adapter_tag() -> AdapterTag {
        AdapterTag::new("AtlasVolume").implementing("CircuitModel")
    }
}

#[test]
fn test_structural_conformance_independent_of_ancestry() {
    let interface = circuit_model();

    // AtlasAdapter shares no nominal ancestry with anything; only its
    // capability names matter
    assert!(interface.is_implemented_by(&AtlasAdapter::profile()));

    let partial = TypeProfile::new("DensityOnly").with_capability("cell_density");
    assert_eq!(
        interface.unimplemented(&partial),
        vec!["layer_thickness".to_string()]
    );
}

#[test]
fn test_registration_lifecycle() {
    let registry = InterfaceRegistry::new();
    let interface = circuit_model();

    assert!(!registry.is_registered("CircuitModel", "AtlasAdapter"));

    registry
        .register_implementation(&interface, &AtlasAdapter::profile())
        .unwrap();

    assert!(registry.is_registered("CircuitModel", "AtlasAdapter"));
    assert!(registry.is_implementation("AtlasAdapter"));
    assert_eq!(
        registry.implemented_by("AtlasAdapter"),
        vec!["CircuitModel".to_string()]
    );

    // Registration is idempotent and never revoked
    registry
        .register_implementation(&interface, &AtlasAdapter::profile())
        .unwrap();
    assert_eq!(
        registry.implementations_of("CircuitModel"),
        vec!["AtlasAdapter".to_string()]
    );
    assert_eq!(registry.implementation_count(), 1);
}

#[test]
fn test_rejection_carries_guide() {
    let registry = InterfaceRegistry::new();
    let interface = circuit_model();
    let empty = TypeProfile::new("Empty");

    let err = registry
        .register_implementation(&interface, &empty)
        .unwrap_err();

    match err {
        InterfaceError::NotSatisfied { missing, guide, .. } => {
            assert_eq!(
                missing,
                vec!["cell_density".to_string(), "layer_thickness".to_string()]
            );
            assert!(guide.contains("Interface 'CircuitModel' requires:"));
            assert!(guide.contains("cells per cubic millimeter"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_extended_interface_requires_union() {
    let combined = circuit_model().extend(&connectome_model());

    assert_eq!(combined.name(), "CircuitModel+ConnectomeModel");

    // Implements CircuitModel only: fails against the extended contract
    let registry = InterfaceRegistry::new();
    let result = registry.register_implementation(&combined, &AtlasAdapter::profile());
    match result {
        Err(InterfaceError::NotSatisfied { missing, .. }) => {
            assert_eq!(missing, vec!["synapse_count".to_string()]);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let full = TypeProfile::new("FullAdapter").with_capabilities([
        "cell_density",
        "layer_thickness",
        "synapse_count",
    ]);
    assert!(registry.register_implementation(&combined, &full).is_ok());
}

#[test]
fn test_adapter_declaration_in_one_step() {
    let registry = InterfaceRegistry::new();

    register_adapter(
        &registry,
        &circuit_model(),
        &AtlasAdapter::profile(),
        &AtlasAdapter::adapter_tag(),
    )
    .unwrap();

    assert!(registry.is_registered("CircuitModel", "AtlasAdapter"));
    assert_eq!(
        registry.adapters_for("AtlasVolume"),
        vec!["AtlasAdapter".to_string()]
    );

    let tag = AtlasAdapter::adapter_tag();
    assert_eq!(tag.adapted_type(), "AtlasVolume");
    assert_eq!(tag.implemented_interface(), Some("CircuitModel"));
}

#[test]
fn test_registry_guide_and_snapshot() {
    let registry = InterfaceRegistry::new();
    registry
        .register_implementation(&circuit_model(), &AtlasAdapter::profile())
        .unwrap();

    let guide = registry.implementation_guide("CircuitModel").unwrap();
    assert!(guide.contains("layer_thickness"));

    let snapshot = registry.snapshot();
    assert_eq!(
        snapshot["implementations"]["CircuitModel"],
        serde_json::json!(["AtlasAdapter"])
    );

    assert!(registry.implementation_guide("Unseen").is_err());
}

#[test]
fn test_global_registry_is_shared() {
    // The singleton is append-only and shared across the process; use a
    // uniquely named interface so other tests cannot collide with it
    let interface = Interface::builder("GlobalProbeInterface")
        .requires("probe", "")
        .build()
        .unwrap();
    let profile = TypeProfile::new("GlobalProbeType").with_capability("probe");

    global()
        .register_implementation(&interface, &profile)
        .unwrap();

    assert!(global().is_registered("GlobalProbeInterface", "GlobalProbeType"));
}
