//! End-to-end tests of the field/schema construction protocol over a
//! miniature validation domain: a cell-density validation parameterized by
//! brain region, sample size, and reference measurements.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use neurovalid::fields;
use neurovalid::prelude::*;
use neurovalid::schema::construct;

static MEASUREMENT: Lazy<Arc<Schema>> = Lazy::new(|| {
    Arc::new(
        Schema::builder("Measurement")
            .with_doc("One reference measurement from the experimental literature")
            .field(
                FieldSpec::required("value", TypeCheck::Number)
                    .with_doc("Measured quantity, non-negative")
                    .with_validator(|_, v| match v {
                        Value::Int(i) => *i >= 0,
                        Value::Float(f) => *f >= 0.0,
                        _ => true,
                    })
                    .build()
                    .expect("Measurement.value is well-formed"),
            )
            .field(
                FieldSpec::optional("citation", TypeCheck::Text)
                    .build()
                    .expect("Measurement.citation is well-formed"),
            )
            .build()
            .expect("Measurement schema is well-formed"),
    )
});

static CELL_DENSITY_VALIDATION: Lazy<Arc<Schema>> = Lazy::new(|| {
    Arc::new(
        Schema::builder("CellDensityValidation")
            .with_doc("Compares model cell densities against reference data")
            .field(
                FieldSpec::required("brain_region", TypeCheck::Text)
                    .with_doc("Region the validation samples, e.g. 'SSp-ll'")
                    .with_validator(|_, v| matches!(v, Value::Text(s) if !s.is_empty()))
                    .build()
                    .expect("brain_region is well-formed"),
            )
            .field(
                FieldSpec::optional("sample_size", TypeCheck::Int)
                    .with_doc("Number of sampled subvolumes")
                    .with_default(20)
                    .build()
                    .expect("sample_size is well-formed"),
            )
            .field(
                FieldSpec::required(
                    "reference_data",
                    TypeCheck::collection(TypeCheck::instance("Measurement")),
                )
                .with_doc("Reference measurements the model is held against")
                .build()
                .expect("reference_data is well-formed"),
            )
            .build()
            .expect("CellDensityValidation schema is well-formed"),
    )
});

fn measurement(value: f64) -> Value {
    Value::from(
        Record::build(&MEASUREMENT, fields! { "value" => value })
            .expect("measurement fixture is valid"),
    )
}

#[test]
fn test_round_trip_construction() {
    let record = Record::build(
        &CELL_DENSITY_VALIDATION,
        fields! {
            "brain_region" => "SSp-ll",
            "reference_data" => vec![measurement(120_000.0)],
        },
    )
    .unwrap();

    assert_eq!(record.get("brain_region"), Some(&Value::from("SSp-ll")));
    assert_eq!(record.get("sample_size"), Some(&Value::Int(20)));
}

#[test]
fn test_missing_required_produces_no_instance() {
    let result = Record::build(
        &CELL_DENSITY_VALIDATION,
        fields! { "brain_region" => "SSp-ll" },
    );

    match result {
        Err(SchemaError::MissingRequiredField { field, schema }) => {
            assert_eq!(field, "reference_data");
            assert_eq!(schema, "CellDensityValidation");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_type_and_value_errors() {
    // Wrong element type inside the reference collection
    let result = Record::build(
        &CELL_DENSITY_VALIDATION,
        fields! {
            "brain_region" => "SSp-ll",
            "reference_data" => vec![Value::Int(1)],
        },
    );
    assert!(matches!(result, Err(SchemaError::TypeMismatch { .. })));

    // Value rejected by the semantic validator
    let result = Record::build(
        &CELL_DENSITY_VALIDATION,
        fields! {
            "brain_region" => "",
            "reference_data" => vec![measurement(1.0)],
        },
    );
    assert!(matches!(result, Err(SchemaError::ValueRejected { .. })));
}

#[test]
fn test_derived_validation_overrides_field() {
    // A stricter validation re-declares sample_size as required
    let strict = Arc::new(
        Schema::builder("StrictCellDensityValidation")
            .derives_from(&CELL_DENSITY_VALIDATION)
            .field(
                FieldSpec::required("sample_size", TypeCheck::Int)
                    .with_validator(|_, v| matches!(v, Value::Int(i) if *i >= 100))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap(),
    );

    let missing = Record::build(
        &strict,
        fields! {
            "brain_region" => "SSp-ll",
            "reference_data" => vec![measurement(1.0)],
        },
    );
    assert!(matches!(
        missing,
        Err(SchemaError::MissingRequiredField { .. })
    ));

    let record = Record::build(
        &strict,
        fields! {
            "brain_region" => "SSp-ll",
            "sample_size" => 200,
            "reference_data" => vec![measurement(1.0)],
        },
    )
    .unwrap();
    assert_eq!(record.get("sample_size"), Some(&Value::Int(200)));
    assert!(record.token().is_a("CellDensityValidation"));
}

#[test]
fn test_schema_bearer_domain_type() {
    struct CellDensityValidation {
        record: Record,
    }

    impl SchemaBearer for CellDensityValidation {
        fn schema() -> Arc<Schema> {
            Arc::clone(&CELL_DENSITY_VALIDATION)
        }
    }

    impl From<Record> for CellDensityValidation {
        fn from(record: Record) -> Self {
            Self { record }
        }
    }

    let validation: CellDensityValidation = construct(fields! {
        "brain_region" => "CA1",
        "reference_data" => vec![measurement(90_000.0)],
    })
    .unwrap();

    assert_eq!(
        validation.record.get("brain_region"),
        Some(&Value::from("CA1"))
    );

    let missing: Result<CellDensityValidation, _> = construct(BTreeMap::new());
    assert!(missing.is_err());
}

#[test]
fn test_reference_data_from_json() {
    // Reference datasets arrive as JSON; scalar payloads map straight into
    // the schema vocabulary
    let json = serde_json::json!({
        "brain_region": "SSp-ll",
        "sample_size": 50,
    });

    let Value::Map(kwargs) = Value::from_json(json) else {
        panic!("expected a map");
    };
    let mut kwargs: BTreeMap<String, Value> = kwargs;
    kwargs.insert(
        "reference_data".to_string(),
        Value::List(vec![measurement(1.0)]),
    );

    let record = Record::build(&CELL_DENSITY_VALIDATION, kwargs).unwrap();
    assert_eq!(record.get("sample_size"), Some(&Value::Int(50)));
}

#[test]
fn test_documentation_lists_all_fields() {
    let doc = CELL_DENSITY_VALIDATION.documentation();

    assert!(doc.contains("CellDensityValidation"));
    assert!(doc.contains("brain_region"));
    assert!(doc.contains("sample_size"));
    assert!(doc.contains("reference_data"));
    assert!(doc.contains("Region the validation samples"));
}

use neurovalid::schema::Value as SchemaValue;

#[test]
fn test_prelude_and_module_paths_agree() {
    // The umbrella re-exports the same types under both paths
    let via_prelude: Value = Value::Int(1);
    let via_module: SchemaValue = SchemaValue::Int(1);
    assert_eq!(via_prelude, via_module);
}
