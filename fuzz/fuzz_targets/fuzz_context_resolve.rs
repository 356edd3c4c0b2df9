//! Fuzz target for deployment context resolution.
//!
//! Arbitrary property values are resolved under both flag interpretations;
//! any context that resolves must produce a manifest without dangling disk
//! references.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sapdm::context::{BoolCoercion, RawContext};
use sapdm::manifest::{generate_config, TemplateOptions};
use serde_json::Value;

/// Arbitrary property value types for fuzzing
#[derive(Debug, Clone, Arbitrary)]
enum FuzzValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl From<FuzzValue> for Value {
    fn from(value: FuzzValue) -> Self {
        match value {
            FuzzValue::Bool(b) => Value::Bool(b),
            FuzzValue::Int(i) => Value::from(i),
            FuzzValue::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FuzzValue::String(s) => Value::String(s),
            FuzzValue::Null => Value::Null,
        }
    }
}

const PROPERTY_NAMES: &[&str] = &[
    "zone",
    "instanceName",
    "instanceType",
    "windowsImageProject",
    "windowsImage",
    "subnetwork",
    "publicIP",
    "networkTag",
    "serviceAccount",
    "db2SID",
    "db2sidSize",
    "db2saptmpSize",
    "db2logSize",
    "db2sapdataSize",
    "db2backupSize",
    "usrsapSize",
    "swapSize",
    "db2logSSD",
    "db2sapdataSSD",
];

#[derive(Debug, Arbitrary)]
struct FuzzContext {
    project: String,
    project_number: FuzzValue,
    values: Vec<FuzzValue>,
    extra: Vec<(String, FuzzValue)>,
    overrides: Vec<String>,
}

fuzz_target!(|input: FuzzContext| {
    let mut raw = RawContext::new()
        .with_env("project", input.project)
        .with_env("project_number", Value::from(input.project_number));

    for (name, value) in PROPERTY_NAMES.iter().zip(input.values) {
        raw = raw.with_property(*name, Value::from(value));
    }
    for (name, value) in input.extra {
        raw = raw.with_property(name, Value::from(value));
    }
    for assignment in &input.overrides {
        let _ = raw.apply_override(assignment);
    }

    for coercion in [BoolCoercion::Literal, BoolCoercion::Lenient] {
        let problems = raw.problems(coercion);
        if let Ok(ctx) = raw.resolve(coercion) {
            assert!(problems.is_empty());
            let manifest = generate_config(&ctx, &TemplateOptions::default());
            assert!(manifest.dangling_references().is_empty());
            let _ = manifest.to_yaml();
        }
    }
});
