//! CLI tests for sapdm
//!
//! This test suite covers:
//! - Subcommand parsing
//! - Manifest output in YAML and JSON
//! - Property and environment overrides
//! - Exit codes for invalid contexts
//! - Integration testing with assert_cmd

mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use sapdm::context::RawContext;
use tempfile::{tempdir, TempDir};

// Helper to get a command for testing, isolated from local config files
fn sapdm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sapdm").unwrap();
    cmd.env("SAPDM_CONFIG", "/nonexistent/sapdm.toml")
        .env_remove("GOOGLE_CLOUD_PROJECT")
        .env_remove("SAPDM_OUTPUT_FORMAT")
        .env_remove("SAPDM_BOOL_COERCION")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn context_file(raw: &RawContext) -> (TempDir, String) {
    let dir = tempdir().unwrap();
    let path = write_context(&dir, "db2srv1.yaml", raw);
    (dir, path.display().to_string())
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    sapdm_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("properties"));
}

#[test]
fn test_version() {
    sapdm_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    sapdm_cmd().arg("deploy").assert().failure();
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn test_generate_yaml_to_stdout() {
    let (_dir, path) = context_file(&sample_context());

    sapdm_cmd()
        .args(["generate", &path])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("resources:"))
        .stdout(predicate::str::contains("type: compute.v1.disk"))
        .stdout(predicate::str::contains("type: compute.v1.instance"))
        .stdout(predicate::str::contains("ref.db2srv1-swap.selfLink"));
}

#[test]
fn test_generate_json() {
    let (_dir, path) = context_file(&sample_context());

    let output = sapdm_cmd()
        .args(["generate", &path, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let manifest: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let resources = manifest["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 8);
    assert_eq!(resources[7]["name"], "db2srv1");
}

#[test]
fn test_generate_to_file() {
    let (dir, path) = context_file(&sample_context());
    let out = dir.path().join("manifest.yaml");

    sapdm_cmd()
        .args(["generate", &path, "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("name: db2srv1-db2sid"));
}

#[test]
fn test_generate_with_overrides() {
    let (_dir, path) = context_file(&sample_context());

    sapdm_cmd()
        .args(["generate", &path, "-p", "swapSize=0", "-p", "usrsapSize=0"])
        .args(["--project", "other-project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("db2srv1-swap").not())
        .stdout(predicate::str::contains("db2srv1-usrsap").not())
        .stdout(predicate::str::contains("projects/other-project/zones"));
}

#[test]
fn test_generate_project_from_environment() {
    let mut raw = ContextBuilder::new().build();
    raw.env.shift_remove("project");
    let (_dir, path) = context_file(&raw);

    sapdm_cmd()
        .env("GOOGLE_CLOUD_PROJECT", "env-project")
        .args(["generate", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("projects/env-project/regions/us-central1"));
}

#[test]
fn test_generate_missing_properties_exit_code() {
    let raw = ContextBuilder::new()
        .without("zone")
        .without("db2logSize")
        .build();
    let (_dir, path) = context_file(&raw);

    sapdm_cmd()
        .args(["generate", &path])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("zone"))
        .stderr(predicate::str::contains("db2logSize"));
}

#[test]
fn test_generate_lenient_booleans() {
    let raw = ContextBuilder::new().property("publicIP", "maybe").build();
    let (_dir, path) = context_file(&raw);

    // Literal mode treats anything but "False" as enabled.
    sapdm_cmd()
        .args(["generate", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("ONE_TO_ONE_NAT"));

    sapdm_cmd()
        .args(["generate", &path, "--lenient-booleans"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("publicIP"));
}

#[test]
fn test_generate_missing_file_fails() {
    sapdm_cmd()
        .args(["generate", "/nonexistent/db2srv1.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("db2srv1.yaml"));
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_valid_context() {
    let (_dir, path) = context_file(&sample_context());

    sapdm_cmd()
        .args(["validate", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("us-central1"))
        .stdout(predicate::str::contains("subnetworks/sap-subnet"))
        .stderr(predicate::str::contains("valid"));
}

#[test]
fn test_validate_reports_every_problem() {
    let raw = ContextBuilder::new()
        .without("instanceType")
        .property("zone", "nowhere")
        .property("swapSize", "big")
        .build();
    let (_dir, path) = context_file(&raw);

    sapdm_cmd()
        .args(["validate", &path])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("instanceType"))
        .stderr(predicate::str::contains("nowhere"))
        .stderr(predicate::str::contains("swapSize"));
}

#[test]
fn test_validate_json_report() {
    let (_dir, path) = context_file(&sample_context());

    let output = sapdm_cmd()
        .args(["validate", &path, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], true);
    assert_eq!(report["summary"]["resources"], 8);
    assert_eq!(report["summary"]["disks"], 7);
    assert_eq!(report["summary"]["region"], "us-central1");
}

// ============================================================================
// properties
// ============================================================================

#[test]
fn test_properties_table() {
    sapdm_cmd()
        .args(["properties", "--volumes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("db2sapdataSSD"))
        .stdout(predicate::str::contains("swapSize"))
        .stdout(predicate::str::contains("P:"));
}

#[test]
fn test_properties_json() {
    let output = sapdm_cmd()
        .args(["properties", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let properties = listing["properties"].as_array().unwrap();
    assert_eq!(properties.len(), 19);
    assert_eq!(properties[0]["name"], "zone");
    assert_eq!(properties[0]["required"], true);
    assert_eq!(listing["env"], serde_json::json!(["project", "project_number"]));
}
