//! Shared test utilities and fixtures for the sapdm test suite.
//!
//! Include this module in your integration tests:
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use std::path::PathBuf;

use sapdm::context::{BoolCoercion, DeploymentContext, RawContext};
use sapdm::manifest::{generate_config, Manifest, TemplateOptions};
use serde_json::Value;
use tempfile::TempDir;

pub const PROJECT: &str = "sap-prod";
pub const PROJECT_NUMBER: &str = "123456789012";
pub const INSTANCE: &str = "db2srv1";

/// A complete, valid context for a DB2 server in `us-central1-a`.
///
/// usrsap and swap are both sized, both SSD flags are off and the instance
/// gets a public address.
pub fn sample_context() -> RawContext {
    RawContext::new()
        .with_env("project", PROJECT)
        .with_env("project_number", PROJECT_NUMBER)
        .with_property("zone", "us-central1-a")
        .with_property("instanceName", INSTANCE)
        .with_property("instanceType", "n1-highmem-32")
        .with_property("windowsImageProject", "windows-cloud")
        .with_property("windowsImage", "family/windows-2016")
        .with_property("subnetwork", "sap-subnet")
        .with_property("publicIP", true)
        .with_property("db2SID", "DEH")
        .with_property("db2sidSize", 100)
        .with_property("db2saptmpSize", 50)
        .with_property("db2logSize", 200)
        .with_property("db2logSSD", false)
        .with_property("db2sapdataSize", 1000)
        .with_property("db2sapdataSSD", false)
        .with_property("db2backupSize", 500)
        .with_property("usrsapSize", 30)
        .with_property("swapSize", 40)
}

/// Fluent builder over [`sample_context`].
pub struct ContextBuilder {
    raw: RawContext,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self {
            raw: sample_context(),
        }
    }

    pub fn property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.raw = self.raw.with_property(key, value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.raw.properties.shift_remove(key);
        self
    }

    pub fn env(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.raw = self.raw.with_env(key, value);
        self
    }

    pub fn build(self) -> RawContext {
        self.raw
    }

    pub fn resolve(self) -> DeploymentContext {
        self.raw.resolve(BoolCoercion::Literal).unwrap()
    }

    pub fn manifest(self) -> Manifest {
        generate_config(&self.resolve(), &TemplateOptions::default())
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `raw` to `<dir>/<name>` in the format its extension implies.
pub fn write_context(dir: &TempDir, name: &str, raw: &RawContext) -> PathBuf {
    let path = dir.path().join(name);
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::to_string_pretty(raw).unwrap(),
        Some("toml") => toml::to_string(raw).unwrap(),
        _ => serde_yaml::to_string(raw).unwrap(),
    };
    std::fs::write(&path, content).unwrap();
    path
}
