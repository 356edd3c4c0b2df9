//! Deployment context handling.
//!
//! A [`RawContext`] holds the two namespaces a Deployment Manager template
//! sees: `properties` (user inputs) and `env` (facts about the deployment).
//! [`RawContext::resolve`] validates both once, up front, and produces a typed
//! [`DeploymentContext`]. Every missing required field is reported in a
//! single [`Error::MissingProperties`].

pub mod properties;

pub use properties::{
    default_service_account, parse_network_tags, BoolCoercion, Db2WinProperties, Environment,
    PropertyKind, PropertySpec, SubnetworkRef, Zone, PROPERTY_CONTRACT, REQUIRED_ENV,
};

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// An ordered bag of named values.
pub type PropertyBag = IndexMap<String, Value>;

/// Helper trait for extracting values from a [`PropertyBag`].
///
/// A `null` value counts as absent.
pub trait PropertyExt {
    fn get_present(&self, key: &str) -> Option<&Value>;
    fn has(&self, key: &str) -> bool;
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_string_required(&self, key: &str) -> Result<String>;
    fn get_string_or(&self, key: &str, default: &str) -> String;
    fn get_i64(&self, key: &str) -> Result<Option<i64>>;
    fn get_i64_required(&self, key: &str) -> Result<i64>;
}

impl PropertyExt for PropertyBag {
    fn get_present(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !v.is_null())
    }

    fn has(&self, key: &str) -> bool {
        self.get_present(key).is_some()
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get_present(key).map(stringify)
    }

    fn get_string_required(&self, key: &str) -> Result<String> {
        self.get_string(key).ok_or_else(|| Error::MissingProperties {
            missing: vec![key.to_string()],
        })
    }

    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

    fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        match self.get_present(key) {
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Some(i));
                }
                match n.as_f64() {
                    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Ok(Some(f as i64))
                    }
                    Some(f) if f.fract() == 0.0 => {
                        Err(Error::invalid_property(key, format!("{} is out of range", n)))
                    }
                    _ => Err(Error::invalid_property(key, "must be a whole number of GB")),
                }
            }
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::invalid_property(key, format!("'{}' is not an integer", s))),
            Some(_) => Err(Error::invalid_property(key, "must be an integer")),
            None => Ok(None),
        }
    }

    fn get_i64_required(&self, key: &str) -> Result<i64> {
        self.get_i64(key)?.ok_or_else(|| Error::MissingProperties {
            missing: vec![key.to_string()],
        })
    }
}

/// Render a value the way the template language stringifies it: booleans
/// become `True`/`False`, strings are used verbatim.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

/// Unvalidated deployment context as read from a file or assembled in code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContext {
    /// Deployment environment facts (`project`, `project_number`)
    pub env: PropertyBag,
    /// Template properties
    pub properties: PropertyBag,
}

impl RawContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Load a context file. The format follows the extension (`yml`/`yaml`,
    /// `json`, `toml`); anything else is tried as YAML, then JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::context_load(path, e.to_string()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        debug!(path = %path.display(), extension, "loading deployment context");

        let parsed: std::result::Result<RawContext, String> = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
            "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str(&content)
                .or_else(|_| serde_json::from_str(&content))
                .map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| Error::context_load(path, message))
    }

    /// Apply a `key=value` property override.
    ///
    /// Values of string properties (`db2SID`, `zone`, ...) are kept verbatim.
    /// Everything else is read as a YAML scalar, so `swapSize=0` is a number
    /// and `publicIP=false` a boolean.
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (key, raw) = assignment.split_once('=').ok_or_else(|| {
            Error::invalid_property(assignment, "override must have the form key=value")
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::invalid_property(assignment, "override key is empty"));
        }

        let is_string = PROPERTY_CONTRACT
            .iter()
            .any(|spec| spec.name == key && spec.kind == PropertyKind::String);
        let value = if is_string {
            Value::String(raw.to_string())
        } else {
            serde_yaml::from_str::<Value>(raw)
                .ok()
                .filter(|v| !v.is_object() && !v.is_array())
                .unwrap_or_else(|| Value::String(raw.to_string()))
        };
        debug!(key, %value, "property override");
        self.properties.insert(key.to_string(), value);
        Ok(())
    }

    /// All required properties and environment facts that are absent.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing: Vec<String> = properties::required_properties()
            .filter(|name| !self.properties.has(name))
            .map(String::from)
            .collect();
        missing.extend(
            REQUIRED_ENV
                .iter()
                .filter(|name| !self.env.has(name))
                .map(|name| format!("env.{}", name)),
        );
        missing
    }

    /// Every problem that keeps this context from resolving, not just the
    /// first one [`resolve`](Self::resolve) would stop at.
    pub fn problems(&self, coercion: BoolCoercion) -> Vec<Error> {
        let mut problems = Vec::new();

        let missing = self.missing_fields();
        if !missing.is_empty() {
            problems.push(Error::MissingProperties { missing });
        }

        let p = &self.properties;
        if let Some(zone) = p.get_string("zone") {
            if let Err(e) = Zone::parse(&zone) {
                problems.push(e);
            }
        }

        for spec in PROPERTY_CONTRACT {
            let checked = match spec.kind {
                PropertyKind::Size => p.get_i64(spec.name).map(|_| ()),
                PropertyKind::Flag => match p.get_string(spec.name) {
                    Some(raw) => coercion.enabled_only_if_true(spec.name, &raw).map(|_| ()),
                    None => Ok(()),
                },
                PropertyKind::String => Ok(()),
            };
            if let Err(e) = checked {
                problems.push(e);
            }
        }

        problems
    }

    /// Validate the context and convert it into its typed form.
    pub fn resolve(&self, coercion: BoolCoercion) -> Result<DeploymentContext> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Error::MissingProperties { missing });
        }

        let p = &self.properties;
        let env = Environment {
            project: self.env.get_string_required("project")?,
            project_number: self.env.get_string_required("project_number")?,
        };

        let service_account = p
            .get_string("serviceAccount")
            .unwrap_or_else(|| default_service_account(&env.project_number));

        let properties = Db2WinProperties {
            zone: Zone::parse(&p.get_string_required("zone")?)?,
            instance_name: p.get_string_required("instanceName")?,
            instance_type: p.get_string_required("instanceType")?,
            windows_image_project: p.get_string_required("windowsImageProject")?,
            windows_image: p.get_string_required("windowsImage")?,
            subnetwork: SubnetworkRef::parse(&p.get_string_required("subnetwork")?),
            public_ip: coercion
                .enabled_unless_false("publicIP", &p.get_string_required("publicIP")?)?,
            network_tags: parse_network_tags(&p.get_string_or("networkTag", "")),
            service_account,
            db2_sid: p.get_string_or("db2SID", ""),
            db2sid_size: p.get_i64_required("db2sidSize")?,
            db2saptmp_size: p.get_i64_required("db2saptmpSize")?,
            db2log_size: p.get_i64_required("db2logSize")?,
            db2log_ssd: coercion
                .enabled_only_if_true("db2logSSD", &p.get_string_required("db2logSSD")?)?,
            db2sapdata_size: p.get_i64_required("db2sapdataSize")?,
            db2sapdata_ssd: coercion.enabled_only_if_true(
                "db2sapdataSSD",
                &p.get_string_required("db2sapdataSSD")?,
            )?,
            db2backup_size: p.get_i64_required("db2backupSize")?,
            usrsap_size: p.get_i64_required("usrsapSize")?,
            swap_size: p.get_i64_required("swapSize")?,
        };

        Ok(DeploymentContext { env, properties })
    }
}

/// Validated, typed deployment context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentContext {
    pub env: Environment,
    pub properties: Db2WinProperties,
}

impl DeploymentContext {
    pub fn project(&self) -> &str {
        &self.env.project
    }

    pub fn zone(&self) -> &str {
        self.properties.zone.as_str()
    }

    pub fn region(&self) -> &str {
        self.properties.zone.region()
    }

    /// Regional URL of the instance's subnetwork.
    pub fn subnetwork_url(&self) -> String {
        self.properties
            .subnetwork
            .url(&self.env.project, self.region())
    }
}
