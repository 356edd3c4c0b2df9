//! Typed template properties.
//!
//! [`Db2WinProperties`] is the validated form of the `properties` namespace.
//! Derived values that only depend on a single property (region, shared-VPC
//! host project, network tags, flags) are computed here so the manifest
//! builder works with plain data.

use crate::compute::regional_compute_url;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of value a template property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Flag,
    Size,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::String => write!(f, "string"),
            PropertyKind::Flag => write!(f, "bool/string"),
            PropertyKind::Size => write!(f, "number (GB)"),
        }
    }
}

/// Declaration of one template input.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PropertySpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: PropertyKind,
    pub description: &'static str,
}

const fn required(name: &'static str, kind: PropertyKind, description: &'static str) -> PropertySpec {
    PropertySpec {
        name,
        required: true,
        kind,
        description,
    }
}

const fn optional(name: &'static str, kind: PropertyKind, description: &'static str) -> PropertySpec {
    PropertySpec {
        name,
        required: false,
        kind,
        description,
    }
}

/// Every input of the template, in documentation order.
pub const PROPERTY_CONTRACT: &[PropertySpec] = &[
    required("zone", PropertyKind::String, "Zone to deploy into, '<region>-<suffix>'"),
    required("instanceName", PropertyKind::String, "Instance name, also the prefix of every disk name"),
    required("instanceType", PropertyKind::String, "Machine type short name, e.g. n1-highmem-16"),
    required("windowsImageProject", PropertyKind::String, "Project hosting the boot image"),
    required("windowsImage", PropertyKind::String, "Boot image name"),
    required("subnetwork", PropertyKind::String, "Subnetwork name, or '<host-project>/<name>' for shared VPC"),
    required("publicIP", PropertyKind::Flag, "Attach an external address unless 'False'"),
    optional("networkTag", PropertyKind::String, "Comma-separated network tags"),
    optional("serviceAccount", PropertyKind::String, "Service account email, defaults to the compute default account"),
    optional("db2SID", PropertyKind::String, "DB2 system id"),
    required("db2sidSize", PropertyKind::Size, "D:\\ DB2 home volume size"),
    required("db2saptmpSize", PropertyKind::Size, "T:\\ temp volume size"),
    required("db2logSize", PropertyKind::Size, "L:\\ log volume size"),
    required("db2sapdataSize", PropertyKind::Size, "E:\\ data volume size"),
    required("db2backupSize", PropertyKind::Size, "X:\\ backup volume size"),
    required("usrsapSize", PropertyKind::Size, "S:\\ SAP volume size, 0 to omit"),
    required("swapSize", PropertyKind::Size, "P:\\ pagefile volume size, 0 to omit"),
    required("db2logSSD", PropertyKind::Flag, "Use pd-ssd for the log volume if 'True'"),
    required("db2sapdataSSD", PropertyKind::Flag, "Use pd-ssd for the data volume if 'True'"),
];

/// Facts required from the deployment environment.
pub const REQUIRED_ENV: &[&str] = &["project", "project_number"];

/// Names of the required template properties.
pub fn required_properties() -> impl Iterator<Item = &'static str> {
    PROPERTY_CONTRACT
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
}

/// How flag properties such as `publicIP` are interpreted.
///
/// `Literal` keeps the historical behavior: the stringified value is compared
/// against the exact text `"True"` or `"False"`, so `"false"` counts as
/// neither. `Lenient` parses common boolean spellings case-insensitively and
/// rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolCoercion {
    #[default]
    Literal,
    Lenient,
}

impl BoolCoercion {
    /// Interpret a flag that is on unless explicitly turned off (`publicIP`).
    pub fn enabled_unless_false(&self, name: &str, raw: &str) -> Result<bool> {
        match self {
            BoolCoercion::Literal => Ok(raw != "False"),
            BoolCoercion::Lenient => parse_bool(name, raw),
        }
    }

    /// Interpret a flag that is off unless explicitly turned on (`*SSD`).
    pub fn enabled_only_if_true(&self, name: &str, raw: &str) -> Result<bool> {
        match self {
            BoolCoercion::Literal => Ok(raw == "True"),
            BoolCoercion::Lenient => parse_bool(name, raw),
        }
    }
}

impl FromStr for BoolCoercion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(BoolCoercion::Literal),
            "lenient" => Ok(BoolCoercion::Lenient),
            _ => Err(Error::Config(format!(
                "Invalid boolean coercion '{}'. Valid values: literal, lenient",
                s
            ))),
        }
    }
}

impl fmt::Display for BoolCoercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolCoercion::Literal => write!(f, "literal"),
            BoolCoercion::Lenient => write!(f, "lenient"),
        }
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(Error::invalid_property(name, format!("'{}' is not a boolean", raw))),
    }
}

/// A zone name together with the region it belongs to.
///
/// The region is everything before the last hyphen. That only holds for the
/// `<region>-<suffix>` naming convention, so zones that do not follow it are
/// rejected instead of producing a wrong region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    name: String,
    region_len: usize,
}

impl Zone {
    pub fn parse(name: &str) -> Result<Self> {
        match name.rfind('-') {
            Some(idx) if idx > 0 && idx + 1 < name.len() => Ok(Self {
                name: name.to_string(),
                region_len: idx,
            }),
            _ => Err(Error::MalformedZone(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.name[..self.region_len]
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Where the instance's subnetwork lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubnetworkRef {
    /// A subnetwork of the deploying project.
    Local(String),
    /// A shared VPC subnetwork owned by a host project.
    Shared { host_project: String, name: String },
}

impl SubnetworkRef {
    /// Parse `name` or `<host-project>/<name>`.
    ///
    /// Only the first two `/`-separated segments are significant.
    pub fn parse(value: &str) -> Self {
        if value.contains('/') {
            let mut parts = value.split('/');
            let host_project = parts.next().unwrap_or_default().to_string();
            let name = parts.next().unwrap_or_default().to_string();
            SubnetworkRef::Shared { host_project, name }
        } else {
            SubnetworkRef::Local(value.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SubnetworkRef::Local(name) | SubnetworkRef::Shared { name, .. } => name,
        }
    }

    /// Project that owns the subnetwork.
    pub fn project<'a>(&'a self, current_project: &'a str) -> &'a str {
        match self {
            SubnetworkRef::Local(_) => current_project,
            SubnetworkRef::Shared { host_project, .. } => host_project,
        }
    }

    /// Regional URL of the subnetwork.
    pub fn url(&self, current_project: &str, region: &str) -> String {
        regional_compute_url(self.project(current_project), region, "subnetworks", self.name())
    }
}

/// Split the comma-separated `networkTag` property.
pub fn parse_network_tags(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        value.split(',').map(String::from).collect()
    }
}

/// Compute Engine default service account of a project.
pub fn default_service_account(project_number: &str) -> String {
    format!("{}-compute@developer.gserviceaccount.com", project_number)
}

/// Deployment environment facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub project: String,
    pub project_number: String,
}

/// Validated inputs of the SAP DB2 on Windows template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Db2WinProperties {
    pub zone: Zone,
    pub instance_name: String,
    pub instance_type: String,
    pub windows_image_project: String,
    pub windows_image: String,
    pub subnetwork: SubnetworkRef,
    pub public_ip: bool,
    pub network_tags: Vec<String>,
    pub service_account: String,
    pub db2_sid: String,
    pub db2sid_size: i64,
    pub db2saptmp_size: i64,
    pub db2log_size: i64,
    pub db2log_ssd: bool,
    pub db2sapdata_size: i64,
    pub db2sapdata_ssd: bool,
    pub db2backup_size: i64,
    pub usrsap_size: i64,
    pub swap_size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_region() {
        assert_eq!(Zone::parse("us-central1-a").unwrap().region(), "us-central1");
        assert_eq!(Zone::parse("europe-west3-a").unwrap().region(), "europe-west3");
        assert_eq!(Zone::parse("a-b").unwrap().region(), "a");
    }

    #[test]
    fn test_zone_rejects_malformed() {
        for zone in ["uscentral1a", "", "-a", "us-central1-", "-"] {
            assert!(
                matches!(Zone::parse(zone), Err(Error::MalformedZone(_))),
                "zone {:?} should be rejected",
                zone
            );
        }
    }

    #[test]
    fn test_subnetwork_parse() {
        assert_eq!(
            SubnetworkRef::parse("default"),
            SubnetworkRef::Local("default".to_string())
        );
        assert_eq!(
            SubnetworkRef::parse("hostproj/shared-net"),
            SubnetworkRef::Shared {
                host_project: "hostproj".to_string(),
                name: "shared-net".to_string()
            }
        );
        assert_eq!(SubnetworkRef::parse("a/b/c").name(), "b");
    }

    #[test]
    fn test_subnetwork_url() {
        let local = SubnetworkRef::parse("default");
        assert_eq!(
            local.url("p1", "us-central1"),
            "https://www.googleapis.com/compute/v1/projects/p1/regions/us-central1/subnetworks/default"
        );
        let shared = SubnetworkRef::parse("hostproj/shared-net");
        assert_eq!(shared.project("p1"), "hostproj");
        assert_eq!(
            shared.url("p1", "us-central1"),
            "https://www.googleapis.com/compute/v1/projects/hostproj/regions/us-central1/subnetworks/shared-net"
        );
    }

    #[test]
    fn test_network_tags() {
        assert!(parse_network_tags("").is_empty());
        assert_eq!(parse_network_tags("a,b"), vec!["a", "b"]);
        assert_eq!(parse_network_tags("a, b"), vec!["a", " b"]);
    }

    #[test]
    fn test_literal_coercion() {
        let c = BoolCoercion::Literal;
        assert!(!c.enabled_unless_false("publicIP", "False").unwrap());
        assert!(c.enabled_unless_false("publicIP", "false").unwrap());
        assert!(c.enabled_unless_false("publicIP", "True").unwrap());
        assert!(c.enabled_only_if_true("db2logSSD", "True").unwrap());
        assert!(!c.enabled_only_if_true("db2logSSD", "true").unwrap());
        assert!(!c.enabled_only_if_true("db2logSSD", "yes").unwrap());
    }

    #[test]
    fn test_lenient_coercion() {
        let c = BoolCoercion::Lenient;
        assert!(!c.enabled_unless_false("publicIP", "false").unwrap());
        assert!(!c.enabled_unless_false("publicIP", "NO").unwrap());
        assert!(c.enabled_only_if_true("db2logSSD", "on").unwrap());
        assert!(c.enabled_only_if_true("db2logSSD", "maybe").is_err());
    }

    #[test]
    fn test_bool_coercion_from_str() {
        assert_eq!("literal".parse::<BoolCoercion>().unwrap(), BoolCoercion::Literal);
        assert_eq!("Lenient".parse::<BoolCoercion>().unwrap(), BoolCoercion::Lenient);
        assert!("strict".parse::<BoolCoercion>().is_err());
    }

    #[test]
    fn test_required_properties() {
        let names: Vec<_> = required_properties().collect();
        assert_eq!(names.len(), 16);
        assert!(names.contains(&"publicIP"));
        assert!(!names.contains(&"networkTag"));
        assert!(!names.contains(&"db2SID"));
    }

    #[test]
    fn test_default_service_account() {
        assert_eq!(
            default_service_account("123456"),
            "123456-compute@developer.gserviceaccount.com"
        );
    }
}
