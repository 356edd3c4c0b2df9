//! Typed Deployment Manager resource descriptors for Compute Engine.
//!
//! Field names and key order follow what Deployment Manager expects from a
//! `compute.v1` template, so serializing these types yields the manifest
//! verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attachment type used for every disk in the manifest.
pub const PERSISTENT: &str = "PERSISTENT";

/// Access config type granting a one-to-one external address.
pub const ONE_TO_ONE_NAT: &str = "ONE_TO_ONE_NAT";

/// Name given to the external access config.
pub const EXTERNAL_NAT: &str = "external-nat";

/// Build a Deployment Manager back-reference to another resource's field.
///
/// The orchestration engine substitutes `$(ref.<name>.<field>)` at apply time;
/// it is never resolved here.
pub fn resource_ref(name: &str, field: &str) -> String {
    format!("$(ref.{}.{})", name, field)
}

/// Back-reference to the self link of a declared resource.
pub fn self_link_ref(name: &str) -> String {
    resource_ref(name, "selfLink")
}

/// Deployment Manager type tag of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    /// A standalone persistent disk
    #[serde(rename = "compute.v1.disk")]
    Disk,
    /// A virtual machine instance
    #[serde(rename = "compute.v1.instance")]
    Instance,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Disk => "compute.v1.disk",
            ResourceType::Instance => "compute.v1.instance",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the manifest's `resources` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Declared resource name, the target of back-references
    pub name: String,
    /// Type tag interpreted by the orchestration engine
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    /// Type-specific properties
    pub properties: ResourceProperties,
}

impl Resource {
    /// Declare a standalone disk.
    pub fn disk(name: impl Into<String>, properties: DiskProperties) -> Self {
        Self {
            name: name.into(),
            resource_type: ResourceType::Disk,
            properties: ResourceProperties::Disk(properties),
        }
    }

    /// Declare a virtual machine instance.
    pub fn instance(name: impl Into<String>, properties: InstanceProperties) -> Self {
        Self {
            name: name.into(),
            resource_type: ResourceType::Instance,
            properties: ResourceProperties::Instance(Box::new(properties)),
        }
    }

    pub fn as_disk(&self) -> Option<&DiskProperties> {
        match &self.properties {
            ResourceProperties::Disk(disk) => Some(disk),
            ResourceProperties::Instance(_) => None,
        }
    }

    pub fn as_instance(&self) -> Option<&InstanceProperties> {
        match &self.properties {
            ResourceProperties::Instance(instance) => Some(instance.as_ref()),
            ResourceProperties::Disk(_) => None,
        }
    }
}

/// Properties of a resource, shaped by its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceProperties {
    Disk(DiskProperties),
    Instance(Box<InstanceProperties>),
}

/// Properties of a `compute.v1.disk` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiskProperties {
    pub zone: String,
    pub size_gb: i64,
    /// Zonal disk type URL
    #[serde(rename = "type")]
    pub disk_type: String,
}

/// A disk attached to an instance.
///
/// The boot disk is created inline through `initializeParams`; every other
/// disk points at a separately declared disk resource through `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDisk {
    pub device_name: String,
    #[serde(rename = "type")]
    pub attachment_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub auto_delete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialize_params: Option<InitializeParams>,
}

impl AttachedDisk {
    /// Boot disk initialized from an image.
    pub fn boot(
        device_name: impl Into<String>,
        disk_name: impl Into<String>,
        source_image: impl Into<String>,
        disk_size_gb: impl Into<String>,
    ) -> Self {
        Self {
            device_name: device_name.into(),
            attachment_type: PERSISTENT.to_string(),
            boot: Some(true),
            source: None,
            auto_delete: true,
            initialize_params: Some(InitializeParams {
                disk_name: disk_name.into(),
                source_image: source_image.into(),
                disk_size_gb: disk_size_gb.into(),
            }),
        }
    }

    /// Disk backed by the declared disk resource `resource_name`.
    pub fn from_resource(resource_name: &str) -> Self {
        Self {
            device_name: resource_name.to_string(),
            attachment_type: PERSISTENT.to_string(),
            boot: None,
            source: Some(self_link_ref(resource_name)),
            auto_delete: true,
            initialize_params: None,
        }
    }

    pub fn is_boot(&self) -> bool {
        self.boot.unwrap_or(false)
    }
}

/// Inline creation parameters of the boot disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub disk_name: String,
    pub source_image: String,
    // Deployment Manager accepts the size as a string here.
    pub disk_size_gb: String,
}

/// Properties of a `compute.v1.instance` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceProperties {
    pub zone: String,
    pub min_cpu_platform: String,
    /// Zonal machine type URL
    pub machine_type: String,
    pub metadata: Metadata,
    pub can_ip_forward: bool,
    pub service_accounts: Vec<ServiceAccount>,
    pub network_interfaces: Vec<NetworkInterface>,
    pub tags: Tags,
    /// Boot disk first, then every declared disk in declaration order
    pub disks: Vec<AttachedDisk>,
}

/// Instance metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub items: Vec<MetadataItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
}

impl MetadataItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Service account attached to the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    pub email: String,
    pub scopes: Vec<String>,
}

/// Network interface of the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    /// Empty when the instance gets no external address
    pub access_configs: Vec<AccessConfig>,
    /// Regional subnetwork URL
    pub subnetwork: String,
}

/// External connectivity of a network interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub access_type: String,
}

impl AccessConfig {
    /// The single ephemeral external address used by the template.
    pub fn external_nat() -> Self {
        Self {
            name: EXTERNAL_NAT.to_string(),
            access_type: ONE_TO_ONE_NAT.to_string(),
        }
    }
}

/// Network tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    pub items: Vec<String>,
}
