//! The manifest builder.
//!
//! [`generate_config`] turns a resolved [`DeploymentContext`] into the
//! resource list Deployment Manager applies: one disk resource per planned
//! volume, then the instance that attaches them. It is a pure function of its
//! inputs and never fails.

use super::volume::plan_volumes;
use super::Manifest;
use crate::compute::{
    global_compute_url, zonal_compute_url, AccessConfig, AttachedDisk, DiskProperties,
    InstanceProperties, Metadata, MetadataItem, NetworkInterface, Resource, ServiceAccount, Tags,
};
use crate::context::DeploymentContext;
use serde::{Deserialize, Serialize};

/// Startup script the instance fetches on first boot.
pub const STARTUP_SCRIPT_URL: &str =
    "https://storage.googleapis.com/sapdeploy/dm-templates/sap_db2-win/startup.ps1";

/// Metadata key Windows images read the startup script URL from.
pub const STARTUP_SCRIPT_METADATA_KEY: &str = "windows-startup-script-url";

pub const BOOT_DEVICE_NAME: &str = "boot";

pub const DEFAULT_BOOT_DISK_SIZE_GB: &str = "64";

pub const DEFAULT_MIN_CPU_PLATFORM: &str = "Automatic";

/// OAuth scopes granted to the instance's service account.
pub const SERVICE_ACCOUNT_SCOPES: [&str; 7] = [
    "https://www.googleapis.com/auth/compute",
    "https://www.googleapis.com/auth/servicecontrol",
    "https://www.googleapis.com/auth/service.management.readonly",
    "https://www.googleapis.com/auth/logging.write",
    "https://www.googleapis.com/auth/monitoring.write",
    "https://www.googleapis.com/auth/trace.append",
    "https://www.googleapis.com/auth/devstorage.read_write",
];

/// Template-level settings that are not deployment properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    pub startup_script_url: String,
    pub boot_disk_size_gb: String,
    pub min_cpu_platform: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            startup_script_url: STARTUP_SCRIPT_URL.to_string(),
            boot_disk_size_gb: DEFAULT_BOOT_DISK_SIZE_GB.to_string(),
            min_cpu_platform: DEFAULT_MIN_CPU_PLATFORM.to_string(),
        }
    }
}

/// Generate the manifest for one DB2 server.
pub fn generate_config(ctx: &DeploymentContext, options: &TemplateOptions) -> Manifest {
    let project = ctx.project();
    let zone = ctx.zone();
    let props = &ctx.properties;

    let source_image = global_compute_url(
        &props.windows_image_project,
        "images",
        &props.windows_image,
    );

    let mut resources = Vec::new();
    let mut disks = vec![AttachedDisk::boot(
        BOOT_DEVICE_NAME,
        format!("{}-boot", props.instance_name),
        source_image,
        options.boot_disk_size_gb.as_str(),
    )];

    for volume in plan_volumes(props) {
        resources.push(Resource::disk(
            volume.name.as_str(),
            DiskProperties {
                zone: zone.to_string(),
                size_gb: volume.size_gb,
                disk_type: zonal_compute_url(project, zone, "diskTypes", volume.disk_type.as_str()),
            },
        ));
        disks.push(AttachedDisk::from_resource(&volume.name));
    }

    let access_configs = if props.public_ip {
        vec![AccessConfig::external_nat()]
    } else {
        Vec::new()
    };

    resources.push(Resource::instance(
        props.instance_name.as_str(),
        InstanceProperties {
            zone: zone.to_string(),
            min_cpu_platform: options.min_cpu_platform.clone(),
            machine_type: zonal_compute_url(project, zone, "machineTypes", &props.instance_type),
            metadata: Metadata {
                items: vec![MetadataItem::new(
                    STARTUP_SCRIPT_METADATA_KEY,
                    options.startup_script_url.as_str(),
                )],
            },
            can_ip_forward: true,
            service_accounts: vec![ServiceAccount {
                email: props.service_account.clone(),
                scopes: SERVICE_ACCOUNT_SCOPES.iter().map(|s| s.to_string()).collect(),
            }],
            network_interfaces: vec![NetworkInterface {
                access_configs,
                subnetwork: ctx.subnetwork_url(),
            }],
            tags: Tags {
                items: props.network_tags.clone(),
            },
            disks,
        },
    ));

    Manifest { resources }
}
