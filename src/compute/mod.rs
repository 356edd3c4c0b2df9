//! Compute Engine building blocks: resource URLs and typed descriptors.

pub mod resources;
pub mod url;

pub use resources::{
    AccessConfig, AttachedDisk, DiskProperties, InitializeParams, InstanceProperties, Metadata,
    MetadataItem, NetworkInterface, Resource, ResourceProperties, ResourceType, ServiceAccount,
    Tags,
};
pub use url::{global_compute_url, regional_compute_url, zonal_compute_url, COMPUTE_URL_BASE};
