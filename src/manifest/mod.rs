//! Deployment manifests.
//!
//! A [`Manifest`] is the document handed to Deployment Manager: a single
//! `resources` list holding every disk followed by the instance.

pub mod builder;
pub mod volume;

pub use builder::{generate_config, TemplateOptions};
pub use volume::{plan_volumes, DiskType, PlannedVolume, Volume, VOLUMES};

use crate::compute::{DiskProperties, InstanceProperties, Resource, ResourceType};
use crate::context::{BoolCoercion, RawContext};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The generated resource list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub resources: Vec<Resource>,
}

impl Manifest {
    /// Look up a resource by its declared name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Standalone disk resources, in declaration order.
    pub fn disks(&self) -> impl Iterator<Item = (&str, &DiskProperties)> {
        self.resources
            .iter()
            .filter_map(|r| r.as_disk().map(|d| (r.name.as_str(), d)))
    }

    /// The instance resource's properties.
    pub fn instance(&self) -> Option<&InstanceProperties> {
        self.resources.iter().find_map(Resource::as_instance)
    }

    pub fn count(&self, resource_type: ResourceType) -> usize {
        self.resources
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .count()
    }

    /// Names referenced through `$(ref.<name>.selfLink)` that are not
    /// declared in this manifest. Empty for every generated manifest.
    pub fn dangling_references(&self) -> Vec<String> {
        let Some(instance) = self.instance() else {
            return Vec::new();
        };
        instance
            .disks
            .iter()
            .filter_map(|d| d.source.as_deref())
            .filter_map(|src| {
                src.strip_prefix("$(ref.")
                    .and_then(|rest| rest.strip_suffix(".selfLink)"))
            })
            .filter(|name| self.resource(name).is_none())
            .map(String::from)
            .collect()
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Yaml => self.to_yaml(),
            OutputFormat::Json => self.to_json(),
        }
    }
}

/// Serialization format of a rendered manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Config(format!(
                "Invalid output format '{}'. Valid formats: yaml, json",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Validate `raw` and generate its manifest.
pub fn generate(
    raw: &RawContext,
    coercion: BoolCoercion,
    options: &TemplateOptions,
) -> Result<Manifest> {
    let ctx = raw.resolve(coercion)?;
    Ok(generate_config(&ctx, options))
}
