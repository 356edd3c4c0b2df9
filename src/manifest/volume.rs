//! Disk layout of the DB2 server.
//!
//! Each volume becomes one `compute.v1.disk` resource named
//! `<instanceName><suffix>` plus one attached disk on the instance. The order
//! of [`VOLUMES`] is the order they appear in the manifest.

use crate::context::Db2WinProperties;
use std::fmt;

/// Persistent disk type of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskType {
    Standard,
    Ssd,
}

impl DiskType {
    pub fn from_ssd_flag(ssd: bool) -> Self {
        if ssd {
            DiskType::Ssd
        } else {
            DiskType::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiskType::Standard => "pd-standard",
            DiskType::Ssd => "pd-ssd",
        }
    }
}

impl fmt::Display for DiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One volume of the DB2 server layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Volume {
    Db2Sid,
    Db2SapTmp,
    Db2Log,
    Db2SapData,
    Db2Backup,
    UsrSap,
    Swap,
}

/// Every volume, in manifest order.
pub const VOLUMES: [Volume; 7] = [
    Volume::Db2Sid,
    Volume::Db2SapTmp,
    Volume::Db2Log,
    Volume::Db2SapData,
    Volume::Db2Backup,
    Volume::UsrSap,
    Volume::Swap,
];

impl Volume {
    /// Appended to the instance name to form the disk name.
    pub fn suffix(&self) -> &'static str {
        match self {
            Volume::Db2Sid => "-db2sid",
            Volume::Db2SapTmp => "-db2saptmp",
            Volume::Db2Log => "-db2log",
            Volume::Db2SapData => "-db2sapdata",
            Volume::Db2Backup => "-db2backup",
            Volume::UsrSap => "-usrsap",
            Volume::Swap => "-swap",
        }
    }

    /// Windows drive the startup script mounts the volume as.
    pub fn drive(&self) -> &'static str {
        match self {
            Volume::Db2Sid => "D:",
            Volume::Db2SapTmp => "T:",
            Volume::Db2Log => "L:",
            Volume::Db2SapData => "E:",
            Volume::Db2Backup => "X:",
            Volume::UsrSap => "S:",
            Volume::Swap => "P:",
        }
    }

    pub fn purpose(&self) -> &'static str {
        match self {
            Volume::Db2Sid => "DB2",
            Volume::Db2SapTmp => "temp",
            Volume::Db2Log => "log",
            Volume::Db2SapData => "data",
            Volume::Db2Backup => "backup",
            Volume::UsrSap => "SAP",
            Volume::Swap => "pagefile",
        }
    }

    /// Property holding the volume size.
    pub fn size_property(&self) -> &'static str {
        match self {
            Volume::Db2Sid => "db2sidSize",
            Volume::Db2SapTmp => "db2saptmpSize",
            Volume::Db2Log => "db2logSize",
            Volume::Db2SapData => "db2sapdataSize",
            Volume::Db2Backup => "db2backupSize",
            Volume::UsrSap => "usrsapSize",
            Volume::Swap => "swapSize",
        }
    }

    /// Optional volumes are omitted when their size is not positive.
    pub fn is_optional(&self) -> bool {
        matches!(self, Volume::UsrSap | Volume::Swap)
    }

    pub fn disk_name(&self, instance_name: &str) -> String {
        format!("{}{}", instance_name, self.suffix())
    }

    fn size(&self, props: &Db2WinProperties) -> i64 {
        match self {
            Volume::Db2Sid => props.db2sid_size,
            Volume::Db2SapTmp => props.db2saptmp_size,
            Volume::Db2Log => props.db2log_size,
            Volume::Db2SapData => props.db2sapdata_size,
            Volume::Db2Backup => props.db2backup_size,
            Volume::UsrSap => props.usrsap_size,
            Volume::Swap => props.swap_size,
        }
    }

    fn disk_type(&self, props: &Db2WinProperties) -> DiskType {
        match self {
            Volume::Db2Log => DiskType::from_ssd_flag(props.db2log_ssd),
            Volume::Db2SapData => DiskType::from_ssd_flag(props.db2sapdata_ssd),
            _ => DiskType::Standard,
        }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.drive(), self.purpose())
    }
}

/// A volume that will be emitted for a concrete deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedVolume {
    pub volume: Volume,
    /// Disk resource name, also used as the device name
    pub name: String,
    pub size_gb: i64,
    pub disk_type: DiskType,
}

/// Volumes to create for `props`, in manifest order.
pub fn plan_volumes(props: &Db2WinProperties) -> Vec<PlannedVolume> {
    VOLUMES
        .iter()
        .filter_map(|volume| {
            let size_gb = volume.size(props);
            if volume.is_optional() && size_gb <= 0 {
                return None;
            }
            Some(PlannedVolume {
                volume: *volume,
                name: volume.disk_name(&props.instance_name),
                size_gb,
                disk_type: volume.disk_type(props),
            })
        })
        .collect()
}
