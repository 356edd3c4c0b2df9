//! Compute Engine API resource URLs.
//!
//! These helpers only concatenate strings. Nothing is validated, so a
//! malformed project or zone simply yields a malformed URL.

/// Base path shared by every Compute Engine v1 resource URL.
pub const COMPUTE_URL_BASE: &str = "https://www.googleapis.com/compute/v1/";

/// Build the URL of a global resource, e.g. an image.
pub fn global_compute_url(project: &str, collection: &str, name: &str) -> String {
    format!(
        "{}projects/{}/global/{}/{}",
        COMPUTE_URL_BASE, project, collection, name
    )
}

/// Build the URL of a zonal resource, e.g. a machine type or disk type.
pub fn zonal_compute_url(project: &str, zone: &str, collection: &str, name: &str) -> String {
    format!(
        "{}projects/{}/zones/{}/{}/{}",
        COMPUTE_URL_BASE, project, zone, collection, name
    )
}

/// Build the URL of a regional resource, e.g. a subnetwork.
pub fn regional_compute_url(project: &str, region: &str, collection: &str, name: &str) -> String {
    format!(
        "{}projects/{}/regions/{}/{}/{}",
        COMPUTE_URL_BASE, project, region, collection, name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_url() {
        assert_eq!(
            global_compute_url("windows-cloud", "images", "windows-server-2016-dc-v20181113"),
            "https://www.googleapis.com/compute/v1/projects/windows-cloud/global/images/windows-server-2016-dc-v20181113"
        );
    }

    #[test]
    fn test_zonal_url() {
        assert_eq!(
            zonal_compute_url("p1", "us-central1-a", "diskTypes", "pd-ssd"),
            "https://www.googleapis.com/compute/v1/projects/p1/zones/us-central1-a/diskTypes/pd-ssd"
        );
    }

    #[test]
    fn test_regional_url() {
        assert_eq!(
            regional_compute_url("hostproj", "europe-west3", "subnetworks", "shared-net"),
            "https://www.googleapis.com/compute/v1/projects/hostproj/regions/europe-west3/subnetworks/shared-net"
        );
    }

    #[test]
    fn test_garbage_in_garbage_out() {
        assert_eq!(
            zonal_compute_url("", "", "", ""),
            "https://www.googleapis.com/compute/v1/projects//zones///"
        );
    }
}
