//! Property-based tests for sapdm using proptest.
//!
//! Random zones, sizes and flag values are pushed through context
//! resolution and manifest generation to check the structural guarantees of
//! every generated manifest.

mod common;

use common::*;
use proptest::prelude::*;
use sapdm::compute::ResourceType;
use sapdm::context::{BoolCoercion, RawContext, Zone};
use sapdm::manifest::{generate, TemplateOptions};
use serde_json::json;

// ============================================================================
// Strategies for generating test data
// ============================================================================

/// Strategy for well-formed zone names
fn zone_name() -> impl Strategy<Value = (String, String)> {
    ("[a-z]{2,10}", "[a-z]{1,10}[0-9]{1,2}", "[a-z]")
        .prop_map(|(geo, area, suffix)| {
            let region = format!("{}-{}", geo, area);
            (format!("{}-{}", region, suffix), region)
        })
}

/// Strategy for flag values as users write them
fn flag_value() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        any::<bool>().prop_map(serde_json::Value::from),
        Just(json!("True")),
        Just(json!("False")),
        Just(json!("true")),
        Just(json!("false")),
        "[a-zA-Z]{0,8}".prop_map(serde_json::Value::from),
    ]
}

fn context(usrsap: i64, swap: i64, public_ip: serde_json::Value) -> RawContext {
    ContextBuilder::new()
        .property("usrsapSize", usrsap)
        .property("swapSize", swap)
        .property("publicIP", public_ip)
        .build()
}

proptest! {
    #[test]
    fn region_is_zone_without_last_segment((zone, region) in zone_name()) {
        let parsed = Zone::parse(&zone).unwrap();
        prop_assert_eq!(parsed.region(), region.as_str());

        let ctx = ContextBuilder::new().property("zone", zone.clone()).resolve();
        prop_assert_eq!(ctx.region(), region.as_str());
        let expected = format!("/regions/{}/subnetworks/", region);
        prop_assert!(ctx.subnetwork_url().contains(&expected));
    }

    #[test]
    fn optional_volumes_follow_their_size(usrsap in -50i64..500, swap in -50i64..500) {
        let raw = context(usrsap, swap, json!(true));
        let manifest = generate(&raw, BoolCoercion::Literal, &TemplateOptions::default()).unwrap();

        let usrsap_disk = manifest.resource("db2srv1-usrsap").and_then(|r| r.as_disk());
        let swap_disk = manifest.resource("db2srv1-swap").and_then(|r| r.as_disk());

        prop_assert_eq!(usrsap_disk.is_some(), usrsap > 0);
        prop_assert_eq!(swap_disk.is_some(), swap > 0);
        if let Some(disk) = usrsap_disk {
            prop_assert_eq!(disk.size_gb, usrsap);
        }
        if let Some(disk) = swap_disk {
            prop_assert_eq!(disk.size_gb, swap);
        }
    }

    #[test]
    fn every_manifest_is_well_formed(
        usrsap in -10i64..100,
        swap in -10i64..100,
        public_ip in flag_value(),
    ) {
        let raw = context(usrsap, swap, public_ip);
        let manifest = generate(&raw, BoolCoercion::Literal, &TemplateOptions::default()).unwrap();

        let disks = manifest.count(ResourceType::Disk);
        prop_assert_eq!(manifest.count(ResourceType::Instance), 1);
        prop_assert!((5..=7).contains(&disks));
        prop_assert_eq!(manifest.instance().unwrap().disks.len(), disks + 1);
        prop_assert!(manifest.dangling_references().is_empty());
    }

    #[test]
    fn literal_public_ip_only_disabled_by_exact_false(public_ip in flag_value()) {
        let disabled = matches!(&public_ip, serde_json::Value::Bool(false))
            || public_ip == json!("False");
        let raw = context(0, 0, public_ip);
        let manifest = generate(&raw, BoolCoercion::Literal, &TemplateOptions::default()).unwrap();

        let configs = &manifest.instance().unwrap().network_interfaces[0].access_configs;
        prop_assert_eq!(configs.is_empty(), disabled);
    }

    #[test]
    fn network_tags_split_on_commas(tags in proptest::collection::vec("[a-z][a-z0-9-]{0,10}", 0..5)) {
        let joined = tags.join(",");
        let ctx = ContextBuilder::new().property("networkTag", joined).resolve();
        prop_assert_eq!(ctx.properties.network_tags, tags);
    }

    #[test]
    fn resolve_never_panics(zone in "\\PC{0,20}", size in "\\PC{0,10}") {
        let raw = ContextBuilder::new()
            .property("zone", zone)
            .property("db2sidSize", size)
            .build();
        let _ = raw.resolve(BoolCoercion::Lenient);
        let _ = raw.problems(BoolCoercion::Literal);
    }
}
