//! AWS region code tables
//!
//! The bulk price-list APIs key offer files by region code, while the older
//! query surfaces use human-readable location strings. This table maps one
//! to the other and doubles as the set of regions worth issuing a remote
//! request for.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

static AWS_REGION_TO_LOCATION: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        // US East
        ("us-east-1", "US East (N. Virginia)"),
        ("us-east-2", "US East (Ohio)"),
        // US West
        ("us-west-1", "US West (N. California)"),
        ("us-west-2", "US West (Oregon)"),
        // Asia Pacific
        ("ap-south-1", "Asia Pacific (Mumbai)"),
        ("ap-southeast-1", "Asia Pacific (Singapore)"),
        ("ap-southeast-2", "Asia Pacific (Sydney)"),
        ("ap-southeast-3", "Asia Pacific (Jakarta)"),
        ("ap-northeast-1", "Asia Pacific (Tokyo)"),
        ("ap-northeast-2", "Asia Pacific (Seoul)"),
        ("ap-northeast-3", "Asia Pacific (Osaka)"),
        ("ap-east-1", "Asia Pacific (Hong Kong)"),
        // Europe
        ("eu-west-1", "Europe (Ireland)"),
        ("eu-west-2", "Europe (London)"),
        ("eu-west-3", "Europe (Paris)"),
        ("eu-central-1", "Europe (Frankfurt)"),
        ("eu-central-2", "Europe (Zurich)"),
        ("eu-north-1", "Europe (Stockholm)"),
        ("eu-south-1", "Europe (Milan)"),
        ("eu-south-2", "Europe (Spain)"),
        // Middle East
        ("me-south-1", "Middle East (Bahrain)"),
        ("me-central-1", "Middle East (UAE)"),
        // Africa
        ("af-south-1", "Africa (Cape Town)"),
        // South America
        ("sa-east-1", "South America (Sao Paulo)"),
        // Canada
        ("ca-central-1", "Canada (Central)"),
        // China
        ("cn-north-1", "China (Beijing)"),
        ("cn-northwest-1", "China (Ningxia)"),
    ])
});

/// Pricing location string for a region code, if known.
pub fn pricing_location(region_code: &str) -> Option<&'static str> {
    AWS_REGION_TO_LOCATION.get(region_code).copied()
}

/// Whether a region code is a known AWS region.
pub fn is_known_region(region_code: &str) -> bool {
    AWS_REGION_TO_LOCATION.contains_key(region_code)
}

/// All supported AWS region codes, sorted.
pub fn known_regions() -> Vec<&'static str> {
    AWS_REGION_TO_LOCATION.keys().copied().collect()
}
