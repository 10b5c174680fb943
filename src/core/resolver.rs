//! Region and count resolution
//!
//! Pure functions that turn the ambiguity-preserving `region`/`count_model`
//! blocks of a resource into concrete values plus human-readable assumption
//! notes. No I/O; fully deterministic given inputs.

use crate::config::DEFAULT_REGION;
use crate::core::types::{CountKind, CountModel, RegionInfo, RegionSource};

/// Resolve a concrete region for a resource.
///
/// Priority: caller override, then explicit/provider-default values from the
/// intent graph, then the conservative default region.
pub fn resolve_region(region: &RegionInfo, override_region: Option<&str>) -> (String, Vec<String>) {
    let mut assumptions = Vec::new();

    if let Some(overridden) = override_region {
        assumptions.push(format!("Region overridden to {overridden}"));
        return (overridden.to_string(), assumptions);
    }

    if matches!(
        region.source,
        RegionSource::Explicit | RegionSource::ProviderDefault
    ) {
        if let Some(value) = region.value.as_deref().filter(|v| !v.is_empty()) {
            if region.source == RegionSource::ProviderDefault {
                assumptions.push(format!("Region from provider config: {value}"));
            }
            return (value.to_string(), assumptions);
        }
    }

    assumptions.push(format!(
        "Region not specified, using default: {DEFAULT_REGION}"
    ));
    (DEFAULT_REGION.to_string(), assumptions)
}

/// Resolve a concrete replica count for a resource.
///
/// Returns `None` when the count cannot be determined (autoscaling with no
/// override and no min/max); the caller must record the resource as unpriced
/// with reason "Cannot resolve resource count".
pub fn resolve_count(
    count_model: &CountModel,
    autoscaling_override: Option<i64>,
) -> (Option<i64>, Vec<String>) {
    let mut assumptions = Vec::new();

    match count_model.kind {
        CountKind::Fixed => {
            if let Some(value) = count_model.value {
                return (Some(value as i64), assumptions);
            }
            assumptions.push("No count specified, assuming single resource (1)".to_string());
            (Some(1), assumptions)
        }
        CountKind::Autoscaling => {
            if let Some(overridden) = autoscaling_override {
                assumptions.push(format!("Using provided autoscaling average: {overridden}"));
                return (Some(overridden), assumptions);
            }

            if let (Some(min), Some(max)) = (count_model.min, count_model.max) {
                let average = (min + max) / 2.0;
                assumptions.push(format!("Autoscaling: using average of min/max: {average}"));
                return (Some(average.floor() as i64), assumptions);
            }

            assumptions.push("Autoscaling: cannot determine average count".to_string());
            (None, assumptions)
        }
        CountKind::Unknown => {
            assumptions.push(format!(
                "Count type '{}' not specified, assuming single resource (1)",
                count_model.kind.as_str()
            ));
            (Some(1), assumptions)
        }
    }
}
