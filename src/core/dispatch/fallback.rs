//! Static fallback price tables
//!
//! Baseline hourly prices for a handful of common compute and database
//! tiers, used when the bulk catalog and the remote APIs both come up
//! empty so a demo/offline run still produces non-zero numbers. Every hit
//! appends an assumption noting that static pricing was used.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static FALLBACK_EC2_PRICES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("t3.nano", 0.005),
        ("t3.micro", 0.01),
        ("t3.small", 0.02),
        ("t3.medium", 0.04),
        ("t3.large", 0.08),
    ])
});

static FALLBACK_RDS_PRICES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("db.t3.micro", 0.02),
        ("db.t3.small", 0.04),
        ("db.t3.medium", 0.08),
    ])
});

/// Static demo price for an EC2 instance type, with its assumption note.
pub fn fallback_ec2_price(instance_type: &str) -> Option<(f64, String)> {
    FALLBACK_EC2_PRICES.get(instance_type).map(|price| {
        (
            *price,
            format!("Using static demo price for EC2 instance_type={instance_type}"),
        )
    })
}

/// Static demo price for an RDS instance class, with its assumption note.
pub fn fallback_rds_price(instance_type: &str) -> Option<(f64, String)> {
    FALLBACK_RDS_PRICES.get(instance_type).map(|price| {
        (
            *price,
            format!("Using static demo price for RDS instance_class={instance_type}"),
        )
    })
}
