//! Bulk pricing index tests over on-disk catalog fixtures

use super::*;
use serde_json::json;
use std::io::Write;
use tempfile::TempDir;

fn ec2_offer() -> serde_json::Value {
    json!({
        "publicationDate": "2025-11-02T00:00:00Z",
        "products": {
            "SKU-T3MICRO-USED": {
                "attributes": {
                    "instanceType": "t3.micro",
                    "operatingSystem": "Linux",
                    "tenancy": "Shared",
                    "capacitystatus": "Used",
                    "preInstalledSw": "NA"
                }
            },
            "SKU-T3MICRO-RESERVATION": {
                "attributes": {
                    "instanceType": "t3.micro",
                    "operatingSystem": "Linux",
                    "tenancy": "Shared",
                    "capacitystatus": "AllocatedCapacityReservation",
                    "preInstalledSw": "NA"
                }
            },
            "SKU-T3MICRO-SQL": {
                "attributes": {
                    "instanceType": "t3.micro",
                    "operatingSystem": "Linux",
                    "tenancy": "Shared",
                    "capacitystatus": "Used",
                    "preInstalledSw": "SQL Web"
                }
            },
            "SKU-M5LARGE-RESERVATION": {
                "attributes": {
                    "instanceType": "m5.large",
                    "operatingSystem": "Linux",
                    "tenancy": "Shared",
                    "capacitystatus": "UnusedCapacityReservation",
                    "preInstalledSw": "NA"
                }
            }
        },
        "terms": {
            "OnDemand": {
                "SKU-T3MICRO-USED": {
                    "T1": {"priceDimensions": {"D1": {"pricePerUnit": {"USD": "0.0104"}}}}
                },
                "SKU-T3MICRO-RESERVATION": {
                    "T2": {"priceDimensions": {"D2": {"pricePerUnit": {"USD": "0.0080"}}}}
                },
                "SKU-T3MICRO-SQL": {
                    "T3": {"priceDimensions": {"D3": {"pricePerUnit": {"USD": "0.0500"}}}}
                },
                "SKU-M5LARGE-RESERVATION": {
                    "T4": {"priceDimensions": {"D4": {"pricePerUnit": {"USD": "0.0700"}}}}
                }
            }
        }
    })
}

fn rds_offer() -> serde_json::Value {
    json!({
        "products": {
            "SKU-DBT3MICRO": {
                "attributes": {
                    "instanceType": "db.t3.micro",
                    "databaseEngine": "PostgreSQL",
                    "deploymentOption": "Single-AZ"
                }
            },
            "SKU-DBT3MICRO-MULTI": {
                "attributes": {
                    "instanceType": "db.t3.micro",
                    "databaseEngine": "PostgreSQL",
                    "deploymentOption": "Multi-AZ"
                }
            }
        },
        "terms": {
            "OnDemand": {
                "SKU-DBT3MICRO": {
                    "T1": {"priceDimensions": {"D1": {"pricePerUnit": {"USD": "0.018"}}}}
                },
                "SKU-DBT3MICRO-MULTI": {
                    "T2": {"priceDimensions": {"D2": {"pricePerUnit": {"USD": "0.036"}}}}
                }
            }
        }
    })
}

fn write_catalog(dir: &TempDir, service: &str, region: &str, offer: &serde_json::Value) {
    let service_dir = dir.path().join(service);
    std::fs::create_dir_all(&service_dir).unwrap();
    let mut file = std::fs::File::create(service_dir.join(format!("{region}.json"))).unwrap();
    file.write_all(serde_json::to_string(offer).unwrap().as_bytes())
        .unwrap();
}

fn write_catalog_gz(dir: &TempDir, service: &str, region: &str, offer: &serde_json::Value) {
    let service_dir = dir.path().join(service);
    std::fs::create_dir_all(&service_dir).unwrap();
    let file = std::fs::File::create(service_dir.join(format!("{region}.json.gz"))).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder
        .write_all(serde_json::to_string(offer).unwrap().as_bytes())
        .unwrap();
    encoder.finish().unwrap();
}

fn fixture_index() -> (TempDir, BulkPricingIndex) {
    let dir = TempDir::new().unwrap();
    write_catalog(&dir, "AmazonEC2", "us-east-1", &ec2_offer());
    write_catalog(&dir, "AmazonRDS", "us-east-1", &rds_offer());
    let index = BulkPricingIndex::new(dir.path(), false).unwrap();
    (dir, index)
}

#[test]
fn test_missing_cache_dir_is_config_error() {
    let err = BulkPricingIndex::new("/definitely/not/a/real/dir", false).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
    assert!(BulkPricingIndex::open_if_available("/definitely/not/a/real/dir", false).is_none());
}

#[test]
fn test_ec2_price_lookup_from_plain_catalog() {
    let (_dir, index) = fixture_index();
    let price = index.ec2_instance_price("t3.micro", "us-east-1", None);
    assert_eq!(price, Some(0.0104));
}

#[test]
fn test_ec2_price_lookup_from_gzipped_catalog() {
    let dir = TempDir::new().unwrap();
    write_catalog_gz(&dir, "AmazonEC2", "eu-west-1", &ec2_offer());
    let index = BulkPricingIndex::new(dir.path(), false).unwrap();
    assert_eq!(
        index.ec2_instance_price("t3.micro", "eu-west-1", None),
        Some(0.0104)
    );
}

#[test]
fn test_used_capacity_wins_over_cheaper_reservation() {
    let (_dir, index) = fixture_index();
    // the reservation SKU is cheaper (0.0080) but must not be chosen
    assert_eq!(
        index.ec2_instance_price("t3.micro", "us-east-1", None),
        Some(0.0104)
    );
}

#[test]
fn test_bundled_software_sku_is_never_indexed() {
    let (_dir, index) = fixture_index();
    index.ec2_instance_price("t3.micro", "us-east-1", None);
    // the SQL Web SKU (0.05) must not shadow the plain-Linux price
    assert_ne!(
        index.ec2_instance_price("t3.micro", "us-east-1", None),
        Some(0.05)
    );
}

#[test]
fn test_reservation_only_type_resolves_via_linear_scan() {
    let (_dir, index) = fixture_index();
    // m5.large has no "Used" SKU, so the index skips it; the linear scan
    // still finds the reservation price and memoizes it
    assert_eq!(
        index.ec2_instance_price("m5.large", "us-east-1", None),
        Some(0.07)
    );
    // second lookup hits the memoized entry
    assert_eq!(
        index.ec2_instance_price("m5.large", "us-east-1", None),
        Some(0.07)
    );
}

#[test]
fn test_rds_engine_aliases_normalize() {
    let (_dir, index) = fixture_index();
    assert_eq!(
        index.rds_instance_price("db.t3.micro", "us-east-1", Some("postgres")),
        Some(0.018)
    );
    assert_eq!(
        index.rds_instance_price("db.t3.micro", "us-east-1", Some("postgresql")),
        Some(0.018)
    );
    // catalog-native casing works too
    assert_eq!(
        index.rds_instance_price("db.t3.micro", "us-east-1", Some("PostgreSQL")),
        Some(0.018)
    );
}

#[test]
fn test_rds_lookup_is_single_az() {
    let (_dir, index) = fixture_index();
    // Multi-AZ SKU (0.036) must not be selected
    assert_eq!(
        index.rds_instance_price("db.t3.micro", "us-east-1", Some("postgres")),
        Some(0.018)
    );
}

#[test]
fn test_missing_offer_file_returns_none() {
    let (_dir, index) = fixture_index();
    assert_eq!(index.ec2_instance_price("t3.micro", "ap-south-1", None), None);
}

#[test]
fn test_malformed_offer_file_treated_as_absent() {
    let dir = TempDir::new().unwrap();
    let service_dir = dir.path().join("AmazonEC2");
    std::fs::create_dir_all(&service_dir).unwrap();
    std::fs::write(service_dir.join("us-east-1.json"), b"{not valid json").unwrap();
    let index = BulkPricingIndex::new(dir.path(), false).unwrap();
    assert_eq!(index.ec2_instance_price("t3.micro", "us-east-1", None), None);
}

#[test]
fn test_unknown_instance_type_returns_none() {
    let (_dir, index) = fixture_index();
    assert_eq!(
        index.ec2_instance_price("x2gd.metal", "us-east-1", None),
        None
    );
}

#[test]
fn test_lookup_is_deterministic() {
    let (_dir, index) = fixture_index();
    let first = index.ec2_instance_price("t3.micro", "us-east-1", None);
    let second = index.ec2_instance_price("t3.micro", "us-east-1", None);
    assert_eq!(first, second);
}

#[test]
fn test_prewarm_indexes_common_pairs_and_swallows_gaps() {
    let dir = TempDir::new().unwrap();
    // only one of the six pre-warm pairs exists; the rest must be skipped
    // silently
    write_catalog(&dir, "AmazonEC2", "us-east-1", &ec2_offer());
    let index = BulkPricingIndex::new(dir.path(), true).unwrap();
    assert!(index.indexed_price_count() > 0);
}

#[test]
fn test_hourly_to_monthly_uses_730_hours() {
    let (_dir, index) = fixture_index();
    assert_eq!(index.hourly_to_monthly(0.0104), 0.0104 * 730.0);
}

#[test]
fn test_publication_date_accessor() {
    let (_dir, index) = fixture_index();
    assert_eq!(
        index.publication_date("AmazonEC2", "us-east-1"),
        Some("2025-11-02T00:00:00Z".to_string())
    );
    assert_eq!(index.publication_date("AmazonRDS", "eu-west-1"), None);
}
