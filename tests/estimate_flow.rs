//! End-to-end flow through the public API: catalog on disk, estimate,
//! scenario comparison, serialized payloads.

use anyhow::Result;
use costplane::{CostEstimator, Coverage, EngineConfig, IntentGraph, ScenarioInput};
use serde_json::json;
use std::io::Write;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

fn write_ec2_catalog(dir: &TempDir, region: &str, price: &str) -> Result<()> {
    let offer = json!({
        "publicationDate": "2025-11-02T00:00:00Z",
        "products": {
            "SKU1": {
                "attributes": {
                    "instanceType": "t3.micro",
                    "operatingSystem": "Linux",
                    "tenancy": "Shared",
                    "capacitystatus": "Used",
                    "preInstalledSw": "NA"
                }
            }
        },
        "terms": {
            "OnDemand": {
                "SKU1": {
                    "T1": {"priceDimensions": {"D1": {"pricePerUnit": {"USD": price}}}}
                }
            }
        }
    });
    let service_dir = dir.path().join("AmazonEC2");
    std::fs::create_dir_all(&service_dir)?;
    let mut file = std::fs::File::create(service_dir.join(format!("{region}.json")))?;
    file.write_all(serde_json::to_string(&offer)?.as_bytes())?;
    Ok(())
}

fn sample_graph() -> Result<IntentGraph> {
    Ok(IntentGraph::from_value(json!({
        "providers": ["aws"],
        "resources": [
            {
                "cloud": "aws",
                "category": "compute",
                "service": "EC2",
                "terraform_type": "aws_instance",
                "name": "web",
                "region": {"source": "provider_default", "value": "us-east-1"},
                "count_model": {"type": "fixed", "value": 2, "confidence": "high"},
                "size": {"instance_type": "t3.micro"},
                "usage": {"hours_per_month": 730}
            },
            {
                "cloud": "aws",
                "category": "network",
                "service": "VPC",
                "terraform_type": "aws_vpc",
                "name": "main",
                "region": {"source": "provider_default", "value": "us-east-1"},
                "count_model": {"type": "fixed", "value": 1, "confidence": "high"}
            },
            {
                "cloud": "aws",
                "category": "network",
                "service": "VPC",
                "terraform_type": "aws_nat_gateway",
                "name": "nat",
                "region": {"source": "provider_default", "value": "us-east-1"},
                "count_model": {"type": "fixed", "value": 1, "confidence": "high"}
            }
        ],
        "summary": {"total_resources": 3, "has_autoscaling": false, "has_unknowns": false}
    }))?)
}

#[tokio::test]
async fn estimate_and_scenario_flow() -> Result<()> {
    init_tracing();

    let dir = TempDir::new()?;
    write_ec2_catalog(&dir, "us-east-1", "0.0104")?;
    write_ec2_catalog(&dir, "eu-west-1", "0.0118")?;

    let config = EngineConfig {
        pricing_cache_dir: dir.path().to_path_buf(),
        prewarm_common_regions: true,
        ..EngineConfig::default()
    };
    let estimator = CostEstimator::new(&config)?;
    let graph = sample_graph()?;

    let estimate = estimator.estimate(&graph, None, None).await?;
    assert_eq!(estimate.line_items.len(), 3);
    assert!(estimate.unpriced_resources.is_empty());
    assert_eq!(estimate.coverage.get("aws"), Some(&Coverage::Full));

    let ec2 = 0.0104 * 730.0 * 2.0;
    let nat = 0.045 * 730.0 + 0.045;
    assert!((estimate.total_monthly_cost_usd - (ec2 + nat)).abs() < 1e-9);

    // payload ordering: NAT gateway (~32.90) ahead of EC2 (~15.18), free VPC last
    let payload = estimate.to_json();
    let items = payload["line_items"].as_array().unwrap();
    assert_eq!(items[0]["terraform_type"], "aws_nat_gateway");
    assert_eq!(items[1]["terraform_type"], "aws_instance");
    assert_eq!(items[2]["monthly_cost_usd"], 0.0);

    // scenario: move everything to eu-west-1
    let scenario = ScenarioInput {
        region_override: Some("eu-west-1".to_string()),
        autoscaling_average_override: None,
        users: None,
    };
    let result = estimator.estimate_with_scenario(&graph, &scenario).await?;
    assert!(result.region_changed);

    let scenario_ec2 = 0.0118 * 730.0 * 2.0;
    let ec2_delta = result
        .deltas
        .iter()
        .find(|delta| delta.terraform_type == "aws_instance")
        .unwrap();
    assert!((ec2_delta.delta_usd - (scenario_ec2 - ec2)).abs() < 1e-9);

    // the NAT formula is region-independent, so its delta is zero
    let nat_delta = result
        .deltas
        .iter()
        .find(|delta| delta.terraform_type == "aws_nat_gateway")
        .unwrap();
    assert_eq!(nat_delta.delta_usd, 0.0);

    // base estimate still reports the original region and totals
    assert_eq!(result.base_estimate.region, "us-east-1");
    assert!((result.base_estimate.total_monthly_cost_usd - (ec2 + nat)).abs() < 1e-9);

    let scenario_payload = result.to_json();
    assert_eq!(scenario_payload["region_changed"], true);
    assert!(scenario_payload["deltas"].as_array().unwrap().len() >= 2);

    Ok(())
}

#[tokio::test]
async fn malformed_graph_is_rejected_not_crashed() -> Result<()> {
    init_tracing();

    assert!(IntentGraph::from_value(json!({"providers": ["aws"]})).is_err());
    assert!(IntentGraph::from_value(json!({"resources": 17})).is_err());

    let dir = TempDir::new()?;
    write_ec2_catalog(&dir, "us-east-1", "0.0104")?;
    let config = EngineConfig {
        pricing_cache_dir: dir.path().to_path_buf(),
        prewarm_common_regions: false,
        ..EngineConfig::default()
    };
    let estimator = CostEstimator::new(&config)?;

    let empty = IntentGraph::from_value(json!({"resources": []}))?;
    assert!(estimator.estimate(&empty, None, None).await.is_err());
    Ok(())
}
