//! # costplane
//!
//! Cost resolution engine for cloud intent graphs. Turns a structured
//! description of cloud resources into a priced monthly estimate and
//! supports what-if scenario comparison.
//!
//! ## Features
//!
//! - **Region/count resolution**: ambiguous region and replica-count inputs
//!   resolve into concrete values with recorded assumptions
//! - **Pricing dispatcher**: free-resource table, dozens of per-service
//!   pricing formulas, and a generic instance lookup with a three-tier
//!   fallback chain (bulk catalog, remote API, static table)
//! - **Bulk pricing index**: locally cached vendor offer files with lazy
//!   in-memory indexing and a deterministic SKU tie-break policy
//! - **Resilient remote clients**: TTL-cached AWS/Azure lookups, each behind
//!   its own circuit breaker; GCP is an explicit placeholder
//! - **Scenario engine**: base vs. overridden estimate with per-resource
//!   deltas
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use costplane::{CostEstimator, EngineConfig, IntentGraph, ScenarioInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let estimator = CostEstimator::new(&config)?;
//!
//!     let graph = IntentGraph::from_value(serde_json::json!({
//!         "providers": ["aws"],
//!         "resources": [{
//!             "cloud": "aws",
//!             "service": "EC2",
//!             "terraform_type": "aws_instance",
//!             "name": "web",
//!             "region": {"source": "explicit", "value": "us-east-1"},
//!             "count_model": {"type": "fixed", "value": 2, "confidence": "high"},
//!             "size": {"instance_type": "t3.micro"}
//!         }]
//!     }))?;
//!
//!     let estimate = estimator.estimate(&graph, None, None).await?;
//!     println!("{}", estimate.to_json());
//!
//!     let scenario = ScenarioInput {
//!         region_override: Some("eu-west-1".to_string()),
//!         ..ScenarioInput::default()
//!     };
//!     let comparison = estimator.estimate_with_scenario(&graph, &scenario).await?;
//!     println!("{}", comparison.to_json());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod pricing;
pub mod resilience;
pub mod utils;

// Re-export main types
pub use config::{BreakerSettings, EngineConfig, DEFAULT_REGION, HOURS_PER_MONTH};
pub use core::dispatch::{free_resource, PricingDispatcher, PricingOutcome};
pub use core::estimator::CostEstimator;
pub use core::resolver::{resolve_count, resolve_region};
pub use core::types::{
    CloudProvider, Confidence, CostEstimate, CostLineItem, CountKind, CountModel, Coverage,
    IntentGraph, RegionInfo, RegionSource, ResourceSpec, ScenarioDeltaLineItem,
    ScenarioEstimateResult, ScenarioInput, SizeHint, UnpricedResource, UsageProfile,
};
pub use pricing::{
    AwsPricingClient, AzurePricingClient, BulkPricingIndex, GcpPricingClient, InstancePricing,
};
pub use resilience::{CircuitBreaker, CircuitBreakerRegistry, CircuitState};
pub use utils::error::{EngineError, Result};
