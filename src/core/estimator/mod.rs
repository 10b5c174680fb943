//! Estimate aggregator
//!
//! Walks every resource in the intent graph: resolve region and count,
//! dispatch pricing, accumulate line items and unpriced entries, then total
//! and compute per-provider coverage. A finished estimate is always
//! well-formed, even if every resource ends up unpriced; only an empty or
//! malformed graph aborts the call.

mod scenario;


use crate::config::{EngineConfig, DEFAULT_REGION};
use crate::core::dispatch::{PricingDispatcher, PricingOutcome};
use crate::core::resolver::{resolve_count, resolve_region};
use crate::core::types::{
    CloudProvider, CostEstimate, CostLineItem, Coverage, IntentGraph, UnpricedResource,
};
use crate::pricing::{AwsPricingClient, AzurePricingClient, BulkPricingIndex, GcpPricingClient};
use crate::resilience::CircuitBreakerRegistry;
use crate::utils::error::{EngineError, Result};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{info, warn};

/// Service for estimating costs from an intent graph
pub struct CostEstimator {
    dispatcher: PricingDispatcher,
}

impl CostEstimator {
    /// Build an estimator with its own breaker registry.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let registry = Arc::new(CircuitBreakerRegistry::new((&config.breaker).into()));
        Self::with_registry(config, registry)
    }

    /// Build an estimator against an injected breaker registry.
    ///
    /// Construction is deliberately defensive: when the bulk catalog is
    /// missing the engine falls back to the remote client plus the static
    /// price table instead of failing, which keeps local/demo environments
    /// usable.
    pub fn with_registry(
        config: &EngineConfig,
        registry: Arc<CircuitBreakerRegistry>,
    ) -> Result<Self> {
        config.validate()?;

        let bulk = BulkPricingIndex::open_if_available(
            &config.pricing_cache_dir,
            config.prewarm_common_regions,
        )
        .map(Arc::new);

        // the remote AWS client is only wired up when the local catalog is
        // absent; the catalog answers the same lookups without network I/O
        let aws = if bulk.is_some() {
            info!("using bulk pricing catalog (cached offer files)");
            None
        } else {
            warn!("bulk pricing catalog unavailable, falling back to remote pricing");
            Some(Arc::new(AwsPricingClient::new(&registry, config)))
        };

        let azure = Some(Arc::new(AzurePricingClient::new(&registry, config)));
        let gcp = Some(Arc::new(GcpPricingClient::new(&registry, config)));

        Ok(Self {
            dispatcher: PricingDispatcher::new(bulk, aws, azure, gcp),
        })
    }

    /// Build an estimator from an explicit dispatcher (tests).
    pub fn with_dispatcher(dispatcher: PricingDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Estimate monthly costs for every resource in the graph.
    ///
    /// An empty `resources` list is a schema error. Everything else — a
    /// missing catalog, an open breaker, an unpriceable resource — degrades
    /// into `unpriced_resources` entries, never an error.
    pub async fn estimate(
        &self,
        intent_graph: &IntentGraph,
        region_override: Option<&str>,
        autoscaling_average_override: Option<i64>,
    ) -> Result<CostEstimate> {
        let resources = &intent_graph.resources;
        if resources.is_empty() {
            return Err(EngineError::schema("Intent graph has no resources"));
        }

        let mut line_items: Vec<CostLineItem> = Vec::new();
        let mut unpriced_resources: Vec<UnpricedResource> = Vec::new();

        for resource in resources {
            let (resolved_region, region_assumptions) =
                resolve_region(&resource.region, region_override);
            let (resolved_count, count_assumptions) =
                resolve_count(&resource.count_model, autoscaling_average_override);

            let resolved_count = match resolved_count {
                Some(count) => count,
                None => {
                    unpriced_resources.push(UnpricedResource::new(
                        &resource.name,
                        &resource.terraform_type,
                        "Cannot resolve resource count",
                    ));
                    continue;
                }
            };

            let mut assumptions = region_assumptions;
            assumptions.extend(count_assumptions);

            match self
                .dispatcher
                .price_resource(resource, &resolved_region, resolved_count, assumptions)
                .await
            {
                PricingOutcome::Priced(item) => line_items.push(item),
                PricingOutcome::Unpriced { reason } => {
                    unpriced_resources.push(UnpricedResource::new(
                        &resource.name,
                        &resource.terraform_type,
                        reason,
                    ));
                }
            }
        }

        // total is the exact sum; rounding happens only at serialization
        let total_monthly_cost: f64 = line_items.iter().map(|item| item.monthly_cost_usd).sum();

        let region = line_items
            .first()
            .map(|item| item.region.clone())
            .or_else(|| region_override.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let coverage = calculate_coverage(intent_graph, &line_items);

        Ok(CostEstimate {
            currency: "USD".to_string(),
            total_monthly_cost_usd: total_monthly_cost,
            line_items,
            unpriced_resources,
            region,
            pricing_timestamp: Utc::now(),
            coverage,
        })
    }
}

/// Per-provider coverage: `full` when every resource for the provider was
/// priced, `partial` otherwise. Providers with no implemented pricing path
/// (gcp) are a fixed `not_supported_yet`; providers absent from the graph
/// are omitted.
fn calculate_coverage(
    intent_graph: &IntentGraph,
    line_items: &[CostLineItem],
) -> BTreeMap<String, Coverage> {
    let mut totals: HashMap<CloudProvider, usize> = HashMap::new();
    let mut priced: HashMap<CloudProvider, usize> = HashMap::new();

    for resource in &intent_graph.resources {
        if matches!(
            resource.cloud,
            CloudProvider::Aws | CloudProvider::Azure | CloudProvider::Gcp
        ) {
            *totals.entry(resource.cloud).or_insert(0) += 1;
        }
    }
    for item in line_items {
        *priced.entry(item.cloud).or_insert(0) += 1;
    }

    let mut coverage = BTreeMap::new();
    for (cloud, total) in &totals {
        let status = match cloud {
            CloudProvider::Gcp => Coverage::NotSupportedYet,
            _ => {
                let priced_count = priced.get(cloud).copied().unwrap_or(0);
                if priced_count == *total {
                    Coverage::Full
                } else {
                    Coverage::Partial
                }
            }
        };
        coverage.insert(cloud.as_str().to_string(), status);
    }
    coverage
}
