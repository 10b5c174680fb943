//! GCP pricing client placeholder
//!
//! The Cloud Billing Catalog API needs service-account auth and a machine
//! type to SKU mapping; until that lands this client always returns `None`.
//! A not-implemented result is expected, not a fault, so the breaker records
//! success.

use crate::config::EngineConfig;
use crate::pricing::cache::TtlPriceCache;
use crate::pricing::InstancePricing;
use crate::resilience::{CircuitBreaker, CircuitBreakerRegistry};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

const SERVICE_NAME: &str = "gcp_pricing";

/// Placeholder client for the GCP Cloud Billing Catalog API
#[derive(Debug)]
pub struct GcpPricingClient {
    #[allow(dead_code)]
    cache: TtlPriceCache,
    breaker: Arc<CircuitBreaker>,
}

impl GcpPricingClient {
    pub fn new(registry: &CircuitBreakerRegistry, config: &EngineConfig) -> Self {
        Self {
            cache: TtlPriceCache::new(config.pricing_cache_ttl()),
            breaker: registry.get(SERVICE_NAME),
        }
    }

    /// Hourly price for a Compute Engine machine type. Always `None` until
    /// catalog support is implemented.
    pub async fn get_compute_instance_price(
        &self,
        _machine_type: &str,
        _region: &str,
    ) -> Result<Option<f64>> {
        warn!("GCP pricing lookup not fully implemented");
        self.breaker.record_success();
        Ok(None)
    }
}

#[async_trait]
impl InstancePricing for GcpPricingClient {
    async fn get_instance_price(
        &self,
        instance_type: &str,
        region: &str,
        _variant: Option<&str>,
    ) -> Result<Option<f64>> {
        self.get_compute_instance_price(instance_type, region).await
    }

    fn service_name(&self) -> &'static str {
        SERVICE_NAME
    }
}
