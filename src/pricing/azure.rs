//! Azure retail prices client
//!
//! Queries the public Azure Retail Prices API (no authentication) with an
//! OData filter and picks the consumption price whose product name matches
//! the requested OS. Same wrapper as the other clients: TTL cache, breaker
//! gate, bounded call, no automatic retries.

use crate::config::EngineConfig;
use crate::pricing::cache::TtlPriceCache;
use crate::pricing::InstancePricing;
use crate::resilience::{CircuitBreaker, CircuitBreakerRegistry};
use crate::utils::error::{EngineError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://prices.azure.com/api/retail/prices";
const SERVICE_NAME: &str = "azure_pricing";

#[derive(Debug, Deserialize)]
struct RetailPriceResponse {
    #[serde(rename = "Items", default)]
    items: Vec<RetailPriceItem>,
}

#[derive(Debug, Deserialize)]
struct RetailPriceItem {
    #[serde(rename = "productName", default)]
    product_name: String,
    #[serde(rename = "retailPrice", default)]
    retail_price: Option<f64>,
}

/// Client for the Azure Retail Prices API
#[derive(Debug)]
pub struct AzurePricingClient {
    http: reqwest::Client,
    cache: TtlPriceCache,
    breaker: Arc<CircuitBreaker>,
    timeout: Duration,
    base_url: String,
}

impl AzurePricingClient {
    pub fn new(registry: &CircuitBreakerRegistry, config: &EngineConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache: TtlPriceCache::new(config.pricing_cache_ttl()),
            breaker: registry.get(SERVICE_NAME),
            timeout: config.request_timeout(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Hourly consumption price for a VM SKU. OS type defaults to Linux.
    /// Returns `Ok(None)` when the breaker is open (fail silently) or the
    /// SKU is unknown.
    pub async fn get_virtual_machine_price(
        &self,
        sku_name: &str,
        region: &str,
        os_type: Option<&str>,
    ) -> Result<Option<f64>> {
        let os_type = os_type.unwrap_or("Linux");
        let cache_key = format!("{region}:Compute:{sku_name}");
        if let Some(price) = self.cache.get(&cache_key) {
            return Ok(Some(price));
        }

        if !self.breaker.allow_request() {
            // fail silently, the caller falls through to the next tier
            return Ok(None);
        }

        let normalized_region = normalize_region(region);
        let filter = format!(
            "armRegionName eq '{normalized_region}' \
             and serviceFamily eq 'Compute' \
             and skuName eq '{sku_name}' \
             and priceType eq 'Consumption' \
             and contains(productName, 'Virtual Machines')"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("$filter", filter.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                self.breaker.record_failure();
                if err.is_timeout() {
                    EngineError::timeout(format!("Azure pricing request timed out: {err}"))
                } else {
                    EngineError::Http(err)
                }
            })?;

        if !response.status().is_success() {
            self.breaker.record_failure();
            return Err(EngineError::upstream(format!(
                "HTTP {}: failed to query Azure pricing",
                response.status()
            )));
        }

        let data: RetailPriceResponse = match response.json().await {
            Ok(data) => data,
            Err(err) => {
                // a malformed body counts against the upstream, but the
                // caller can still fall through
                self.breaker.record_failure();
                warn!(%err, "error parsing Azure pricing response");
                return Ok(None);
            }
        };

        let os_needle = os_type.to_lowercase();
        for item in &data.items {
            if item.product_name.to_lowercase().contains(&os_needle) {
                if let Some(price) = item.retail_price {
                    self.cache.insert(cache_key, price);
                    self.breaker.record_success();
                    return Ok(Some(price));
                }
            }
        }

        // not found is not a failure
        self.breaker.record_success();
        Ok(None)
    }
}

/// Azure ARM region names are lowercase without spaces ("East US" -> "eastus").
fn normalize_region(region: &str) -> String {
    region.to_lowercase().replace(' ', "")
}

#[async_trait]
impl InstancePricing for AzurePricingClient {
    async fn get_instance_price(
        &self,
        instance_type: &str,
        region: &str,
        variant: Option<&str>,
    ) -> Result<Option<f64>> {
        self.get_virtual_machine_price(instance_type, region, variant)
            .await
    }

    fn service_name(&self) -> &'static str {
        SERVICE_NAME
    }
}
