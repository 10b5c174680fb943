//! AWS remote pricing client
//!
//! Fetches the public price-list offer document for a service/region over
//! HTTPS (no authentication) and extracts the hourly price with the same
//! filter and tie-break rules as the bulk index. Lookup order per call:
//! TTL cache, circuit breaker gate, bounded network fetch. No automatic
//! retries; retrying is the breaker's and caller's concern.

use crate::config::EngineConfig;
use crate::pricing::bulk::normalize_engine;
use crate::pricing::cache::TtlPriceCache;
use crate::pricing::offer::{self, OfferDocument};
use crate::pricing::regions;
use crate::pricing::InstancePricing;
use crate::resilience::{CircuitBreaker, CircuitBreakerRegistry};
use crate::utils::error::{EngineError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://pricing.us-east-1.amazonaws.com";
const SERVICE_NAME: &str = "aws_pricing";

/// Client for the public AWS price-list endpoint
#[derive(Debug)]
pub struct AwsPricingClient {
    http: reqwest::Client,
    cache: TtlPriceCache,
    breaker: Arc<CircuitBreaker>,
    timeout: Duration,
    base_url: String,
}

impl AwsPricingClient {
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

    /// Hourly on-demand price for an EC2 instance type (Linux, shared
    /// tenancy unless an OS is given).
    pub async fn get_ec2_instance_price(
        &self,
        instance_type: &str,
        region: &str,
        operating_system: Option<&str>,
    ) -> Result<Option<f64>> {
        let os = operating_system.unwrap_or("Linux");
        let filters = vec![
            ("instanceType", instance_type.to_string()),
            ("operatingSystem", os.to_string()),
            ("tenancy", "Shared".to_string()),
        ];
        self.lookup("AmazonEC2", instance_type, region, os, &filters)
            .await
    }

    /// Hourly on-demand price for an RDS instance class, Single-AZ.
    pub async fn get_rds_instance_price(
        &self,
        instance_type: &str,
        region: &str,
        engine: Option<&str>,
    ) -> Result<Option<f64>> {
        let engine = normalize_engine(engine.unwrap_or("mysql"));
        let filters = vec![
            ("instanceType", instance_type.to_string()),
            ("databaseEngine", engine.clone()),
            ("deploymentOption", "Single-AZ".to_string()),
        ];
        self.lookup("AmazonRDS", instance_type, region, &engine, &filters)
            .await
    }

    async fn lookup(
        &self,
        service: &str,
        instance_type: &str,
        region: &str,
        variant: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<f64>> {
        let cache_key = format!("{service}:{instance_type}:{region}:{variant}");
        if let Some(price) = self.cache.get(&cache_key) {
            return Ok(Some(price));
        }

        if !regions::is_known_region(region) {
            debug!(region, "unknown AWS region, skipping remote lookup");
            return Ok(None);
        }

        if !self.breaker.allow_request() {
            return Err(EngineError::CircuitOpen(SERVICE_NAME.to_string()));
        }

        let document = match self.fetch_offer(service, region).await {
            Ok(document) => {
                self.breaker.record_success();
                document
            }
            Err(err) => {
                self.breaker.record_failure();
                return Err(err);
            }
        };

        // a well-formed document without a matching SKU is "not found",
        // not a fault
        let price = offer::select_price(&document, filters).map(|(price, _)| price);
        if let Some(price) = price {
            self.cache.insert(cache_key, price);
        }
        Ok(price)
    }

    async fn fetch_offer(&self, service: &str, region: &str) -> Result<OfferDocument> {
        let url = format!(
            "{}/offers/v1.0/aws/{service}/current/{region}/index.json",
            self.base_url
        );
        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    EngineError::timeout(format!("AWS pricing request timed out: {err}"))
                } else {
                    EngineError::Http(err)
                }
            })?;

        if !response.status().is_success() {
            return Err(EngineError::upstream(format!(
                "HTTP {}: failed to fetch AWS offer document",
                response.status()
            )));
        }

        response.json::<OfferDocument>().await.map_err(|err| {
            warn!(%err, "failed to parse AWS offer document");
            EngineError::parsing(format!("failed to parse AWS offer document: {err}"))
        })
    }
}

#[async_trait]
impl InstancePricing for AwsPricingClient {
    /// Routes `db.*` classes to RDS (variant = engine), everything else to
    /// EC2 (variant = operating system).
    async fn get_instance_price(
        &self,
        instance_type: &str,
        region: &str,
        variant: Option<&str>,
    ) -> Result<Option<f64>> {
        if instance_type.starts_with("db.") {
            self.get_rds_instance_price(instance_type, region, variant)
                .await
        } else {
            self.get_ec2_instance_price(instance_type, region, variant)
                .await
        }
    }

    fn service_name(&self) -> &'static str {
        SERVICE_NAME
    }
}
