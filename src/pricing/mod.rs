//! Pricing catalog access and remote pricing clients
//!
//! Lookup order for generic instance pricing is: locally indexed bulk
//! catalog first, then a TTL-cached remote client behind a per-service
//! circuit breaker, then the dispatcher's static fallback table.

pub mod aws;
pub mod azure;
pub mod bulk;
pub mod cache;
pub mod gcp;
pub mod offer;
pub mod regions;

pub use aws::AwsPricingClient;
pub use azure::AzurePricingClient;
pub use bulk::BulkPricingIndex;
pub use cache::TtlPriceCache;
pub use gcp::GcpPricingClient;

use crate::utils::error::Result;
use async_trait::async_trait;

/// Common surface of the three remote pricing clients.
///
/// `variant` carries the provider-specific third dimension: operating system
/// for AWS compute, database engine for AWS `db.*` classes, OS type for
/// Azure VMs; the GCP placeholder ignores it.
#[async_trait]
pub trait InstancePricing: Send + Sync {
    /// Hourly on-demand price in USD, or `None` when the instance type is
    /// unknown to this provider.
    async fn get_instance_price(
        &self,
        instance_type: &str,
        region: &str,
        variant: Option<&str>,
    ) -> Result<Option<f64>>;

    /// Upstream service name (matches the circuit breaker name).
    fn service_name(&self) -> &'static str;
}
