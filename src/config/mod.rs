//! Engine configuration
//!
//! Consumers construct an [`EngineConfig`] directly or deserialize one from
//! JSON/TOML-shaped data. Every field has a default so a bare `{}` document
//! yields a working local configuration.

use crate::utils::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Fixed hours-per-month constant used project-wide for 24/7 assumptions.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Default region applied when a resource carries no usable region info.
pub const DEFAULT_REGION: &str = "us-east-1";

fn default_cache_dir() -> PathBuf {
    PathBuf::from("pricing-cache/aws")
}

fn default_pricing_cache_ttl_secs() -> u64 {
    86_400 // 24 hours
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Root of the locally cached bulk pricing catalog
    /// (`<root>/<ServiceCode>/<region>.json[.gz]`)
    #[serde(default = "default_cache_dir")]
    pub pricing_cache_dir: PathBuf,
    /// TTL for remote pricing lookups, in seconds
    #[serde(default = "default_pricing_cache_ttl_secs")]
    pub pricing_cache_ttl_secs: u64,
    /// Bounded timeout for a single remote pricing call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Eagerly index common service/region pairs at construction
    #[serde(default = "default_true")]
    pub prewarm_common_regions: bool,
    /// Circuit breaker settings shared by all upstream pricing services
    #[serde(default)]
    pub breaker: BreakerSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pricing_cache_dir: default_cache_dir(),
            pricing_cache_ttl_secs: default_pricing_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            prewarm_common_regions: default_true(),
            breaker: BreakerSettings::default(),
        }
    }
}

impl EngineConfig {
    pub fn pricing_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.pricing_cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate settings that would otherwise wedge the engine at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(EngineError::config("request_timeout_secs must be > 0"));
        }
        if self.pricing_cache_ttl_secs == 0 {
            return Err(EngineError::config("pricing_cache_ttl_secs must be > 0"));
        }
        self.breaker.validate()
    }
}

fn default_failure_threshold() -> u32 {
    3
}

fn default_open_duration_secs() -> u64 {
    60
}

fn default_half_open_max_probes() -> u32 {
    1
}

/// Circuit breaker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakerSettings {
    /// Consecutive failures before the breaker opens
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// Seconds to remain open before allowing a recovery probe
    #[serde(default = "default_open_duration_secs")]
    pub open_duration_secs: u64,
    /// Probe requests permitted while half-open
    #[serde(default = "default_half_open_max_probes")]
    pub half_open_max_probes: u32,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            open_duration_secs: default_open_duration_secs(),
            half_open_max_probes: default_half_open_max_probes(),
        }
    }
}

impl BreakerSettings {
    pub fn open_duration(&self) -> Duration {
        Duration::from_secs(self.open_duration_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.failure_threshold == 0 {
            return Err(EngineError::config(
                "breaker.failure_threshold must be > 0",
            ));
        }
        if self.half_open_max_probes == 0 {
            return Err(EngineError::config(
                "breaker.half_open_max_probes must be > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.pricing_cache_dir, PathBuf::from("pricing-cache/aws"));
        assert_eq!(config.pricing_cache_ttl_secs, 86_400);
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.prewarm_common_regions);
        assert_eq!(config.breaker.failure_threshold, 3);
        assert_eq!(config.breaker.open_duration_secs, 60);
        assert_eq!(config.breaker.half_open_max_probes, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_deserializes_to_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.breaker.failure_threshold, 3);
    }

    #[test]
    fn test_partial_document_overrides() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"pricing_cache_ttl_secs": 600, "breaker": {"failure_threshold": 5}}"#,
        )
        .unwrap();
        assert_eq!(config.pricing_cache_ttl(), Duration::from_secs(600));
        assert_eq!(config.breaker.failure_threshold, 5);
        // untouched fields keep their defaults
        assert_eq!(config.breaker.open_duration_secs, 60);
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let mut config = EngineConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.breaker.failure_threshold = 0;
        assert!(config.validate().is_err());
    }
}
