//! Estimate output model

use super::resource::{CloudProvider, Confidence};
use super::round2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// One priced resource's contribution to an estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLineItem {
    pub cloud: CloudProvider,
    pub service: String,
    pub resource_name: String,
    pub terraform_type: String,
    pub region: String,
    /// Unrounded monthly cost; never negative
    pub monthly_cost_usd: f64,
    /// e.g. "hour", "month", "GB-month"
    pub pricing_unit: String,
    /// Ordered, append-only, human-readable
    pub assumptions: Vec<String>,
    pub priced: bool,
    pub confidence: Confidence,
}

impl CostLineItem {
    /// Serialization payload, cost rounded to cents.
    pub fn to_json(&self) -> Value {
        json!({
            "cloud": self.cloud.as_str(),
            "service": self.service,
            "resource_name": self.resource_name,
            "terraform_type": self.terraform_type,
            "region": self.region,
            "monthly_cost_usd": round2(self.monthly_cost_usd),
            "pricing_unit": self.pricing_unit,
            "assumptions": self.assumptions,
            "priced": self.priced,
            "confidence": self.confidence.as_str(),
        })
    }
}

/// A resource that could not be assigned a cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpricedResource {
    pub resource_name: String,
    pub terraform_type: String,
    pub reason: String,
}

impl UnpricedResource {
    pub fn new(
        resource_name: impl Into<String>,
        terraform_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            resource_name: resource_name.into(),
            terraform_type: terraform_type.into(),
            reason: reason.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "resource_name": self.resource_name,
            "terraform_type": self.terraform_type,
            "reason": self.reason,
        })
    }
}

/// Per-provider pricing coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    Full,
    Partial,
    NotSupportedYet,
}

impl Coverage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
            Self::NotSupportedYet => "not_supported_yet",
        }
    }
}

/// A complete cost estimate; immutable once returned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub currency: String,
    /// Exact sum of `line_items` costs, unrounded
    pub total_monthly_cost_usd: f64,
    pub line_items: Vec<CostLineItem>,
    pub unpriced_resources: Vec<UnpricedResource>,
    pub region: String,
    pub pricing_timestamp: DateTime<Utc>,
    pub coverage: BTreeMap<String, Coverage>,
}

impl CostEstimate {
    /// Serialization payload: line items sorted by cost descending, cost
    /// fields rounded to cents, RFC 3339 timestamp.
    pub fn to_json(&self) -> Value {
        let mut sorted: Vec<&CostLineItem> = self.line_items.iter().collect();
        sorted.sort_by(|a, b| {
            b.monthly_cost_usd
                .partial_cmp(&a.monthly_cost_usd)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let coverage: BTreeMap<&str, &str> = self
            .coverage
            .iter()
            .map(|(cloud, status)| (cloud.as_str(), status.as_str()))
            .collect();

        json!({
            "currency": self.currency,
            "total_monthly_cost_usd": round2(self.total_monthly_cost_usd),
            "region": self.region,
            "pricing_timestamp": self.pricing_timestamp.to_rfc3339(),
            "coverage": coverage,
            "line_items": sorted.iter().map(|item| item.to_json()).collect::<Vec<_>>(),
            "unpriced_resources": self
                .unpriced_resources
                .iter()
                .map(|resource| resource.to_json())
                .collect::<Vec<_>>(),
        })
    }
}
