//! Intent-graph input model
//!
//! One [`ResourceSpec`] per intent-graph entry, consumed read-only. The
//! attribute maps (`size`, `usage`) keep typed optional fields for every key
//! the pricing rules read, plus a flattened `extra` map so unrecognized keys
//! survive a round-trip.

use crate::utils::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Cloud provider of a resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
    #[default]
    #[serde(other)]
    Unknown,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Gcp => "gcp",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resource's region value came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSource {
    Explicit,
    Variable,
    ProviderDefault,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Region info from the intent graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionInfo {
    #[serde(default)]
    pub source: RegionSource,
    #[serde(default)]
    pub value: Option<String>,
}

/// Shape of a resource's replica count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountKind {
    Fixed,
    Autoscaling,
    #[default]
    #[serde(other)]
    Unknown,
}

impl CountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Autoscaling => "autoscaling",
            Self::Unknown => "unknown",
        }
    }
}

/// Confidence level attached to counts and line items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Count model from the intent graph
///
/// Numeric fields are floats because the upstream interpreter emits both
/// `2` and `2.0`; resolution truncates toward zero like the original.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountModel {
    #[serde(rename = "type", default)]
    pub kind: CountKind,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub desired: Option<f64>,
    #[serde(default)]
    pub confidence: Confidence,
}

/// Size hint from the intent graph (instance type, SKU, engine, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SizeHint {
    #[serde(default)]
    pub instance_type: Option<String>,
    #[serde(default)]
    pub instance_class: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub volume_type: Option<String>,
    #[serde(default)]
    pub performance_mode: Option<String>,
    #[serde(default)]
    pub launch_type: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl SizeHint {
    /// Instance type or SKU used for generic lookups. RDS resources commonly
    /// carry `instance_class`, Azure resources `sku`.
    pub fn instance_hint(&self) -> Option<&str> {
        self.instance_type
            .as_deref()
            .or(self.instance_class.as_deref())
            .or(self.sku.as_deref())
    }

    /// Node type used for cache clusters.
    pub fn cache_node_hint(&self) -> Option<&str> {
        self.instance_type.as_deref().or(self.node_type.as_deref())
    }

    /// SKU hint used for Azure VM lookups.
    pub fn sku_hint(&self) -> Option<&str> {
        self.sku.as_deref().or(self.instance_type.as_deref())
    }

    pub fn engine_or_default(&self) -> &str {
        self.engine.as_deref().unwrap_or("mysql")
    }

    pub fn volume_type_or_default(&self) -> &str {
        self.volume_type.as_deref().unwrap_or("gp3")
    }

    pub fn performance_mode_or_default(&self) -> &str {
        self.performance_mode.as_deref().unwrap_or("generalPurpose")
    }
}

/// Usage profile from the intent graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageProfile {
    #[serde(default)]
    pub hours_per_month: Option<f64>,
    #[serde(default)]
    pub storage_gb: Option<f64>,
    #[serde(default)]
    pub requests_per_month: Option<f64>,
    #[serde(default)]
    pub messages_per_month: Option<f64>,
    #[serde(default)]
    pub data_transfer_gb: Option<f64>,
    #[serde(default)]
    pub memory_mb: Option<f64>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
    #[serde(default)]
    pub iops: Option<f64>,
    #[serde(default)]
    pub provisioned_throughput_mbps: Option<f64>,
    #[serde(default)]
    pub lcu_count: Option<f64>,
    #[serde(default)]
    pub nlcu_count: Option<f64>,
    #[serde(default)]
    pub vcpu: Option<f64>,
    #[serde(default)]
    pub memory_gb: Option<f64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl UsageProfile {
    pub fn hours_per_month_or(&self, default: f64) -> f64 {
        self.hours_per_month.unwrap_or(default)
    }
}

fn default_resource_name() -> String {
    "unknown".to_string()
}

/// One resource from the intent graph (immutable input)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(default)]
    pub cloud: CloudProvider,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub service: String,
    #[serde(default = "default_resource_name")]
    pub terraform_type: String,
    #[serde(default = "default_resource_name")]
    pub name: String,
    #[serde(default)]
    pub region: RegionInfo,
    #[serde(default)]
    pub count_model: CountModel,
    #[serde(default)]
    pub size: SizeHint,
    #[serde(default)]
    pub usage: UsageProfile,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for ResourceSpec {
    fn default() -> Self {
        Self {
            cloud: CloudProvider::Unknown,
            category: String::new(),
            service: String::new(),
            terraform_type: default_resource_name(),
            name: default_resource_name(),
            region: RegionInfo::default(),
            count_model: CountModel::default(),
            size: SizeHint::default(),
            usage: UsageProfile::default(),
            extra: HashMap::new(),
        }
    }
}

/// Summary block emitted by the interpretation step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSummary {
    #[serde(default)]
    pub total_resources: u64,
    #[serde(default)]
    pub has_autoscaling: bool,
    #[serde(default)]
    pub has_unknowns: bool,
}

/// Intent graph: the engine's sole input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentGraph {
    #[serde(default)]
    pub providers: Vec<String>,
    pub resources: Vec<ResourceSpec>,
    #[serde(default)]
    pub summary: Option<GraphSummary>,
}

impl IntentGraph {
    /// Parse an intent graph from raw JSON. A missing or non-list
    /// `resources` field is a schema error, not a crash.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| EngineError::schema(format!("invalid intent graph: {e}")))
    }
}
