//! Scenario comparison model

use super::estimate::CostEstimate;
use super::{round1, round2};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Overrides applied to a scenario run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(default)]
    pub region_override: Option<String>,
    #[serde(default)]
    pub autoscaling_average_override: Option<i64>,
    #[serde(default)]
    pub users: Option<i64>,
}

impl ScenarioInput {
    /// Payload with unset overrides omitted.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(region) = &self.region_override {
            map.insert("region_override".to_string(), json!(region));
        }
        if let Some(average) = self.autoscaling_average_override {
            map.insert("autoscaling_average_override".to_string(), json!(average));
        }
        if let Some(users) = self.users {
            map.insert("users".to_string(), json!(users));
        }
        Value::Object(map)
    }
}

/// Cost delta for one resource, keyed by (resource_name, terraform_type)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDeltaLineItem {
    pub resource_name: String,
    pub terraform_type: String,
    pub base_monthly_cost_usd: f64,
    pub scenario_monthly_cost_usd: f64,
    pub delta_usd: f64,
    /// `None` whenever the base cost is zero
    pub delta_percent: Option<f64>,
}

impl ScenarioDeltaLineItem {
    pub fn to_json(&self) -> Value {
        json!({
            "resource_name": self.resource_name,
            "terraform_type": self.terraform_type,
            "base_monthly_cost_usd": round2(self.base_monthly_cost_usd),
            "scenario_monthly_cost_usd": round2(self.scenario_monthly_cost_usd),
            "delta_usd": round2(self.delta_usd),
            "delta_percent": self.delta_percent.map(round1),
        })
    }
}

/// Result of a scenario comparison; the base estimate is never mutated by
/// the scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEstimateResult {
    pub base_estimate: CostEstimate,
    pub scenario_estimate: CostEstimate,
    pub deltas: Vec<ScenarioDeltaLineItem>,
    pub region_changed: bool,
    pub assumptions: Vec<String>,
}

impl ScenarioEstimateResult {
    /// Serialization payload: deltas sorted by absolute delta descending.
    pub fn to_json(&self) -> Value {
        let mut sorted: Vec<&ScenarioDeltaLineItem> = self.deltas.iter().collect();
        sorted.sort_by(|a, b| {
            b.delta_usd
                .abs()
                .partial_cmp(&a.delta_usd.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        json!({
            "region_changed": self.region_changed,
            "assumptions": self.assumptions,
            "base_estimate": self.base_estimate.to_json(),
            "scenario_estimate": self.scenario_estimate.to_json(),
            "deltas": sorted.iter().map(|delta| delta.to_json()).collect::<Vec<_>>(),
        })
    }
}
