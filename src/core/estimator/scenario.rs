//! Scenario/delta engine
//!
//! Runs the estimator twice — once with no overrides, once with the
//! caller's overrides — and diffs the two results per matched resource.
//! The runs share no mutable state, so the base estimate is provably
//! unaffected by the scenario run.

use super::CostEstimator;
use crate::core::types::{
    CostLineItem, ScenarioDeltaLineItem, ScenarioEstimateResult, ScenarioInput,
};
use crate::utils::error::Result;
use std::collections::BTreeMap;

impl CostEstimator {
    /// Estimate with scenario modeling: base estimate, overridden scenario
    /// estimate, and per-resource deltas sorted at serialization.
    pub async fn estimate_with_scenario(
        &self,
        intent_graph: &crate::core::types::IntentGraph,
        scenario_input: &ScenarioInput,
    ) -> Result<ScenarioEstimateResult> {
        let base_estimate = self.estimate(intent_graph, None, None).await?;

        let mut assumptions = Vec::new();

        let region_override = scenario_input.region_override.as_deref();
        let mut region_changed = false;
        if let Some(region) = region_override {
            if region != base_estimate.region {
                region_changed = true;
                assumptions.push(format!(
                    "Region overridden from {} to {region}",
                    base_estimate.region
                ));
            }
        }

        if let Some(average) = scenario_input.autoscaling_average_override {
            assumptions.push(format!(
                "Autoscaling average overridden to {average} instances"
            ));
        }

        if let Some(users) = scenario_input.users {
            // recorded for the reader; no request multiplier is applied
            assumptions.push(format!("Users overridden to {users}"));
        }

        let scenario_estimate = self
            .estimate(
                intent_graph,
                region_override,
                scenario_input.autoscaling_average_override,
            )
            .await?;

        let deltas = calculate_deltas(&base_estimate.line_items, &scenario_estimate.line_items);

        Ok(ScenarioEstimateResult {
            base_estimate,
            scenario_estimate,
            deltas,
            region_changed,
            assumptions,
        })
    }
}

/// Match line items across the two runs by (resource_name, terraform_type).
/// A key present on only one side contributes 0 for the missing side;
/// `delta_percent` is `None` whenever the base cost is zero.
fn calculate_deltas(
    base_line_items: &[CostLineItem],
    scenario_line_items: &[CostLineItem],
) -> Vec<ScenarioDeltaLineItem> {
    let base_map: BTreeMap<(&str, &str), f64> = base_line_items
        .iter()
        .map(|item| {
            (
                (item.resource_name.as_str(), item.terraform_type.as_str()),
                item.monthly_cost_usd,
            )
        })
        .collect();
    let scenario_map: BTreeMap<(&str, &str), f64> = scenario_line_items
        .iter()
        .map(|item| {
            (
                (item.resource_name.as_str(), item.terraform_type.as_str()),
                item.monthly_cost_usd,
            )
        })
        .collect();

    let mut all_keys: Vec<(&str, &str)> = base_map.keys().chain(scenario_map.keys()).copied().collect();
    all_keys.sort();
    all_keys.dedup();

    all_keys
        .into_iter()
        .map(|key| {
            let (resource_name, terraform_type) = key;
            let base_cost = base_map.get(&key).copied().unwrap_or(0.0);
            let scenario_cost = scenario_map.get(&key).copied().unwrap_or(0.0);
            let delta_usd = scenario_cost - base_cost;
            let delta_percent = if base_cost > 0.0 {
                Some(delta_usd / base_cost * 100.0)
            } else {
                None
            };

            ScenarioDeltaLineItem {
                resource_name: resource_name.to_string(),
                terraform_type: terraform_type.to_string(),
                base_monthly_cost_usd: base_cost,
                scenario_monthly_cost_usd: scenario_cost,
                delta_usd,
                delta_percent,
            }
        })
        .collect()
}
