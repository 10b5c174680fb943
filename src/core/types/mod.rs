//! Data model for the cost resolution engine
//!
//! Input side: the intent graph produced by the external interpretation step.
//! Output side: estimates, line items, and scenario comparison results. All
//! wire contracts are snake_case JSON; rounding happens only when a payload
//! is serialized, never mid-pipeline.

mod estimate;
mod resource;
mod scenario;

pub use estimate::{CostEstimate, CostLineItem, Coverage, UnpricedResource};
pub use resource::{
    CloudProvider, Confidence, CountKind, CountModel, GraphSummary, IntentGraph, RegionInfo,
    RegionSource, ResourceSpec, SizeHint, UsageProfile,
};
pub use scenario::{ScenarioDeltaLineItem, ScenarioEstimateResult, ScenarioInput};

/// Round to cents for output serialization.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal for percent fields.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
