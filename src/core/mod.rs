//! Core cost resolution pipeline
//!
//! Data model, region/count resolution, the per-resource pricing dispatcher,
//! and the estimate aggregator with its scenario engine.

pub mod dispatch;
pub mod estimator;
pub mod resolver;
pub mod types;
