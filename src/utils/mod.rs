//! Utility modules for the cost resolution engine
//!
//! - **error**: Error taxonomy, recovery policy, and the crate-wide `Result` alias

pub mod error;

pub use error::{EngineError, Result};
