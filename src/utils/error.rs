//! Error types for the cost resolution engine
//!
//! Propagation policy: only schema-level failures (empty or malformed intent
//! graph) abort an estimate call. Configuration errors are fatal at
//! construction. Everything else is scoped to the single resource being
//! priced and recovered into the fallback chain or an unpriced entry.

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration errors (fatal at construction)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Intent graph schema errors (abort the whole estimate call)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Upstream pricing service unavailable or returned a bad response
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// Circuit breaker denied the request before any network I/O
    #[error("Circuit breaker open for service: {0}")]
    CircuitOpen(String),

    /// Remote call exceeded its bounded timeout
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Response or catalog parsing errors
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Pricing path that is intentionally not implemented
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl EngineError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema(message.into())
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    /// Whether this failure should trigger the next fallback tier instead of
    /// surfacing to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Upstream(_)
                | Self::CircuitOpen(_)
                | Self::Timeout(_)
                | Self::Http(_)
                | Self::Parsing(_)
                | Self::NotImplemented(_)
        )
    }
}
