//! Circuit breaker implementation for fault tolerance
//!
//! One breaker per upstream service name, created lazily by the registry on
//! first use and living for the process lifetime. State transitions:
//!
//! - CLOSED -> OPEN after `failure_threshold` consecutive failures
//! - OPEN -> HALF_OPEN once `open_duration` has elapsed
//! - HALF_OPEN -> CLOSED on a probe success
//! - HALF_OPEN -> OPEN on a probe failure

use crate::config::BreakerSettings;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, calls pass through
    Closed,
    /// Failing fast, not calling upstream
    Open,
    /// Testing if the service recovered
    HalfOpen,
}

/// Circuit breaker configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before opening
    pub failure_threshold: u32,
    /// Time to remain open before allowing a probe
    pub open_duration: Duration,
    /// Probe requests permitted while half-open
    pub half_open_max_probes: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_duration: Duration::from_secs(60),
            half_open_max_probes: 1,
        }
    }
}

impl From<&BreakerSettings> for CircuitBreakerConfig {
    fn from(settings: &BreakerSettings) -> Self {
        Self {
            failure_threshold: settings.failure_threshold,
            open_duration: settings.open_duration(),
            half_open_max_probes: settings.half_open_max_probes,
        }
    }
}

/// Point-in-time view of a breaker's state
#[derive(Debug, Clone)]
pub struct CircuitBreakerSnapshot {
    pub service_name: String,
    pub state: CircuitState,
    pub consecutive_failures: u32,
    pub last_failure_at: Option<Instant>,
    pub opened_at: Option<Instant>,
    pub half_open_probes_issued: u32,
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    consecutive_failures: u32,
    last_failure_at: Option<Instant>,
    opened_at: Option<Instant>,
    half_open_probes_issued: u32,
}

/// Circuit breaker for one upstream service
#[derive(Debug)]
pub struct CircuitBreaker {
    service_name: String,
    config: CircuitBreakerConfig,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(service_name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            service_name: service_name.into(),
            config,
            state: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                last_failure_at: None,
                opened_at: None,
                half_open_probes_issued: 0,
            }),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Whether a request should proceed. May transition OPEN -> HALF_OPEN
    /// when the open duration has elapsed.
    pub fn allow_request(&self) -> bool {
        let mut state = self.state.lock();

        match state.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let elapsed = state
                    .opened_at
                    .map(|at| at.elapsed() >= self.config.open_duration)
                    .unwrap_or(false);
                if elapsed {
                    warn!(
                        service = %self.service_name,
                        "circuit breaker OPEN -> HALF_OPEN (testing recovery)"
                    );
                    state.state = CircuitState::HalfOpen;
                    state.half_open_probes_issued = 1;
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                if state.half_open_probes_issued < self.config.half_open_max_probes {
                    state.half_open_probes_issued += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record a successful request. Resets the failure count; a half-open
    /// probe success closes the circuit.
    pub fn record_success(&self) {
        let mut state = self.state.lock();

        match state.state {
            CircuitState::HalfOpen => {
                warn!(
                    service = %self.service_name,
                    "circuit breaker HALF_OPEN -> CLOSED (service recovered)"
                );
                state.state = CircuitState::Closed;
                state.consecutive_failures = 0;
                state.half_open_probes_issued = 0;
                state.opened_at = None;
            }
            CircuitState::Closed => {
                state.consecutive_failures = 0;
            }
            CircuitState::Open => {}
        }
    }

    /// Record a failed request. A half-open probe failure reopens the
    /// circuit; reaching the threshold while closed opens it.
    pub fn record_failure(&self) {
        let now = Instant::now();
        let mut state = self.state.lock();
        state.consecutive_failures += 1;
        state.last_failure_at = Some(now);

        match state.state {
            CircuitState::HalfOpen => {
                warn!(
                    service = %self.service_name,
                    "circuit breaker HALF_OPEN -> OPEN (service still failing)"
                );
                state.state = CircuitState::Open;
                state.opened_at = Some(now);
                state.half_open_probes_issued = 0;
            }
            CircuitState::Closed => {
                if state.consecutive_failures >= self.config.failure_threshold {
                    warn!(
                        service = %self.service_name,
                        failures = state.consecutive_failures,
                        "circuit breaker CLOSED -> OPEN"
                    );
                    state.state = CircuitState::Open;
                    state.opened_at = Some(now);
                }
            }
            CircuitState::Open => {}
        }
    }

    pub fn current_state(&self) -> CircuitState {
        self.state.lock().state
    }

    pub fn snapshot(&self) -> CircuitBreakerSnapshot {
        let state = self.state.lock();
        CircuitBreakerSnapshot {
            service_name: self.service_name.clone(),
            state: state.state,
            consecutive_failures: state.consecutive_failures,
            last_failure_at: state.last_failure_at,
            opened_at: state.opened_at,
            half_open_probes_issued: state.half_open_probes_issued,
        }
    }
}

/// Get-or-create store of breakers keyed by service name.
///
/// Explicitly constructed and injected (rather than a process global) so
/// tests can run against isolated instances.
#[derive(Debug, Default)]
pub struct CircuitBreakerRegistry {
    config: CircuitBreakerConfig,
    breakers: DashMap<String, Arc<CircuitBreaker>>,
}

impl CircuitBreakerRegistry {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            breakers: DashMap::new(),
        }
    }

    /// Get the breaker for a service, creating it on first use.
    pub fn get(&self, service_name: &str) -> Arc<CircuitBreaker> {
        self.breakers
            .entry(service_name.to_string())
            .or_insert_with(|| {
                Arc::new(CircuitBreaker::new(service_name, self.config.clone()))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: 3,
            open_duration: Duration::from_millis(50),
            half_open_max_probes: 1,
        }
    }

    #[test]
    fn test_initial_state_is_closed() {
        let breaker = CircuitBreaker::new("aws_pricing", test_config());
        assert_eq!(breaker.current_state(), CircuitState::Closed);
        assert!(breaker.allow_request());
    }

    #[test]
    fn test_opens_after_consecutive_failures() {
        let breaker = CircuitBreaker::new("azure_pricing", test_config());
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.current_state(), CircuitState::Closed);
        breaker.record_failure();
        assert_eq!(breaker.current_state(), CircuitState::Open);
        assert!(!breaker.allow_request());
    }

    #[test]
    fn test_success_resets_failure_count() {
        let breaker = CircuitBreaker::new("azure_pricing", test_config());
        breaker.record_failure();
        breaker.record_failure();
        breaker.record_success();
        assert_eq!(breaker.snapshot().consecutive_failures, 0);
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.current_state(), CircuitState::Closed);
    }

    #[test]
    fn test_open_to_half_open_to_closed() {
        let breaker = CircuitBreaker::new("azure_pricing", test_config());
        for _ in 0..3 {
            breaker.record_failure();
        }
        assert_eq!(breaker.current_state(), CircuitState::Open);
        assert!(!breaker.allow_request());

        std::thread::sleep(Duration::from_millis(80));

        // first request after the open duration is the probe
        assert!(breaker.allow_request());
        assert_eq!(breaker.current_state(), CircuitState::HalfOpen);

        breaker.record_success();
        assert_eq!(breaker.current_state(), CircuitState::Closed);
        assert_eq!(breaker.snapshot().consecutive_failures, 0);
    }

    #[test]
    fn test_half_open_failure_reopens() {
        let breaker = CircuitBreaker::new("azure_pricing", test_config());
        for _ in 0..3 {
            breaker.record_failure();
        }
        std::thread::sleep(Duration::from_millis(80));
        assert!(breaker.allow_request());

        breaker.record_failure();
        assert_eq!(breaker.current_state(), CircuitState::Open);
        assert!(!breaker.allow_request());
    }

    #[test]
    fn test_half_open_limits_probe_count() {
        let breaker = CircuitBreaker::new("azure_pricing", test_config());
        for _ in 0..3 {
            breaker.record_failure();
        }
        std::thread::sleep(Duration::from_millis(80));

        assert!(breaker.allow_request()); // the single permitted probe
        assert!(!breaker.allow_request()); // further requests denied
    }

    #[test]
    fn test_registry_returns_same_instance_per_name() {
        let registry = CircuitBreakerRegistry::new(test_config());
        let first = registry.get("aws_pricing");
        let second = registry.get("aws_pricing");
        assert!(Arc::ptr_eq(&first, &second));

        let other = registry.get("azure_pricing");
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[test]
    fn test_registry_breakers_are_independent() {
        let registry = CircuitBreakerRegistry::new(test_config());
        let aws = registry.get("aws_pricing");
        let azure = registry.get("azure_pricing");
        for _ in 0..3 {
            aws.record_failure();
        }
        assert_eq!(aws.current_state(), CircuitState::Open);
        assert_eq!(azure.current_state(), CircuitState::Closed);
    }

    #[test]
    fn test_concurrent_failures_never_wedge_the_breaker() {
        let breaker = Arc::new(CircuitBreaker::new("aws_pricing", test_config()));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let breaker = Arc::clone(&breaker);
            handles.push(std::thread::spawn(move || {
                for _ in 0..10 {
                    breaker.record_failure();
                    let _ = breaker.allow_request();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(breaker.current_state(), CircuitState::Open);

        // a probe path must still exist
        std::thread::sleep(Duration::from_millis(80));
        assert!(breaker.allow_request());
        breaker.record_success();
        assert_eq!(breaker.current_state(), CircuitState::Closed);
    }
}
