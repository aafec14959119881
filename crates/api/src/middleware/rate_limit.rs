//! Per-client rate limiting over a trailing time window.

use parking_lot::Mutex;
use relay_core::limits::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests allowed per client inside one window
    pub max_requests: usize,
    /// Trailing window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: RATE_LIMIT_MAX_REQUESTS,
            window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
        }
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    /// The client must wait `retry_after` before a request is admitted.
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_limited(&self) -> bool {
        matches!(self, Self::Limited { .. })
    }

    /// Wait time in whole seconds, rounded up, at least 1.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Allowed => None,
            Self::Limited { retry_after } => {
                let ms = retry_after.as_millis() as u64;
                Some(ms.div_ceil(1000).max(1))
            }
        }
    }
}

/// Storage behind the rate limiter.
///
/// The in-memory store is per process. A shared store for multi-instance
/// deployments implements the same contract.
pub trait RateLimitStore: Send + Sync {
    /// Prunes the client's history to the window and reports whether the
    /// client has reached its quota.
    fn check(&self, key: &str, now: Instant) -> RateDecision;

    /// Appends a request instant to the client's history.
    fn record(&self, key: &str, now: Instant);

    /// Checks, then records the request if it was allowed.
    ///
    /// Limited requests are not recorded.
    fn admit(&self, key: &str, now: Instant) -> RateDecision {
        let decision = self.check(key, now);
        if !decision.is_limited() {
            self.record(key, now);
        }
        decision
    }
}

/// In-memory limiter keeping every request instant inside the window.
///
/// Client keys are never evicted; each key's history is pruned whenever
/// that client is checked.
pub struct SlidingWindowLimiter {
    history: Mutex<HashMap<String, VecDeque<Instant>>>,
    config: RateLimitConfig,
}

impl SlidingWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            history: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Number of client keys seen since start.
    pub fn tracked_clients(&self) -> usize {
        self.history.lock().len()
    }

    /// Number of retained instants for a client (without pruning).
    pub fn history_len(&self, key: &str) -> usize {
        self.history.lock().get(key).map_or(0, VecDeque::len)
    }

    fn decide(&self, requests: &mut VecDeque<Instant>, now: Instant) -> RateDecision {
        let window = self.config.window;
        requests.retain(|&at| now.saturating_duration_since(at) < window);

        if requests.len() < self.config.max_requests {
            return RateDecision::Allowed;
        }

        let retry_after = requests
            .iter()
            .min()
            .map(|&oldest| window.saturating_sub(now.saturating_duration_since(oldest)))
            .unwrap_or(window);

        RateDecision::Limited { retry_after }
    }
}

impl RateLimitStore for SlidingWindowLimiter {
    fn check(&self, key: &str, now: Instant) -> RateDecision {
        let mut history = self.history.lock();
        let requests = history.entry(key.to_string()).or_default();
        self.decide(requests, now)
    }

    fn record(&self, key: &str, now: Instant) {
        self.history
            .lock()
            .entry(key.to_string())
            .or_default()
            .push_back(now);
    }

    fn admit(&self, key: &str, now: Instant) -> RateDecision {
        // Single lock so concurrent requests cannot both take the last slot.
        let mut history = self.history.lock();
        let requests = history.entry(key.to_string()).or_default();

        let decision = self.decide(requests, now);
        if !decision.is_limited() {
            requests.push_back(now);
        }
        decision
    }
}

/// Shared rate limiter state.
pub type SharedRateLimiter = Arc<dyn RateLimitStore>;
