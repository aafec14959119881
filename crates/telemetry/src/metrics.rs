//! Internal metrics collection.
//!
//! Counters live in-process and are reported through logs and `/health`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A gauge metric (can go up or down).
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dec(&self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }

    /// Increments now and decrements when the guard drops.
    pub fn track(&self) -> GaugeGuard<'_> {
        self.inc();
        GaugeGuard(self)
    }
}

/// Holds one unit of a [`Gauge`] until dropped.
#[must_use = "the gauge is decremented as soon as the guard drops"]
pub struct GaugeGuard<'a>(&'a Gauge);

impl Drop for GaugeGuard<'_> {
    fn drop(&mut self) {
        self.0.dec();
    }
}

/// Latency histogram in milliseconds.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s, +Inf
    buckets: [AtomicU64; 9],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    // SMTP round trips are slow; buckets start where a handshake ends.
    const BUCKET_BOUNDS: [u64; 8] = [50, 100, 250, 500, 1000, 2500, 5000, 10000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let idx = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len());
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum.load(Ordering::Relaxed) as f64 / count as f64
        }
    }

    /// Returns (upper bound, count) pairs; the overflow bucket has bound `u64::MAX`.
    pub fn buckets(&self) -> Vec<(u64, u64)> {
        Self::BUCKET_BOUNDS
            .iter()
            .copied()
            .chain(std::iter::once(u64::MAX))
            .zip(self.buckets.iter())
            .map(|(bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Collected metrics for the inquiry relay.
#[derive(Debug, Default)]
pub struct Metrics {
    // Request outcomes
    pub inquiries_received: Counter,
    pub inquiries_relayed: Counter,
    pub inquiries_suppressed: Counter,
    pub rate_limited_requests: Counter,
    pub validation_failures: Counter,

    // Mail dispatch
    pub dispatch_failures: Counter,
    pub dispatch_latency_ms: Histogram,
    pub dispatches_in_flight: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            inquiries_received: self.inquiries_received.get(),
            inquiries_relayed: self.inquiries_relayed.get(),
            inquiries_suppressed: self.inquiries_suppressed.get(),
            rate_limited_requests: self.rate_limited_requests.get(),
            validation_failures: self.validation_failures.get(),
            dispatch_failures: self.dispatch_failures.get(),
            dispatch_latency_mean_ms: self.dispatch_latency_ms.mean(),
            dispatches_in_flight: self.dispatches_in_flight.get(),
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub inquiries_received: u64,
    pub inquiries_relayed: u64,
    pub inquiries_suppressed: u64,
    pub rate_limited_requests: u64,
    pub validation_failures: u64,
    pub dispatch_failures: u64,
    pub dispatch_latency_mean_ms: f64,
    pub dispatches_in_flight: u64,
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
