//! Engine metrics
//!
//! Internal atomic counters back the JSON metrics report; an optional
//! sink collaborator additionally receives per-symbol counters, depth
//! gauges, and per-order latency observations.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Telemetry sink collaborator.
///
/// Implementations must be fast and non-blocking: the engine calls them
/// from inside its critical sections.
pub trait MetricsSink: Send + Sync {
    fn counter_inc(&self, name: &str, labels: &[(&str, &str)]);
    fn gauge_set(&self, name: &str, labels: &[(&str, &str)], value: f64);
    fn histogram_observe(&self, name: &str, value: f64);
}

/// Engine-internal counters behind the metrics report.
#[derive(Debug, Default)]
pub struct EngineCounters {
    pub orders_received: AtomicU64,
    pub orders_cancelled: AtomicU64,
    pub trades_executed: AtomicU64,
}

impl EngineCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, symbols_tracked: usize) -> MetricsReport {
        MetricsReport {
            orders_received: self.orders_received.load(Ordering::Relaxed),
            orders_cancelled: self.orders_cancelled.load(Ordering::Relaxed),
            trades_executed: self.trades_executed.load(Ordering::Relaxed),
            symbols_tracked,
        }
    }
}

/// Snapshot of engine counters, serialized for `get_metrics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    pub orders_received: u64,
    pub orders_cancelled: u64,
    pub trades_executed: u64,
    pub symbols_tracked: usize,
}
