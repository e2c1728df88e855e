//! Per-symbol ingress rate limiting
//!
//! The facade consults the gate at the top of `submit`, before taking any
//! book lock. The default implementation is a token bucket per symbol.

use dashmap::DashMap;
use std::time::Instant;
use types::ids::Symbol;

/// Admission gate consulted once per submitted order.
pub trait RateGate: Send + Sync {
    /// Whether an order for `symbol` may be admitted now.
    fn try_accept(&self, symbol: &Symbol) -> bool;
}

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Token-bucket gate with one bucket per symbol.
///
/// Buckets start full and refill continuously at `tokens_per_sec`, capped
/// at `max_burst`.
pub struct TokenBucketGate {
    buckets: DashMap<Symbol, Bucket>,
    max_burst: f64,
    tokens_per_sec: f64,
}

impl TokenBucketGate {
    pub fn new(max_burst: u32, tokens_per_sec: f64) -> Self {
        Self {
            buckets: DashMap::new(),
            max_burst: f64::from(max_burst),
            tokens_per_sec,
        }
    }

    /// Current token count for a symbol (full bucket if never seen).
    pub fn tokens(&self, symbol: &Symbol) -> f64 {
        self.buckets
            .get(symbol)
            .map(|b| b.tokens)
            .unwrap_or(self.max_burst)
    }
}

impl Default for TokenBucketGate {
    /// 2000 burst, 1000 orders/sec per symbol.
    fn default() -> Self {
        Self::new(2000, 1000.0)
    }
}

impl RateGate for TokenBucketGate {
    fn try_accept(&self, symbol: &Symbol) -> bool {
        let mut bucket = self
            .buckets
            .entry(symbol.clone())
            .or_insert_with(|| Bucket {
                tokens: self.max_burst,
                last_refill: Instant::now(),
            });

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.tokens_per_sec).min(self.max_burst);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}
