//! Matching Engine
//!
//! Multi-symbol limit order book engine with strict price-time priority
//! matching, trigger orders (stop-loss / stop-limit / take-profit), a
//! sequenced market-data feed, and write-ahead-log durability.
//!
//! **Key invariants:**
//! - No externally observable crossed book
//! - Price-time priority strictly enforced; execution at the maker's price
//! - FOK orders fill atomically or not at all
//! - Per-symbol trade and market-data sequences are contiguous
//! - Every admitted mutation is journaled before it becomes visible

pub mod book;
pub mod engine;
pub mod matching;
pub mod metrics;
pub mod rate_limit;
pub mod trigger;

pub use engine::Engine;
pub use matching::MatchingAlgorithm;
