//! Market Data
//!
//! Turns per-symbol book depth into a sequenced feed: the first update for
//! a symbol is a full snapshot, every later one is a set of per-level
//! ADD/UPDATE/REMOVE changes computed by diffing successive depth views.
//! Sequence numbers are per-symbol, contiguous, and start at 1, so a
//! receiver can detect gaps from `prev_seq_num`.

pub mod differ;
pub mod update;

pub use differ::DepthDiffer;
pub use update::{ChangeOp, DepthLevel, LevelChange, MarketDataUpdate, UpdateKind};

/// Default market-data depth (top-N levels per side).
pub const DEFAULT_DEPTH: usize = 10;
