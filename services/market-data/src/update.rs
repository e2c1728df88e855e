//! Market data update structures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::Symbol;
use types::numeric::Price;

/// One aggregated price level of a depth view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: Price,
    pub quantity: Decimal,
}

impl DepthLevel {
    pub fn new(price: Price, quantity: Decimal) -> Self {
        Self { price, quantity }
    }
}

/// Per-level change operation carried by an increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeOp {
    /// Level appeared.
    Add,
    /// Level quantity changed.
    Update,
    /// Level disappeared.
    Remove,
}

/// A single price-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChange {
    pub op: ChangeOp,
    pub price: Price,
    /// New aggregate quantity; zero for REMOVE.
    pub quantity: Decimal,
}

/// Whether an update carries full depth or per-level changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateKind {
    Snapshot,
    Increment,
}

/// One market-data publication for a symbol.
///
/// Snapshots populate `bids`/`asks`; increments populate `bid_changes`/
/// `ask_changes`. Both carry the top-of-book and a per-symbol sequence
/// number. `gap` is always false from the producer; clients set it when
/// `prev_seq_num + 1 != seq_num` on receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataUpdate {
    pub symbol: Symbol,
    pub kind: UpdateKind,
    pub seq_num: u64,
    pub prev_seq_num: u64,
    pub gap: bool,
    pub timestamp_ms: i64,
    pub best_bid: Option<DepthLevel>,
    pub best_ask: Option<DepthLevel>,
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
    pub bid_changes: Vec<LevelChange>,
    pub ask_changes: Vec<LevelChange>,
}

impl MarketDataUpdate {
    /// Build a full snapshot update.
    pub fn snapshot(
        symbol: Symbol,
        seq_num: u64,
        timestamp_ms: i64,
        bids: Vec<DepthLevel>,
        asks: Vec<DepthLevel>,
    ) -> Self {
        Self {
            symbol,
            kind: UpdateKind::Snapshot,
            seq_num,
            prev_seq_num: 0,
            gap: false,
            timestamp_ms,
            best_bid: bids.first().copied(),
            best_ask: asks.first().copied(),
            bids,
            asks,
            bid_changes: Vec::new(),
            ask_changes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_op_wire_format() {
        assert_eq!(serde_json::to_string(&ChangeOp::Add).unwrap(), "\"ADD\"");
        assert_eq!(
            serde_json::to_string(&ChangeOp::Remove).unwrap(),
            "\"REMOVE\""
        );
    }

    #[test]
    fn test_snapshot_builder_sets_best_levels() {
        let bids = vec![
            DepthLevel::new(Price::from_u64(100), Decimal::from(2)),
            DepthLevel::new(Price::from_u64(99), Decimal::from(1)),
        ];
        let asks = vec![DepthLevel::new(Price::from_u64(101), Decimal::from(3))];

        let update = MarketDataUpdate::snapshot(Symbol::new("BTCUSD"), 1, 0, bids, asks);

        assert_eq!(update.kind, UpdateKind::Snapshot);
        assert_eq!(update.best_bid.unwrap().price, Price::from_u64(100));
        assert_eq!(update.best_ask.unwrap().price, Price::from_u64(101));
        assert!(!update.gap);
    }

    #[test]
    fn test_update_roundtrip() {
        let update = MarketDataUpdate::snapshot(
            Symbol::new("ETHUSD"),
            5,
            1_708_123_456_789,
            vec![DepthLevel::new(Price::from_u64(3000), Decimal::from(1))],
            vec![],
        );
        let json = serde_json::to_string(&update).unwrap();
        let decoded: MarketDataUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(update, decoded);
    }
}
