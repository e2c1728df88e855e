//! Per-symbol depth differ
//!
//! Compares the previous published depth view against a fresh one and
//! emits the per-level change set. The first publication for a symbol is
//! always a full snapshot; afterwards only non-empty diffs are published.
//! The stored "previous" view is replaced by the fresh one at emission, so
//! exactly one producer advances it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use types::ids::Symbol;
use types::numeric::Price;

use crate::update::{ChangeOp, DepthLevel, LevelChange, MarketDataUpdate, UpdateKind};

/// Compute the symmetric difference of two depth views for one side.
///
/// Output is sorted by price ascending for deterministic feeds.
pub fn compute_changes(old: &[DepthLevel], new: &[DepthLevel]) -> Vec<LevelChange> {
    let old_map: BTreeMap<Price, Decimal> =
        old.iter().map(|lv| (lv.price, lv.quantity)).collect();
    let new_map: BTreeMap<Price, Decimal> =
        new.iter().map(|lv| (lv.price, lv.quantity)).collect();

    let mut changes = Vec::new();

    for (&price, &quantity) in &new_map {
        match old_map.get(&price) {
            None => changes.push(LevelChange {
                op: ChangeOp::Add,
                price,
                quantity,
            }),
            Some(&old_qty) if old_qty != quantity => changes.push(LevelChange {
                op: ChangeOp::Update,
                price,
                quantity,
            }),
            Some(_) => {}
        }
    }

    for &price in old_map.keys() {
        if !new_map.contains_key(&price) {
            changes.push(LevelChange {
                op: ChangeOp::Remove,
                price,
                quantity: Decimal::ZERO,
            });
        }
    }

    changes.sort_by_key(|c| c.price);
    changes
}

/// Stateful differ for a single symbol.
pub struct DepthDiffer {
    symbol: Symbol,
    last_bids: Option<Vec<DepthLevel>>,
    last_asks: Vec<DepthLevel>,
    next_seq: u64,
}

impl DepthDiffer {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            last_bids: None,
            last_asks: Vec::new(),
            next_seq: 1,
        }
    }

    /// The sequence number the next emitted update will carry.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Publish a fresh depth view.
    ///
    /// Returns the update to fan out, or `None` when nothing changed.
    /// A `None` does not consume a sequence number, so the feed stays
    /// gap-free.
    pub fn publish(
        &mut self,
        bids: Vec<DepthLevel>,
        asks: Vec<DepthLevel>,
        timestamp_ms: i64,
    ) -> Option<MarketDataUpdate> {
        let prev_bids = match self.last_bids.take() {
            None => {
                // First observation: full snapshot
                let seq = self.next_seq;
                self.next_seq += 1;
                let update = MarketDataUpdate::snapshot(
                    self.symbol.clone(),
                    seq,
                    timestamp_ms,
                    bids.clone(),
                    asks.clone(),
                );
                self.last_bids = Some(bids);
                self.last_asks = asks;
                return Some(update);
            }
            Some(prev) => prev,
        };

        let bid_changes = compute_changes(&prev_bids, &bids);
        let ask_changes = compute_changes(&self.last_asks, &asks);

        if bid_changes.is_empty() && ask_changes.is_empty() {
            self.last_bids = Some(prev_bids);
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let update = MarketDataUpdate {
            symbol: self.symbol.clone(),
            kind: UpdateKind::Increment,
            seq_num: seq,
            prev_seq_num: seq - 1,
            gap: false,
            timestamp_ms,
            best_bid: bids.first().copied(),
            best_ask: asks.first().copied(),
            bids: Vec::new(),
            asks: Vec::new(),
            bid_changes,
            ask_changes,
        };

        self.last_bids = Some(bids);
        self.last_asks = asks;
        Some(update)
    }
}
