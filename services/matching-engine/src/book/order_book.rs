//! Per-symbol order book
//!
//! Two sorted sides plus an id index that owns every resting order. The
//! sides hold id handles only; all quantity state lives on the owned
//! orders, and every mutation keeps the level aggregates in sync, so for
//! each level `aggregate == Σ remaining` holds between operations.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::ids::{OrderId, Symbol};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};

use super::ask_side::AskSide;
use super::bid_side::BidSide;
use super::price_level::PriceLevel;
use crate::matching::crossing;

/// Best bid and offer in one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bbo {
    pub bid: Option<(Price, Decimal)>,
    pub ask: Option<(Price, Decimal)>,
}

impl Bbo {
    /// True when both sides are populated.
    pub fn is_valid(&self) -> bool {
        self.bid.is_some() && self.ask.is_some()
    }
}

/// Order book for a single symbol.
#[derive(Debug, Clone)]
pub struct OrderBook {
    symbol: Symbol,
    bids: BidSide,
    asks: AskSide,
    orders: HashMap<OrderId, Order>,
}

impl OrderBook {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            bids: BidSide::new(),
            asks: AskSide::new(),
            orders: HashMap::new(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Rest an order on the book, at the tail of its price level.
    ///
    /// Only priced, partially-unfilled orders may rest. A duplicate id is
    /// ignored: the id index is the single owner and must not be clobbered.
    pub fn add(&mut self, order: Order) {
        debug_assert!(order.price.is_some(), "resting order must carry a price");
        debug_assert!(!order.remaining_quantity.is_zero());
        if self.orders.contains_key(&order.id) {
            return;
        }

        let price = order.resting_price();
        let quantity = order.remaining_quantity.as_decimal();
        match order.side {
            Side::BUY => self.bids.insert(price, order.id.clone(), quantity),
            Side::SELL => self.asks.insert(price, order.id.clone(), quantity),
        }
        self.orders.insert(order.id.clone(), order);
    }

    /// Cancel by id. Returns false for an unknown id.
    pub fn cancel(&mut self, order_id: &OrderId) -> bool {
        let Some(order) = self.orders.remove(order_id) else {
            return false;
        };
        let remaining = order.remaining_quantity.as_decimal();
        let price = order.resting_price();
        match order.side {
            Side::BUY => self.bids.remove(price, order_id, remaining),
            Side::SELL => self.asks.remove(price, order_id, remaining),
        };
        true
    }

    /// Quantity-only modify, preserving time priority.
    ///
    /// Accepts `0 < new_quantity ≤ original quantity`; zero degrades to
    /// cancel, and sizing up past the original is rejected (that would
    /// deserve a priority reset, which this book never does).
    pub fn modify(&mut self, order_id: &OrderId, new_quantity: Quantity) -> bool {
        if new_quantity.is_zero() {
            return self.cancel(order_id);
        }

        let Some(order) = self.orders.get_mut(order_id) else {
            return false;
        };
        if new_quantity > order.quantity {
            return false;
        }

        let delta = new_quantity.as_decimal() - order.remaining_quantity.as_decimal();
        let price = order.resting_price();
        let side = order.side;
        order.remaining_quantity = new_quantity;

        match side {
            Side::BUY => self.bids.adjust_level(price, delta),
            Side::SELL => self.asks.adjust_level(price, delta),
        }
        true
    }

    /// Decrease an order's remaining quantity by a fill amount.
    ///
    /// Removes the order when it reaches zero. Returns the remaining
    /// quantity afterwards (zero for unknown or removed orders).
    pub fn decrease(&mut self, order_id: &OrderId, amount: Quantity) -> Quantity {
        let Some(order) = self.orders.get_mut(order_id) else {
            return Quantity::zero();
        };

        let old = order.remaining_quantity;
        let new = old.saturating_sub(amount);
        let price = order.resting_price();
        let side = order.side;

        if new.is_zero() {
            self.orders.remove(order_id);
            match side {
                Side::BUY => self.bids.remove(price, order_id, old.as_decimal()),
                Side::SELL => self.asks.remove(price, order_id, old.as_decimal()),
            };
        } else {
            order.remaining_quantity = new;
            let delta = new.as_decimal() - old.as_decimal();
            match side {
                Side::BUY => self.bids.adjust_level(price, delta),
                Side::SELL => self.asks.adjust_level(price, delta),
            }
        }
        new
    }

    // ── Market data queries ─────────────────────────────────────────

    pub fn best_bid(&self) -> Option<(Price, Decimal)> {
        self.bids.best()
    }

    pub fn best_ask(&self) -> Option<(Price, Decimal)> {
        self.asks.best()
    }

    /// Best bid and offer in a single call.
    pub fn bbo(&self) -> Bbo {
        Bbo {
            bid: self.bids.best(),
            ask: self.asks.best(),
        }
    }

    /// Top N bid levels, best first.
    pub fn top_bids(&self, depth: usize) -> Vec<(Price, Decimal)> {
        self.bids.depth(depth)
    }

    /// Top N ask levels, best first.
    pub fn top_asks(&self, depth: usize) -> Vec<(Price, Decimal)> {
        self.asks.depth(depth)
    }

    // ── Matching queries ────────────────────────────────────────────

    /// Enumerate maker candidates for a taker, best price first and FIFO
    /// within a level, bounded by the taker's remaining quantity.
    ///
    /// The walk stops at the first level worse than the taker's limit;
    /// market orders have no limit and walk the whole side.
    pub fn matching_orders(&self, taker: &Order) -> Vec<OrderId> {
        let limit = taker_limit(taker);
        let mut matches = Vec::new();
        let mut needed = taker.remaining_quantity.as_decimal();

        match taker.side {
            Side::BUY => {
                'levels: for (price, level) in self.asks.iter() {
                    if !crossing::crosses(taker.side, limit, *price) {
                        break;
                    }
                    for order_id in level.iter() {
                        if needed <= Decimal::ZERO {
                            break 'levels;
                        }
                        if let Some(maker) = self.orders.get(order_id) {
                            matches.push(order_id.clone());
                            needed -= maker.remaining_quantity.as_decimal();
                        }
                    }
                }
            }
            Side::SELL => {
                'levels: for (price, level) in self.bids.iter() {
                    if !crossing::crosses(taker.side, limit, *price) {
                        break;
                    }
                    for order_id in level.iter() {
                        if needed <= Decimal::ZERO {
                            break 'levels;
                        }
                        if let Some(maker) = self.orders.get(order_id) {
                            matches.push(order_id.clone());
                            needed -= maker.remaining_quantity.as_decimal();
                        }
                    }
                }
            }
        }
        matches
    }

    /// Whether any opposite-side liquidity is marketable for this taker.
    pub fn has_matching(&self, taker: &Order) -> bool {
        let limit = taker_limit(taker);
        let best = match taker.side {
            Side::BUY => self.asks.best_price(),
            Side::SELL => self.bids.best_price(),
        };
        match best {
            Some(price) => crossing::crosses(taker.side, limit, price),
            None => false,
        }
    }

    // ── Index queries ───────────────────────────────────────────────

    pub fn has_order(&self, order_id: &OrderId) -> bool {
        self.orders.contains_key(order_id)
    }

    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Number of resting orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Bid levels best-first, for snapshots and persistence.
    pub fn bid_levels(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.bids.iter()
    }

    /// Ask levels best-first, for snapshots and persistence.
    pub fn ask_levels(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.asks.iter()
    }
}

/// A market taker has no price bound; every other type is bounded by its
/// submitted price.
fn taker_limit(taker: &Order) -> Option<Price> {
    if taker.order_type == OrderType::Market {
        None
    } else {
        taker.price
    }
}
