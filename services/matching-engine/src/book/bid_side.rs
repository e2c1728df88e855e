//! Bid (buy) side of the book
//!
//! Price levels sorted so the highest bid is best. Backed by a BTreeMap
//! for deterministic iteration; best-first traversal is the map in
//! reverse.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::PriceLevel;

/// Buy-side price levels, best (highest) first.
#[derive(Debug, Clone, Default)]
pub struct BidSide {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidSide {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Append an order to the tail of its price level.
    pub fn insert(&mut self, price: Price, order_id: OrderId, quantity: Decimal) {
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(order_id, quantity);
    }

    /// Remove an order; drops the level when it empties.
    pub fn remove(&mut self, price: Price, order_id: &OrderId, remaining: Decimal) -> bool {
        let Some(level) = self.levels.get_mut(&price) else {
            return false;
        };
        if !level.remove(order_id, remaining) {
            return false;
        }
        if level.is_empty() {
            self.levels.remove(&price);
        }
        true
    }

    /// Adjust a level's aggregate quantity in place.
    pub fn adjust_level(&mut self, price: Price, delta: Decimal) {
        if let Some(level) = self.levels.get_mut(&price) {
            level.adjust_total(delta);
        }
    }

    /// Best bid price and aggregate quantity.
    pub fn best(&self) -> Option<(Price, Decimal)> {
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Top N levels, best first.
    pub fn depth(&self, levels: usize) -> Vec<(Price, Decimal)> {
        self.levels
            .iter()
            .rev()
            .take(levels)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Iterate levels best-first.
    pub fn iter(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        self.levels.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_is_highest_price() {
        let mut side = BidSide::new();
        side.insert(Price::from_u64(100), OrderId::new("a"), Decimal::ONE);
        side.insert(Price::from_u64(102), OrderId::new("b"), Decimal::from(2));
        side.insert(Price::from_u64(99), OrderId::new("c"), Decimal::ONE);

        let (price, qty) = side.best().unwrap();
        assert_eq!(price, Price::from_u64(102));
        assert_eq!(qty, Decimal::from(2));
    }

    #[test]
    fn test_depth_ordering() {
        let mut side = BidSide::new();
        for price in [100u64, 99, 102, 101] {
            side.insert(Price::from_u64(price), OrderId::new(price.to_string()), Decimal::ONE);
        }

        let depth = side.depth(3);
        let prices: Vec<Price> = depth.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            prices,
            vec![Price::from_u64(102), Price::from_u64(101), Price::from_u64(100)]
        );
    }

    #[test]
    fn test_remove_drops_empty_level() {
        let mut side = BidSide::new();
        side.insert(Price::from_u64(100), OrderId::new("a"), Decimal::ONE);

        assert!(side.remove(Price::from_u64(100), &OrderId::new("a"), Decimal::ONE));
        assert!(side.is_empty());
        assert_eq!(side.best(), None);
    }

    #[test]
    fn test_remove_unknown() {
        let mut side = BidSide::new();
        side.insert(Price::from_u64(100), OrderId::new("a"), Decimal::ONE);

        assert!(!side.remove(Price::from_u64(100), &OrderId::new("x"), Decimal::ONE));
        assert!(!side.remove(Price::from_u64(101), &OrderId::new("a"), Decimal::ONE));
        assert_eq!(side.level_count(), 1);
    }
}
