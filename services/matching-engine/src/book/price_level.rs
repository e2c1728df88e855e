//! Price level with FIFO queue
//!
//! A level holds the ids of all orders resting at one price, in arrival
//! order, plus the aggregate remaining quantity. The orders themselves are
//! owned by the book's id index; the level stores handles only, so there
//! is exactly one owner per order. The book keeps the aggregate in sync
//! with every mutation of its orders.

use rust_decimal::Decimal;
use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::Price;

/// All orders resting at a single price, FIFO by arrival.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    orders: VecDeque<OrderId>,
    total_quantity: Decimal,
}

impl PriceLevel {
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_quantity: Decimal::ZERO,
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Append an order at the back of the queue (time priority).
    pub fn push_back(&mut self, order_id: OrderId, quantity: Decimal) {
        self.orders.push_back(order_id);
        self.total_quantity += quantity;
    }

    /// Remove an order wherever it sits in the queue.
    ///
    /// `remaining` is the order's current remaining quantity, which the
    /// aggregate gives back. Returns false if the id is not at this level.
    pub fn remove(&mut self, order_id: &OrderId, remaining: Decimal) -> bool {
        let Some(position) = self.orders.iter().position(|id| id == order_id) else {
            return false;
        };
        self.orders.remove(position);
        self.total_quantity -= remaining;
        if self.total_quantity < Decimal::ZERO {
            self.total_quantity = Decimal::ZERO;
        }
        true
    }

    /// Adjust the aggregate by a signed delta, without touching the queue.
    /// Used for in-place quantity changes (modify, partial fill).
    pub fn adjust_total(&mut self, delta: Decimal) {
        self.total_quantity += delta;
        if self.total_quantity < Decimal::ZERO {
            self.total_quantity = Decimal::ZERO;
        }
    }

    /// The order at the front of the queue (highest time priority).
    pub fn front(&self) -> Option<&OrderId> {
        self.orders.front()
    }

    /// Iterate order ids in time-priority order.
    pub fn iter(&self) -> impl Iterator<Item = &OrderId> {
        self.orders.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn total_quantity(&self) -> Decimal {
        self.total_quantity
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}
