//! Trigger order store
//!
//! Stop-loss, stop-limit, and take-profit orders rest here, never on the
//! book, until a trade print satisfies their activation condition. The
//! store preserves insertion order; a single print that satisfies several
//! orders activates them in that order.
//!
//! Activation table (P = last trade price, T = trigger price):
//!
//! | Type        | Sell side | Buy side |
//! |-------------|-----------|----------|
//! | stop-loss   | P ≤ T     | P ≥ T    |
//! | stop-limit  | P ≤ T     | P ≥ T    |
//! | take-profit | P ≥ T     | P ≤ T    |

use types::ids::OrderId;
use types::numeric::Price;
use types::order::{Order, OrderType, Side};

/// Whether a trade print at `last_price` activates this trigger order.
pub fn should_trigger(order: &Order, last_price: Price) -> bool {
    let Some(trigger_price) = order.price else {
        return false;
    };
    match (order.order_type, order.side) {
        (OrderType::StopLoss | OrderType::StopLimit, Side::SELL) => last_price <= trigger_price,
        (OrderType::StopLoss | OrderType::StopLimit, Side::BUY) => last_price >= trigger_price,
        (OrderType::TakeProfit, Side::SELL) => last_price >= trigger_price,
        (OrderType::TakeProfit, Side::BUY) => last_price <= trigger_price,
        _ => false,
    }
}

/// Per-symbol store of trigger orders awaiting activation.
#[derive(Debug, Default)]
pub struct TriggerStore {
    orders: Vec<Order>,
}

impl TriggerStore {
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Add a trigger order. Idempotent by id so WAL replay cannot
    /// duplicate a resting trigger; returns false on a duplicate.
    pub fn insert(&mut self, order: Order) -> bool {
        if self.orders.iter().any(|o| o.id == order.id) {
            return false;
        }
        self.orders.push(order);
        true
    }

    /// Cancel by id. Returns false for an unknown id.
    pub fn cancel(&mut self, order_id: &OrderId) -> bool {
        let Some(position) = self.orders.iter().position(|o| &o.id == order_id) else {
            return false;
        };
        self.orders.remove(position);
        true
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.orders.iter().any(|o| &o.id == order_id)
    }

    /// Remove and return every order activated by a print at
    /// `last_price`, in store-insertion order. Non-triggered orders stay.
    pub fn take_triggered(&mut self, last_price: Price) -> Vec<Order> {
        let mut activated = Vec::new();
        let mut remaining = Vec::with_capacity(self.orders.len());
        for order in self.orders.drain(..) {
            if should_trigger(&order, last_price) {
                activated.push(order);
            } else {
                remaining.push(order);
            }
        }
        self.orders = remaining;
        activated
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
