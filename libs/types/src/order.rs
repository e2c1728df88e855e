//! Order model
//!
//! Orders have immutable identity (id, symbol, side, type, price, original
//! quantity, arrival timestamp) and a mutable remaining quantity. Trigger
//! types (stop-loss, stop-limit, take-profit) never rest on the book; their
//! `price` field is the trigger price until activation.

use crate::errors::EngineError;
use crate::ids::{OrderId, Symbol};
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

/// Order type, including the off-book trigger types.
///
/// The discriminants are the wire tags used in WAL records and book
/// snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum OrderType {
    /// Execute immediately at best available prices, discard any residual
    Market = 0,
    /// Match while marketable, rest the residual on the book
    Limit = 1,
    /// Immediate-or-cancel: match while marketable, discard residual
    Ioc = 2,
    /// Fill-or-kill: fill entirely atomically or produce no trades
    Fok = 3,
    /// Market order activated when price moves against the position
    StopLoss = 4,
    /// Limit order activated when price reaches the trigger
    StopLimit = 5,
    /// Market order activated when price reaches the profit target
    TakeProfit = 6,
}

impl OrderType {
    /// Whether this type rests in the trigger store until activated.
    pub fn is_trigger(&self) -> bool {
        matches!(
            self,
            OrderType::StopLoss | OrderType::StopLimit | OrderType::TakeProfit
        )
    }

    /// Whether this type requires a price at submission. Only a pure market
    /// order is priceless; trigger types carry their trigger price.
    pub fn requires_price(&self) -> bool {
        !matches!(self, OrderType::Market)
    }
}

impl From<OrderType> for u8 {
    fn from(t: OrderType) -> Self {
        t as u8
    }
}

impl TryFrom<u8> for OrderType {
    type Error = EngineError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(OrderType::Market),
            1 => Ok(OrderType::Limit),
            2 => Ok(OrderType::Ioc),
            3 => Ok(OrderType::Fok),
            4 => Ok(OrderType::StopLoss),
            5 => Ok(OrderType::StopLimit),
            6 => Ok(OrderType::TakeProfit),
            other => Err(EngineError::UnknownOrderType(other)),
        }
    }
}

/// A single order.
///
/// Owned by the book's id index while resting (or by the trigger store for
/// trigger types); everything else refers to it by `OrderId`.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    /// Limit price, or trigger price for trigger types. None for market orders.
    pub price: Option<Price>,
    /// Original quantity at submission.
    pub quantity: Quantity,
    /// Quantity not yet filled.
    pub remaining_quantity: Quantity,
    /// Arrival timestamp, Unix milliseconds.
    pub created_at: i64,
}

impl Order {
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: Side,
        order_type: OrderType,
        price: Option<Price>,
        quantity: Quantity,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            symbol,
            side,
            order_type,
            price,
            quantity,
            remaining_quantity: quantity,
            created_at,
        }
    }

    pub fn is_trigger(&self) -> bool {
        self.order_type.is_trigger()
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_quantity.is_zero()
    }

    /// Reduce the remaining quantity by a fill, clamping at zero.
    pub fn fill(&mut self, quantity: Quantity) {
        self.remaining_quantity = self.remaining_quantity.saturating_sub(quantity);
    }

    /// The resting price of this order.
    ///
    /// # Panics
    /// Panics if called on a priceless (market) order; resting orders
    /// always carry a price.
    pub fn resting_price(&self) -> Price {
        self.price.expect("resting order must carry a price")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit_order(id: &str, side: Side, price: u64, qty: u64) -> Order {
        Order::new(
            OrderId::new(id),
            Symbol::new("BTCUSD"),
            side,
            OrderType::Limit,
            Some(Price::from_u64(price)),
            Quantity::from_u64(qty),
            1_708_123_456_789,
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::BUY.opposite(), Side::SELL);
        assert_eq!(Side::SELL.opposite(), Side::BUY);
    }

    #[test]
    fn test_side_wire_format() {
        assert_eq!(serde_json::to_string(&Side::BUY).unwrap(), "\"buy\"");
        assert_eq!(serde_json::to_string(&Side::SELL).unwrap(), "\"sell\"");
    }

    #[test]
    fn test_order_type_wire_tags() {
        assert_eq!(u8::from(OrderType::Market), 0);
        assert_eq!(u8::from(OrderType::Limit), 1);
        assert_eq!(u8::from(OrderType::Ioc), 2);
        assert_eq!(u8::from(OrderType::Fok), 3);
        assert_eq!(u8::from(OrderType::StopLoss), 4);
        assert_eq!(u8::from(OrderType::StopLimit), 5);
        assert_eq!(u8::from(OrderType::TakeProfit), 6);
    }

    #[test]
    fn test_order_type_from_tag() {
        assert_eq!(OrderType::try_from(1).unwrap(), OrderType::Limit);
        assert!(OrderType::try_from(7).is_err());
    }

    #[test]
    fn test_order_type_trigger_classification() {
        assert!(OrderType::StopLoss.is_trigger());
        assert!(OrderType::StopLimit.is_trigger());
        assert!(OrderType::TakeProfit.is_trigger());
        assert!(!OrderType::Limit.is_trigger());
        assert!(!OrderType::Market.is_trigger());
    }

    #[test]
    fn test_order_fill() {
        let mut order = limit_order("o1", Side::BUY, 100, 5);

        order.fill(Quantity::from_u64(2));
        assert_eq!(order.remaining_quantity, Quantity::from_u64(3));
        assert!(!order.is_filled());

        order.fill(Quantity::from_u64(3));
        assert!(order.is_filled());
        // Original quantity is immutable
        assert_eq!(order.quantity, Quantity::from_u64(5));
    }

    #[test]
    fn test_order_fill_clamps_at_zero() {
        let mut order = limit_order("o1", Side::SELL, 100, 1);
        order.fill(Quantity::from_u64(5));
        assert!(order.is_filled());
    }

    #[test]
    fn test_market_order_has_no_price() {
        let order = Order::new(
            OrderId::new("m1"),
            Symbol::new("BTCUSD"),
            Side::BUY,
            OrderType::Market,
            None,
            Quantity::from_u64(1),
            0,
        );
        assert!(order.price.is_none());
        assert!(!order.order_type.requires_price());
    }
}
