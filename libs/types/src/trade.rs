//! Trade model
//!
//! A trade records one fill between a resting maker and an aggressing
//! taker. The price is always the maker's resting price.

use crate::ids::{OrderId, Symbol, TradeId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub symbol: Symbol,
    /// Execution price: the maker's resting price.
    pub price: Price,
    pub quantity: Quantity,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    /// Side of the aggressing (taker) order.
    pub aggressor_side: Side,
    /// Absolute maker fee; negative means a rebate.
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
    /// Execution timestamp, Unix milliseconds.
    pub timestamp_ms: i64,
    /// Per-symbol trade sequence number, stamped by the facade at
    /// publication (contiguous, starting at 1).
    pub seq_num: u64,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trade_id: TradeId,
        symbol: Symbol,
        price: Price,
        quantity: Quantity,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        aggressor_side: Side,
        maker_fee: Decimal,
        taker_fee: Decimal,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            trade_id,
            symbol,
            price,
            quantity,
            maker_order_id,
            taker_order_id,
            aggressor_side,
            maker_fee,
            taker_fee,
            timestamp_ms,
            seq_num: 0,
        }
    }

    /// Notional value (price × quantity).
    pub fn trade_value(&self) -> Decimal {
        self.price.as_decimal() * self.quantity.as_decimal()
    }
}
