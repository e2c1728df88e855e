//! Order matching algorithm
//!
//! Processes one taker against a book under the caller's exclusive lock.
//! Each iteration fills the best eligible maker with `min(taker remaining,
//! maker remaining)`, emits a trade at the maker's resting price, and
//! decreases the maker in the book. Residual handling is per order type:
//! market and IOC discard, limit rests, FOK prechecks fillability and
//! either fills completely or produces no trades at all.

use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;
use types::fee::FeeModel;
use types::ids::TradeId;
use types::numeric::Quantity;
use types::order::{Order, OrderType};
use types::time::now_millis;
use types::trade::Trade;

use crate::book::OrderBook;

/// Price-time priority matcher.
///
/// Holds the optional fee-model collaborator and the global trade id
/// counter; all book state belongs to the caller.
pub struct MatchingAlgorithm {
    fee_model: Option<Arc<dyn FeeModel>>,
    trade_counter: AtomicU64,
}

impl MatchingAlgorithm {
    pub fn new() -> Self {
        Self {
            fee_model: None,
            trade_counter: AtomicU64::new(0),
        }
    }

    /// Attach a fee model. Without one, all fees are zero.
    pub fn set_fee_model(&mut self, fee_model: Arc<dyn FeeModel>) {
        self.fee_model = Some(fee_model);
    }

    /// Match a taker against the book, mutating both.
    ///
    /// Returns the trades in execution order. The taker's remaining
    /// quantity reflects its fills on return; a limit residual has already
    /// been rested on the book.
    pub fn process(&self, book: &mut OrderBook, taker: &mut Order) -> Vec<Trade> {
        match taker.order_type {
            OrderType::Market => self.sweep(book, taker),
            OrderType::Limit => {
                let trades = self.sweep(book, taker);
                if !taker.remaining_quantity.is_zero() {
                    book.add(taker.clone());
                }
                trades
            }
            OrderType::Ioc => self.sweep(book, taker),
            OrderType::Fok => self.process_fok(book, taker),
            OrderType::StopLoss | OrderType::StopLimit | OrderType::TakeProfit => {
                // Trigger orders are activated into market/limit children
                // before they ever reach the matcher.
                warn!(order_id = %taker.id, "trigger order reached matcher unactivated");
                Vec::new()
            }
        }
    }

    /// Fill loop shared by market, limit, and IOC takers.
    ///
    /// Marketable candidates are re-enumerated after each batch, so a
    /// limit taker keeps matching for as long as it stays marketable and
    /// is never parked while crossed.
    fn sweep(&self, book: &mut OrderBook, taker: &mut Order) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !taker.remaining_quantity.is_zero() {
            let makers = book.matching_orders(taker);
            if makers.is_empty() {
                break;
            }
            for maker_id in &makers {
                if taker.remaining_quantity.is_zero() {
                    break;
                }
                if let Some(trade) = self.execute_fill(book, maker_id, taker) {
                    trades.push(trade);
                }
            }
        }
        trades
    }

    /// Fill-or-kill: precheck that marketable liquidity covers the full
    /// quantity, then fill. Precheck and fill run under the same book lock
    /// held by the caller, so no partial FOK fill is ever observable.
    fn process_fok(&self, book: &mut OrderBook, taker: &mut Order) -> Vec<Trade> {
        let makers = book.matching_orders(taker);
        let available: Decimal = makers
            .iter()
            .filter_map(|id| book.order(id))
            .map(|maker| maker.remaining_quantity.as_decimal())
            .sum();
        if available < taker.remaining_quantity.as_decimal() {
            return Vec::new();
        }

        let mut trades = Vec::new();
        for maker_id in &makers {
            if taker.remaining_quantity.is_zero() {
                break;
            }
            if let Some(trade) = self.execute_fill(book, maker_id, taker) {
                trades.push(trade);
            }
        }
        trades
    }

    /// Execute one fill against a maker, at the maker's resting price.
    fn execute_fill(
        &self,
        book: &mut OrderBook,
        maker_id: &types::ids::OrderId,
        taker: &mut Order,
    ) -> Option<Trade> {
        let maker = book.order(maker_id)?;
        let price = maker.resting_price();
        let quantity = maker.remaining_quantity.min(taker.remaining_quantity);

        let (maker_fee, taker_fee) = match &self.fee_model {
            Some(model) => {
                let fees = model.calculate_fees(&taker.symbol, price, quantity);
                (fees.net_maker_fee(), fees.taker_fee)
            }
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        let trade = Trade::new(
            self.next_trade_id(),
            taker.symbol.clone(),
            price,
            quantity,
            maker_id.clone(),
            taker.id.clone(),
            taker.side,
            maker_fee,
            taker_fee,
            now_millis(),
        );

        book.decrease(maker_id, quantity);
        taker.fill(quantity);
        Some(trade)
    }

    fn next_trade_id(&self) -> TradeId {
        let n = self.trade_counter.fetch_add(1, Ordering::Relaxed) + 1;
        TradeId::new(format!("TRD{}", n))
    }
}

impl Default for MatchingAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::fee::DefaultFeeModel;
    use types::ids::{OrderId, Symbol};
    use types::numeric::Price;
    use types::order::Side;

    fn book() -> OrderBook {
        OrderBook::new(Symbol::new("BTCUSD"))
    }

    fn order(id: &str, side: Side, order_type: OrderType, price: u64, qty: &str) -> Order {
        let price = if order_type == OrderType::Market {
            None
        } else {
            Some(Price::from_u64(price))
        };
        Order::new(
            OrderId::new(id),
            Symbol::new("BTCUSD"),
            side,
            order_type,
            price,
            Quantity::parse(qty).unwrap(),
            1_708_123_456_789,
        )
    }

    #[test]
    fn test_limit_cross_single_fill() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut sell = order("s1", Side::SELL, OrderType::Limit, 100, "1");
        assert!(algo.process(&mut book, &mut sell).is_empty());

        let mut buy = order("b1", Side::BUY, OrderType::Limit, 100, "1");
        let trades = algo.process(&mut book, &mut buy);

        assert_eq!(trades.len(), 1);
        let trade = &trades[0];
        assert_eq!(trade.price, Price::from_u64(100));
        assert_eq!(trade.quantity, Quantity::from_u64(1));
        assert_eq!(trade.maker_order_id, OrderId::new("s1"));
        assert_eq!(trade.taker_order_id, OrderId::new("b1"));
        assert_eq!(trade.aggressor_side, Side::BUY);
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_execution_at_maker_price() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut sell = order("s1", Side::SELL, OrderType::Limit, 100, "1");
        algo.process(&mut book, &mut sell);

        // Taker willing to pay 105 still executes at the resting 100
        let mut buy = order("b1", Side::BUY, OrderType::Limit, 105, "1");
        let trades = algo.process(&mut book, &mut buy);
        assert_eq!(trades[0].price, Price::from_u64(100));
    }

    #[test]
    fn test_market_sweeps_levels_and_discards_residual() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut s1 = order("s1", Side::SELL, OrderType::Limit, 100, "1");
        let mut s2 = order("s2", Side::SELL, OrderType::Limit, 101, "1");
        algo.process(&mut book, &mut s1);
        algo.process(&mut book, &mut s2);

        let mut buy = order("b1", Side::BUY, OrderType::Market, 0, "3");
        let trades = algo.process(&mut book, &mut buy);

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].price, Price::from_u64(100));
        assert_eq!(trades[1].price, Price::from_u64(101));
        // Liquidity exhausted, residual discarded, nothing rests
        assert_eq!(book.order_count(), 0);
        assert_eq!(buy.remaining_quantity, Quantity::from_u64(1));
    }

    #[test]
    fn test_limit_residual_rests_on_book() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut sell = order("s1", Side::SELL, OrderType::Limit, 100, "1");
        algo.process(&mut book, &mut sell);

        let mut buy = order("b1", Side::BUY, OrderType::Limit, 100, "2.5");
        let trades = algo.process(&mut book, &mut buy);

        assert_eq!(trades.len(), 1);
        assert_eq!(book.order_count(), 1);
        assert_eq!(
            book.best_bid(),
            Some((Price::from_u64(100), Decimal::new(15, 1)))
        );
    }

    #[test]
    fn test_ioc_discards_residual() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut sell = order("s1", Side::SELL, OrderType::Limit, 100, "1");
        algo.process(&mut book, &mut sell);

        let mut buy = order("b1", Side::BUY, OrderType::Ioc, 100, "2");
        let trades = algo.process(&mut book, &mut buy);

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, Quantity::from_u64(1));
        // No residual posted
        assert_eq!(book.order_count(), 0);
    }

    #[test]
    fn test_fok_rejects_when_unfillable() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut sell = order("s1", Side::SELL, OrderType::Limit, 100, "1");
        algo.process(&mut book, &mut sell);

        let mut buy = order("b1", Side::BUY, OrderType::Fok, 100, "2");
        let trades = algo.process(&mut book, &mut buy);

        assert!(trades.is_empty());
        // Book untouched
        assert_eq!(book.order_count(), 1);
        assert_eq!(book.best_ask(), Some((Price::from_u64(100), Decimal::ONE)));
    }

    #[test]
    fn test_fok_fills_across_levels_when_covered() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut s1 = order("s1", Side::SELL, OrderType::Limit, 100, "1");
        let mut s2 = order("s2", Side::SELL, OrderType::Limit, 101, "1.5");
        algo.process(&mut book, &mut s1);
        algo.process(&mut book, &mut s2);

        let mut buy = order("b1", Side::BUY, OrderType::Fok, 101, "2");
        let trades = algo.process(&mut book, &mut buy);

        assert_eq!(trades.len(), 2);
        assert!(buy.remaining_quantity.is_zero());
        // 0.5 of s2 remains
        assert_eq!(
            book.best_ask(),
            Some((Price::from_u64(101), Decimal::new(5, 1)))
        );
    }

    #[test]
    fn test_fifo_within_level() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut m1 = order("m1", Side::SELL, OrderType::Limit, 100, "1");
        let mut m2 = order("m2", Side::SELL, OrderType::Limit, 100, "1");
        algo.process(&mut book, &mut m1);
        algo.process(&mut book, &mut m2);

        let mut buy = order("b1", Side::BUY, OrderType::Limit, 100, "1");
        let trades = algo.process(&mut book, &mut buy);

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].maker_order_id, OrderId::new("m1"));
        assert!(book.has_order(&OrderId::new("m2")));
    }

    #[test]
    fn test_fees_from_model() {
        let mut algo = MatchingAlgorithm::new();
        algo.set_fee_model(Arc::new(DefaultFeeModel::new(
            Decimal::from(2),
            Decimal::from(5),
        )));
        let mut book = book();

        let mut sell = order("s1", Side::SELL, OrderType::Limit, 100, "10");
        algo.process(&mut book, &mut sell);

        let mut buy = order("b1", Side::BUY, OrderType::Limit, 100, "10");
        let trades = algo.process(&mut book, &mut buy);

        // Notional 1000: maker 2 bps = 0.2, taker 5 bps = 0.5
        assert_eq!(trades[0].maker_fee, Decimal::new(2, 1));
        assert_eq!(trades[0].taker_fee, Decimal::new(5, 1));
    }

    #[test]
    fn test_zero_fees_without_model() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut sell = order("s1", Side::SELL, OrderType::Limit, 100, "1");
        algo.process(&mut book, &mut sell);
        let mut buy = order("b1", Side::BUY, OrderType::Limit, 100, "1");
        let trades = algo.process(&mut book, &mut buy);

        assert_eq!(trades[0].maker_fee, Decimal::ZERO);
        assert_eq!(trades[0].taker_fee, Decimal::ZERO);
    }

    #[test]
    fn test_trade_ids_are_monotonic() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        for i in 0..3 {
            let mut sell = order(&format!("s{}", i), Side::SELL, OrderType::Limit, 100, "1");
            algo.process(&mut book, &mut sell);
        }
        let mut buy = order("b1", Side::BUY, OrderType::Market, 0, "3");
        let trades = algo.process(&mut book, &mut buy);

        assert_eq!(trades[0].trade_id, TradeId::new("TRD1"));
        assert_eq!(trades[1].trade_id, TradeId::new("TRD2"));
        assert_eq!(trades[2].trade_id, TradeId::new("TRD3"));
    }

    #[test]
    fn test_no_trade_through() {
        let algo = MatchingAlgorithm::new();
        let mut book = book();

        let mut cheap = order("cheap", Side::SELL, OrderType::Limit, 100, "1");
        let mut pricey = order("pricey", Side::SELL, OrderType::Limit, 102, "1");
        algo.process(&mut book, &mut cheap);
        algo.process(&mut book, &mut pricey);

        let mut buy = order("b1", Side::BUY, OrderType::Limit, 102, "1");
        let trades = algo.process(&mut book, &mut buy);

        // Must take the better-priced maker first
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].maker_order_id, OrderId::new("cheap"));
        assert_eq!(trades[0].price, Price::from_u64(100));
    }
}
