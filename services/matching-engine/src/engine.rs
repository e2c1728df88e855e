//! Engine facade
//!
//! Owns the symbol → book map and serializes all work per symbol: an
//! operation holds its symbol's shard lock for the full span of matching,
//! journaling, trade fan-out, trigger evaluation, and market-data
//! publication. Across symbols nothing is ordered; within one symbol the
//! trade and market-data feeds are contiguous and strictly increasing.
//!
//! Subscriber callbacks run on the producer thread inside the critical
//! section and must be fast and non-blocking.
//!
//! WAL discipline: the record for an admitted mutation is written and
//! flushed (under the shard lock) before the mutation's effects fan out.

use dashmap::DashMap;
use market_data::{DepthDiffer, DepthLevel, MarketDataUpdate, DEFAULT_DEPTH};
use parking_lot::Mutex;
use persistence::state::{BookState, LevelState, OrderState};
use persistence::wal::{OrderRecord, WalReader, WalRecord, WalWriter};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};
use types::errors::EngineError;
use types::fee::FeeModel;
use types::ids::{OrderId, Symbol};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::time::now_millis;
use types::trade::Trade;

use crate::book::OrderBook;
use crate::matching::MatchingAlgorithm;
use crate::metrics::{EngineCounters, MetricsSink};
use crate::rate_limit::RateGate;
use crate::trigger::TriggerStore;

/// Trades kept per symbol in the history ring.
const TRADE_HISTORY_CAP: usize = 1000;

/// Bound on trade prints evaluated for trigger activation per operation,
/// guarding pathological trigger configurations.
const MAX_TRIGGER_PRINTS: usize = 256;

type MarketDataCallback = Box<dyn Fn(&MarketDataUpdate) + Send>;
type TradeCallback = Box<dyn Fn(&Trade) + Send>;

/// All per-symbol state, guarded by one mutex per symbol.
struct SymbolShard {
    book: OrderBook,
    triggers: TriggerStore,
    differ: DepthDiffer,
    trade_seq: u64,
    history: VecDeque<Trade>,
    md_subscribers: Vec<MarketDataCallback>,
    trade_subscribers: Vec<TradeCallback>,
}

impl SymbolShard {
    fn new(symbol: Symbol) -> Self {
        Self {
            book: OrderBook::new(symbol.clone()),
            triggers: TriggerStore::new(),
            differ: DepthDiffer::new(symbol),
            trade_seq: 0,
            history: VecDeque::new(),
            md_subscribers: Vec::new(),
            trade_subscribers: Vec::new(),
        }
    }
}

/// Multi-symbol matching engine facade.
pub struct Engine {
    shards: DashMap<Symbol, Arc<Mutex<SymbolShard>>>,
    algorithm: MatchingAlgorithm,
    wal: Mutex<Option<WalWriter>>,
    replaying: AtomicBool,
    rate_gate: Option<Arc<dyn RateGate>>,
    metrics_sink: Option<Arc<dyn MetricsSink>>,
    counters: EngineCounters,
    order_id_counter: AtomicU64,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            shards: DashMap::new(),
            algorithm: MatchingAlgorithm::new(),
            wal: Mutex::new(None),
            replaying: AtomicBool::new(false),
            rate_gate: None,
            metrics_sink: None,
            counters: EngineCounters::new(),
            order_id_counter: AtomicU64::new(0),
        }
    }

    /// Attach a fee model; fees are zero without one.
    pub fn set_fee_model(&mut self, fee_model: Arc<dyn FeeModel>) {
        self.algorithm.set_fee_model(fee_model);
    }

    /// Attach an admission rate gate, consulted before any lock is taken.
    pub fn set_rate_gate(&mut self, gate: Arc<dyn RateGate>) {
        self.rate_gate = Some(gate);
    }

    /// Attach a telemetry sink.
    pub fn set_metrics_sink(&mut self, sink: Arc<dyn MetricsSink>) {
        self.metrics_sink = Some(sink);
    }

    /// Mint an order with a generated `O<n>` id.
    pub fn create_order(
        &self,
        symbol: Symbol,
        side: Side,
        order_type: OrderType,
        price: Option<Price>,
        quantity: Quantity,
    ) -> Order {
        let n = self.order_id_counter.fetch_add(1, Ordering::Relaxed) + 1;
        Order::new(
            OrderId::new(format!("O{}", n)),
            symbol,
            side,
            order_type,
            price,
            quantity,
            now_millis(),
        )
    }

    // ── Order operations ────────────────────────────────────────────

    /// Submit an order for matching (or, for trigger types, parking).
    ///
    /// Returns the trades executed for this order, in execution order.
    /// Trades caused by trigger activations cascade to subscribers and
    /// history but are not part of the return value.
    pub fn submit(&self, order: Order) -> Result<Vec<Trade>, EngineError> {
        if order.order_type.requires_price() && order.price.is_none() {
            return Err(EngineError::InvalidPrice(format!(
                "{:?} order requires a positive price",
                order.order_type
            )));
        }
        if order.remaining_quantity.is_zero() {
            return Err(EngineError::InvalidQuantity(
                "order quantity must be positive".to_string(),
            ));
        }
        if let Some(gate) = &self.rate_gate {
            if !gate.try_accept(&order.symbol) {
                return Err(EngineError::RateLimited {
                    symbol: order.symbol.to_string(),
                });
            }
        }

        let started = Instant::now();
        let symbol = order.symbol.clone();
        self.counters.orders_received.fetch_add(1, Ordering::Relaxed);
        self.counter_inc("engine_orders_received", &symbol);

        let shard = self.shard(&symbol);
        let mut shard = shard.lock();

        if order.is_trigger() {
            self.wal_append(WalRecord::Submit {
                order: OrderRecord::from_order(&order),
            });
            shard.triggers.insert(order);
            self.observe_latency(started);
            return Ok(Vec::new());
        }

        self.wal_append(WalRecord::Submit {
            order: OrderRecord::from_order(&order),
        });

        let mut taker = order;
        let trades = self.algorithm.process(&mut shard.book, &mut taker);
        if !trades.is_empty() {
            self.counter_inc("engine_orders_matched", &symbol);
        }

        let mut prints = VecDeque::with_capacity(trades.len());
        let mut out = Vec::with_capacity(trades.len());
        for mut trade in trades {
            self.publish_trade(&mut shard, &mut trade);
            prints.push_back(trade.price);
            out.push(trade);
        }

        self.run_triggers(&mut shard, prints);
        self.publish_market_data(&mut shard);

        self.gauge_depth(&symbol, &shard.book);
        self.observe_latency(started);
        Ok(out)
    }

    /// Cancel by id, scanning all books and trigger stores.
    pub fn cancel(&self, order_id: &OrderId) -> bool {
        for shard_arc in self.collect_shards() {
            let mut shard = shard_arc.lock();
            if shard.book.cancel(order_id) {
                self.counters.orders_cancelled.fetch_add(1, Ordering::Relaxed);
                self.counter_inc("engine_orders_cancelled", shard.book.symbol());
                self.wal_append(WalRecord::Cancel {
                    order_id: order_id.clone(),
                });
                self.publish_market_data(&mut shard);
                return true;
            }
            if shard.triggers.cancel(order_id) {
                self.counters.orders_cancelled.fetch_add(1, Ordering::Relaxed);
                self.wal_append(WalRecord::Cancel {
                    order_id: order_id.clone(),
                });
                return true;
            }
        }
        false
    }

    /// Quantity-only modify by id, scanning all books.
    ///
    /// `new_quantity` of zero degrades to cancel; sizing up past the
    /// original quantity is rejected with `false`.
    pub fn modify(&self, order_id: &OrderId, new_quantity: Quantity) -> bool {
        for shard_arc in self.collect_shards() {
            let mut shard = shard_arc.lock();
            if shard.book.modify(order_id, new_quantity) {
                self.wal_append(WalRecord::Modify {
                    order_id: order_id.clone(),
                    new_quantity,
                });
                self.publish_market_data(&mut shard);
                return true;
            }
        }
        false
    }

    // ── Market data and trades ──────────────────────────────────────

    /// On-demand depth snapshot. Not part of the sequenced feed, so it
    /// carries sequence number 0.
    pub fn get_market_data(&self, symbol: &Symbol, depth: usize) -> MarketDataUpdate {
        let Some(shard) = self.shards.get(symbol).map(|e| e.value().clone()) else {
            return MarketDataUpdate::snapshot(
                symbol.clone(),
                0,
                now_millis(),
                Vec::new(),
                Vec::new(),
            );
        };
        let shard = shard.lock();
        MarketDataUpdate::snapshot(
            symbol.clone(),
            0,
            now_millis(),
            depth_levels(shard.book.top_bids(depth)),
            depth_levels(shard.book.top_asks(depth)),
        )
    }

    /// The most recent `count` trades for a symbol, oldest first.
    pub fn get_recent_trades(&self, symbol: &Symbol, count: usize) -> Vec<Trade> {
        let Some(shard) = self.shards.get(symbol).map(|e| e.value().clone()) else {
            return Vec::new();
        };
        let shard = shard.lock();
        let skip = shard.history.len().saturating_sub(count);
        shard.history.iter().skip(skip).cloned().collect()
    }

    /// Register a market-data subscriber. The callback runs inside the
    /// symbol's critical section and must not block.
    pub fn subscribe_market_data(
        &self,
        symbol: &Symbol,
        callback: impl Fn(&MarketDataUpdate) + Send + 'static,
    ) {
        let shard = self.shard(symbol);
        shard.lock().md_subscribers.push(Box::new(callback));
    }

    /// Register a trade subscriber. Same execution contract as
    /// [`Engine::subscribe_market_data`].
    pub fn subscribe_trades(&self, symbol: &Symbol, callback: impl Fn(&Trade) + Send + 'static) {
        let shard = self.shard(symbol);
        shard.lock().trade_subscribers.push(Box::new(callback));
    }

    // ── Write-ahead log ─────────────────────────────────────────────

    /// Start journaling to `path` (appending if it exists).
    pub fn start_wal(&self, path: impl AsRef<Path>) -> bool {
        match WalWriter::open(path.as_ref()) {
            Ok(writer) => {
                *self.wal.lock() = Some(writer);
                true
            }
            Err(err) => {
                error!(path = %path.as_ref().display(), %err, "failed to open WAL");
                false
            }
        }
    }

    /// Stop journaling and close the WAL file.
    pub fn stop_wal(&self) {
        *self.wal.lock() = None;
    }

    /// Rebuild engine state from a WAL file.
    ///
    /// Submissions reapply admission logic (triggers park, everything
    /// else matches) idempotently; `activated` and `trade` records are
    /// audit-only and skipped. Journaling and publication are disabled
    /// for the duration. Returns false if the file cannot be opened.
    pub fn replay_wal(&self, path: impl AsRef<Path>) -> bool {
        let mut reader = match WalReader::open(path.as_ref()) {
            Ok(reader) => reader,
            Err(err) => {
                error!(path = %path.as_ref().display(), %err, "failed to open WAL for replay");
                return false;
            }
        };

        self.replaying.store(true, Ordering::SeqCst);
        let mut applied = 0usize;
        while let Some(record) = reader.next_record() {
            match record {
                WalRecord::Submit { order } => {
                    let Some(order) = order.into_order(now_millis()) else {
                        warn!("skipping unreplayable submit record");
                        continue;
                    };
                    let shard = self.shard(&order.symbol);
                    let mut shard = shard.lock();
                    if order.is_trigger() {
                        shard.triggers.insert(order);
                    } else if !shard.book.has_order(&order.id) {
                        let mut taker = order;
                        // Trades during replay rebuild book state only;
                        // they are not re-published or re-journaled.
                        let _ = self.algorithm.process(&mut shard.book, &mut taker);
                    }
                }
                WalRecord::Cancel { order_id } => {
                    self.cancel(&order_id);
                }
                WalRecord::Modify {
                    order_id,
                    new_quantity,
                } => {
                    self.modify(&order_id, new_quantity);
                }
                WalRecord::Activated { .. } | WalRecord::Trade { .. } => {}
            }
            applied += 1;
        }
        self.replaying.store(false, Ordering::SeqCst);
        debug!(applied, skipped = reader.skipped(), "WAL replay finished");
        true
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Write every book to `<dir>/<symbol>.json`. Returns false (with a
    /// log entry) on the first failure; the engine stays usable.
    pub fn save_state(&self, dir: impl AsRef<Path>) -> bool {
        for shard_arc in self.collect_shards() {
            let shard = shard_arc.lock();
            let state = book_state(&shard.book);
            if let Err(err) = state.save(dir.as_ref()) {
                error!(symbol = %shard.book.symbol(), %err, "failed to save book state");
                return false;
            }
        }
        true
    }

    /// Load books from a snapshot directory, clearing and rebuilding each
    /// referenced book. Returns false (with a log entry) on failure.
    pub fn load_state(&self, dir: impl AsRef<Path>) -> bool {
        let books = match BookState::load_all(dir.as_ref()) {
            Ok(books) => books,
            Err(err) => {
                error!(dir = %dir.as_ref().display(), %err, "failed to load state");
                return false;
            }
        };

        for state in books {
            let symbol = state.symbol.clone();
            let shard = self.shard(&symbol);
            let mut shard = shard.lock();
            let mut book = OrderBook::new(symbol.clone());
            for level in state.bids.into_iter().chain(state.asks) {
                for entry in level.orders {
                    if let Some(order) = entry.into_order(symbol.clone()) {
                        book.add(order);
                    }
                }
            }
            shard.book = book;
        }
        true
    }

    // ── Introspection ───────────────────────────────────────────────

    /// JSON metrics document.
    pub fn get_metrics(&self) -> String {
        let report = self.counters.report(self.shards.len());
        serde_json::to_string(&report).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn has_symbol(&self, symbol: &Symbol) -> bool {
        self.shards.contains_key(symbol)
    }

    /// Number of orders resting on a symbol's book.
    pub fn order_count(&self, symbol: &Symbol) -> usize {
        self.shards
            .get(symbol)
            .map(|shard| shard.value().lock().book.order_count())
            .unwrap_or(0)
    }

    /// Number of trigger orders awaiting activation for a symbol.
    pub fn trigger_order_count(&self, symbol: &Symbol) -> usize {
        self.shards
            .get(symbol)
            .map(|shard| shard.value().lock().triggers.len())
            .unwrap_or(0)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn shard(&self, symbol: &Symbol) -> Arc<Mutex<SymbolShard>> {
        self.shards
            .entry(symbol.clone())
            .or_insert_with(|| Arc::new(Mutex::new(SymbolShard::new(symbol.clone()))))
            .value()
            .clone()
    }

    /// Snapshot the shard handles so per-shard locks are never taken
    /// while holding a map guard.
    fn collect_shards(&self) -> Vec<Arc<Mutex<SymbolShard>>> {
        self.shards.iter().map(|e| e.value().clone()).collect()
    }

    /// Stamp, record, and fan out one trade: sequence → history ring →
    /// subscribers → WAL.
    fn publish_trade(&self, shard: &mut SymbolShard, trade: &mut Trade) {
        shard.trade_seq += 1;
        trade.seq_num = shard.trade_seq;
        self.counters.trades_executed.fetch_add(1, Ordering::Relaxed);

        shard.history.push_back(trade.clone());
        if shard.history.len() > TRADE_HISTORY_CAP {
            shard.history.pop_front();
        }

        for callback in &shard.trade_subscribers {
            callback(trade);
        }

        self.wal_append(WalRecord::Trade {
            trade: trade.clone(),
        });
    }

    /// Evaluate triggers to a fixpoint: every print activates eligible
    /// orders in store order, each activation matches immediately, and
    /// its prints feed back into the queue.
    fn run_triggers(&self, shard: &mut SymbolShard, mut prints: VecDeque<Price>) {
        let mut processed = 0usize;
        while let Some(price) = prints.pop_front() {
            processed += 1;
            if processed > MAX_TRIGGER_PRINTS {
                warn!(
                    symbol = %shard.book.symbol(),
                    "trigger cascade exceeded print budget, deferring remainder"
                );
                break;
            }

            for trigger_order in shard.triggers.take_triggered(price) {
                self.wal_append(WalRecord::Activated {
                    order_id: trigger_order.id.clone(),
                    symbol: trigger_order.symbol.clone(),
                });
                debug!(order_id = %trigger_order.id, %price, "trigger activated");

                let mut child = activate_child(&trigger_order);
                let child_trades = self.algorithm.process(&mut shard.book, &mut child);
                for mut trade in child_trades {
                    self.publish_trade(shard, &mut trade);
                    prints.push_back(trade.price);
                }
            }
        }
    }

    /// Diff current depth against the last published view and fan out the
    /// update, if any. Suppressed during replay.
    fn publish_market_data(&self, shard: &mut SymbolShard) {
        if self.replaying.load(Ordering::SeqCst) {
            return;
        }
        let bids = depth_levels(shard.book.top_bids(DEFAULT_DEPTH));
        let asks = depth_levels(shard.book.top_asks(DEFAULT_DEPTH));
        if let Some(update) = shard.differ.publish(bids, asks, now_millis()) {
            for callback in &shard.md_subscribers {
                callback(&update);
            }
        }
    }

    fn wal_append(&self, record: WalRecord) {
        if self.replaying.load(Ordering::SeqCst) {
            return;
        }
        if let Some(writer) = self.wal.lock().as_mut() {
            if let Err(err) = writer.append(&record) {
                error!(%err, "WAL append failed");
            }
        }
    }

    fn counter_inc(&self, name: &str, symbol: &Symbol) {
        if let Some(sink) = &self.metrics_sink {
            sink.counter_inc(name, &[("symbol", symbol.as_str())]);
        }
    }

    fn gauge_depth(&self, symbol: &Symbol, book: &OrderBook) {
        if let Some(sink) = &self.metrics_sink {
            sink.gauge_set(
                "engine_book_depth",
                &[("symbol", symbol.as_str())],
                book.order_count() as f64,
            );
        }
    }

    fn observe_latency(&self, started: Instant) {
        if let Some(sink) = &self.metrics_sink {
            sink.histogram_observe(
                "engine_order_latency_us",
                started.elapsed().as_micros() as f64,
            );
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Synthesize the active child of a triggered order: a limit order at the
/// trigger price for stop-limits, a market order otherwise. The child
/// keeps the parent's id, side, and remaining quantity.
fn activate_child(trigger_order: &Order) -> Order {
    let (child_type, price) = match trigger_order.order_type {
        OrderType::StopLimit => (OrderType::Limit, trigger_order.price),
        _ => (OrderType::Market, None),
    };
    Order::new(
        trigger_order.id.clone(),
        trigger_order.symbol.clone(),
        trigger_order.side,
        child_type,
        price,
        trigger_order.remaining_quantity,
        now_millis(),
    )
}

fn depth_levels(levels: Vec<(Price, Decimal)>) -> Vec<DepthLevel> {
    levels
        .into_iter()
        .map(|(price, quantity)| DepthLevel::new(price, quantity))
        .collect()
}

fn book_state(book: &OrderBook) -> BookState {
    BookState {
        symbol: book.symbol().clone(),
        bids: level_states(book, book.bid_levels()),
        asks: level_states(book, book.ask_levels()),
    }
}

fn level_states<'a>(
    book: &OrderBook,
    levels: impl Iterator<Item = (&'a Price, &'a crate::book::PriceLevel)>,
) -> Vec<LevelState> {
    levels
        .map(|(price, level)| LevelState {
            price: price.as_decimal(),
            total_quantity: level.total_quantity(),
            orders: level
                .iter()
                .filter_map(|id| book.order(id))
                .map(OrderState::from_order)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(id: &str, side: Side, price: u64, qty: &str) -> Order {
        Order::new(
            OrderId::new(id),
            Symbol::new("BTCUSD"),
            side,
            OrderType::Limit,
            Some(Price::from_u64(price)),
            Quantity::parse(qty).unwrap(),
            now_millis(),
        )
    }

    #[test]
    fn test_submit_rests_and_counts() {
        let engine = Engine::new();
        let trades = engine.submit(limit("b1", Side::BUY, 100, "1")).unwrap();

        assert!(trades.is_empty());
        assert!(engine.has_symbol(&Symbol::new("BTCUSD")));
        assert_eq!(engine.order_count(&Symbol::new("BTCUSD")), 1);
    }

    #[test]
    fn test_priced_type_without_price_rejected() {
        let engine = Engine::new();
        let order = Order::new(
            OrderId::new("b1"),
            Symbol::new("BTCUSD"),
            Side::BUY,
            OrderType::Limit,
            None,
            Quantity::from_u64(1),
            0,
        );
        assert!(matches!(
            engine.submit(order),
            Err(EngineError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_rate_gate_rejection() {
        struct DenyAll;
        impl RateGate for DenyAll {
            fn try_accept(&self, _symbol: &Symbol) -> bool {
                false
            }
        }

        let mut engine = Engine::new();
        engine.set_rate_gate(Arc::new(DenyAll));

        let result = engine.submit(limit("b1", Side::BUY, 100, "1"));
        assert!(matches!(result, Err(EngineError::RateLimited { .. })));
        // Rejected order never reaches a book
        assert!(!engine.has_symbol(&Symbol::new("BTCUSD")));
    }

    #[test]
    fn test_trigger_submission_parks_off_book() {
        let engine = Engine::new();
        let stop = Order::new(
            OrderId::new("stop1"),
            Symbol::new("BTCUSD"),
            Side::SELL,
            OrderType::StopLoss,
            Some(Price::from_u64(99)),
            Quantity::from_u64(1),
            0,
        );

        let trades = engine.submit(stop).unwrap();
        assert!(trades.is_empty());
        assert_eq!(engine.order_count(&Symbol::new("BTCUSD")), 0);
        assert_eq!(engine.trigger_order_count(&Symbol::new("BTCUSD")), 1);
    }

    #[test]
    fn test_cancel_reaches_trigger_store() {
        let engine = Engine::new();
        let stop = Order::new(
            OrderId::new("stop1"),
            Symbol::new("BTCUSD"),
            Side::SELL,
            OrderType::StopLoss,
            Some(Price::from_u64(99)),
            Quantity::from_u64(1),
            0,
        );
        engine.submit(stop).unwrap();

        assert!(engine.cancel(&OrderId::new("stop1")));
        assert_eq!(engine.trigger_order_count(&Symbol::new("BTCUSD")), 0);
        assert!(!engine.cancel(&OrderId::new("stop1")));
    }

    #[test]
    fn test_create_order_mints_sequential_ids() {
        let engine = Engine::new();
        let o1 = engine.create_order(
            Symbol::new("BTCUSD"),
            Side::BUY,
            OrderType::Limit,
            Some(Price::from_u64(100)),
            Quantity::from_u64(1),
        );
        let o2 = engine.create_order(
            Symbol::new("BTCUSD"),
            Side::SELL,
            OrderType::Market,
            None,
            Quantity::from_u64(1),
        );

        assert_eq!(o1.id, OrderId::new("O1"));
        assert_eq!(o2.id, OrderId::new("O2"));
    }

    #[test]
    fn test_metrics_json() {
        let engine = Engine::new();
        engine.submit(limit("b1", Side::BUY, 100, "1")).unwrap();
        engine.submit(limit("s1", Side::SELL, 100, "1")).unwrap();
        engine.cancel(&OrderId::new("missing"));

        let metrics: serde_json::Value = serde_json::from_str(&engine.get_metrics()).unwrap();
        assert_eq!(metrics["orders_received"], 2);
        assert_eq!(metrics["orders_cancelled"], 0);
        assert_eq!(metrics["trades_executed"], 1);
        assert_eq!(metrics["symbols_tracked"], 1);
    }

    #[test]
    fn test_get_market_data_unknown_symbol_is_empty_snapshot() {
        let engine = Engine::new();
        let update = engine.get_market_data(&Symbol::new("NOPE"), 10);

        assert!(update.bids.is_empty());
        assert!(update.asks.is_empty());
        assert_eq!(update.seq_num, 0);
    }

    #[test]
    fn test_symbols_are_independent() {
        let engine = Engine::new();
        engine.submit(limit("b1", Side::BUY, 100, "1")).unwrap();

        let eth = Order::new(
            OrderId::new("e1"),
            Symbol::new("ETHUSD"),
            Side::SELL,
            OrderType::Limit,
            Some(Price::from_u64(3000)),
            Quantity::from_u64(2),
            0,
        );
        engine.submit(eth).unwrap();

        assert_eq!(engine.order_count(&Symbol::new("BTCUSD")), 1);
        assert_eq!(engine.order_count(&Symbol::new("ETHUSD")), 1);
    }
}
