//! Order book infrastructure
//!
//! Price levels, the two sorted book sides, and the per-symbol order book
//! that ties them to the id index.

pub mod ask_side;
pub mod bid_side;
pub mod order_book;
pub mod price_level;

pub use ask_side::AskSide;
pub use bid_side::BidSide;
pub use order_book::{Bbo, OrderBook};
pub use price_level::PriceLevel;
