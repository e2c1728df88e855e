//! Shared domain types for the spot matching engine
//!
//! Identifier newtypes, fixed-point numeric types, the order and trade
//! models, the fee-model collaborator trait, and the error taxonomy used
//! across the engine crates.

pub mod errors;
pub mod fee;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod time;
pub mod trade;

pub use errors::EngineError;
pub use ids::{OrderId, Symbol, TradeId};
pub use numeric::{Price, Quantity};
pub use order::{Order, OrderType, Side};
pub use trade::Trade;
