//! Error taxonomy
//!
//! Admission errors surface to the caller; cancel/modify of an unknown id
//! is a `false` return, not an error. Data-driven failures never abort the
//! process.

use thiserror::Error;

/// Errors surfaced by the engine facade at admission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Rate limit exceeded for symbol: {symbol}")]
    RateLimited { symbol: String },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Unknown order type tag: {0}")]
    UnknownOrderType(u8),
}
