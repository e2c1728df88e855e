//! Book snapshot files
//!
//! One `<symbol>.json` per book in a snapshot directory. The schema keeps
//! every resting order (not just per-level aggregates) because only the
//! per-order form preserves the ids needed for cancel/modify after a
//! reload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use types::ids::{OrderId, Symbol};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};

#[derive(Error, Debug)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// One resting order in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderState {
    pub id: OrderId,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub price: Decimal,
    pub quantity: Quantity,
    pub timestamp_ms: i64,
}

impl OrderState {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            side: order.side,
            order_type: order.order_type,
            price: order
                .price
                .map(|p| p.as_decimal())
                .unwrap_or(Decimal::ZERO),
            quantity: order.remaining_quantity,
            timestamp_ms: order.created_at,
        }
    }

    /// Rebuild the resting order. Returns None for entries that cannot
    /// rest on a book (no positive price or quantity).
    pub fn into_order(self, symbol: Symbol) -> Option<Order> {
        let price = Price::try_new(self.price)?;
        if self.quantity.is_zero() {
            return None;
        }
        Some(Order::new(
            self.id,
            symbol,
            self.side,
            self.order_type,
            Some(price),
            self.quantity,
            self.timestamp_ms,
        ))
    }
}

/// One price level in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelState {
    pub price: Decimal,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: Decimal,
    pub orders: Vec<OrderState>,
}

/// Serialized form of one symbol's book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookState {
    pub symbol: Symbol,
    pub bids: Vec<LevelState>,
    pub asks: Vec<LevelState>,
}

impl BookState {
    /// Write this book to `<dir>/<symbol>.json`, creating the directory.
    pub fn save(&self, dir: &Path) -> Result<(), StateError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", self.symbol));
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load every `*.json` book file from a snapshot directory.
    pub fn load_all(dir: &Path) -> Result<Vec<BookState>, StateError> {
        if !dir.is_dir() {
            return Err(StateError::NotADirectory(dir.to_path_buf()));
        }

        let mut books: Vec<BookState> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let json = fs::read_to_string(&path)?;
            books.push(serde_json::from_str(&json)?);
        }
        // Stable order regardless of directory enumeration
        books.sort_by(|a, b| a.symbol.as_str().cmp(b.symbol.as_str()));
        Ok(books)
    }
}
