//! Write-ahead log
//!
//! One self-describing tagged JSON object per line. The writer flushes
//! after every record so a record is durable before the mutation it
//! journals becomes externally visible. The reader skips malformed lines
//! (logged, counted) instead of failing the whole replay.
//!
//! Record kinds: `submit`, `cancel`, `modify`, `activated`, `trade`.
//! `trade` records are audit-only and are never replayed for effect.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use types::ids::{OrderId, Symbol};
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

#[derive(Error, Debug)]
pub enum WalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Order payload of a `submit` record.
///
/// `price` is a raw decimal so a priceless market order journals as `"0"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub symbol: Symbol,
    pub side: Side,
    pub order_type: OrderType,
    pub price: Decimal,
    pub quantity: Quantity,
}

impl OrderRecord {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            symbol: order.symbol.clone(),
            side: order.side,
            order_type: order.order_type,
            price: order
                .price
                .map(|p| p.as_decimal())
                .unwrap_or(Decimal::ZERO),
            quantity: order.quantity,
        }
    }

    /// Reconstruct the order for replay. Returns None when the payload
    /// cannot describe a valid order (non-positive quantity).
    pub fn into_order(self, created_at: i64) -> Option<Order> {
        if self.quantity.is_zero() {
            return None;
        }
        Some(Order::new(
            self.id,
            self.symbol,
            self.side,
            self.order_type,
            Price::try_new(self.price),
            self.quantity,
            created_at,
        ))
    }
}

/// One WAL line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WalRecord {
    Submit {
        order: OrderRecord,
    },
    Cancel {
        order_id: OrderId,
    },
    Modify {
        order_id: OrderId,
        new_quantity: Quantity,
    },
    Activated {
        order_id: OrderId,
        symbol: Symbol,
    },
    Trade {
        trade: Trade,
    },
}

/// Append-only WAL writer. Flushes after every record.
pub struct WalWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl WalWriter {
    /// Open (or create) a WAL file for appending.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, WalError> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush it to the OS.
    pub fn append(&mut self, record: &WalRecord) -> Result<(), WalError> {
        let line = serde_json::to_string(record)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Sequential WAL reader.
///
/// Malformed lines are logged and skipped; `skipped()` reports how many.
pub struct WalReader {
    lines: Lines<BufReader<File>>,
    line_no: usize,
    skipped: usize,
}

impl WalReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WalError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
            skipped: 0,
        })
    }

    /// Number of malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Read the next well-formed record, or None at end of file.
    pub fn next_record(&mut self) -> Option<WalRecord> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    warn!(line = self.line_no + 1, %err, "WAL read error, stopping");
                    return None;
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(record) => return Some(record),
                Err(err) => {
                    self.skipped += 1;
                    warn!(line = self.line_no, %err, "skipping malformed WAL line");
                }
            }
        }
    }
}

impl Iterator for WalReader {
    type Item = WalRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
