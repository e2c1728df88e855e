//! Persistence
//!
//! Two durability mechanisms with different jobs:
//!
//! - The write-ahead log ([`wal`]) journals every admitted mutation as one
//!   tagged JSON object per line, flushed before the mutation becomes
//!   externally visible. Replaying a WAL reconstructs book state.
//! - Book snapshot files ([`state`]) serialize each symbol's full book
//!   (per-order, so ids survive) to `<symbol>.json` in a directory.

pub mod state;
pub mod wal;

pub use state::{BookState, LevelState, OrderState, StateError};
pub use wal::{OrderRecord, WalError, WalReader, WalRecord, WalWriter};
