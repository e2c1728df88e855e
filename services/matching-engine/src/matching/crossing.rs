//! Crossing detection
//!
//! A taker is marketable against a level when its limit does not bound it
//! away: a buyer crosses asks at or below its limit, a seller crosses bids
//! at or above its limit. A taker with no limit (market order) crosses
//! everything.

use types::numeric::Price;
use types::order::Side;

/// Whether a taker on `side` with `limit` can trade against a level at
/// `level_price` on the opposite side.
pub fn crosses(side: Side, limit: Option<Price>, level_price: Price) -> bool {
    match (side, limit) {
        (_, None) => true,
        (Side::BUY, Some(limit)) => level_price <= limit,
        (Side::SELL, Some(limit)) => level_price >= limit,
    }
}
