//! Fee model collaborator
//!
//! Invoked once per trade by the matching algorithm. Absence of a model
//! means zero fees. Fees are absolute amounts; the maker rebate is
//! subtracted from the maker fee, so a net-negative maker fee is a rebate.

use crate::ids::Symbol;
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;

/// Fee amounts for a single trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
    pub maker_rebate: Decimal,
}

impl FeeBreakdown {
    pub fn zero() -> Self {
        Self {
            maker_fee: Decimal::ZERO,
            taker_fee: Decimal::ZERO,
            maker_rebate: Decimal::ZERO,
        }
    }

    /// Maker fee net of rebate, as recorded on the trade.
    pub fn net_maker_fee(&self) -> Decimal {
        self.maker_fee - self.maker_rebate
    }
}

/// Pluggable fee calculation.
pub trait FeeModel: Send + Sync {
    fn calculate_fees(&self, symbol: &Symbol, price: Price, quantity: Quantity) -> FeeBreakdown;
}

/// Basis-point fee schedule applied uniformly across symbols.
#[derive(Debug, Clone)]
pub struct DefaultFeeModel {
    maker_bps: Decimal,
    taker_bps: Decimal,
    maker_rebate_bps: Decimal,
}

impl DefaultFeeModel {
    pub fn new(maker_bps: Decimal, taker_bps: Decimal) -> Self {
        Self {
            maker_bps,
            taker_bps,
            maker_rebate_bps: Decimal::ZERO,
        }
    }

    pub fn with_maker_rebate(mut self, rebate_bps: Decimal) -> Self {
        self.maker_rebate_bps = rebate_bps;
        self
    }
}

impl Default for DefaultFeeModel {
    /// 2 bps maker / 5 bps taker, no rebate.
    fn default() -> Self {
        Self::new(Decimal::from(2), Decimal::from(5))
    }
}

impl FeeModel for DefaultFeeModel {
    fn calculate_fees(&self, _symbol: &Symbol, price: Price, quantity: Quantity) -> FeeBreakdown {
        let notional = price.as_decimal() * quantity.as_decimal();
        let bps = Decimal::from(10_000);
        FeeBreakdown {
            maker_fee: notional * self.maker_bps / bps,
            taker_fee: notional * self.taker_bps / bps,
            maker_rebate: notional * self.maker_rebate_bps / bps,
        }
    }
}

/// Zero-fee model for tests.
#[derive(Debug, Clone, Default)]
pub struct ZeroFeeModel;

impl FeeModel for ZeroFeeModel {
    fn calculate_fees(&self, _symbol: &Symbol, _price: Price, _quantity: Quantity) -> FeeBreakdown {
        FeeBreakdown::zero()
    }
}
