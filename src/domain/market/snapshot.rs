use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{FeeError, PriceSide};
use crate::domain::market::security::Security;

/// Quote observed when the venue accepted an order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmissionSnapshot {
    pub bid: Decimal,
    pub ask: Decimal,
    pub mid: Decimal,
    /// Epoch millis (UTC)
    pub captured_at: i64,
}

impl OrderSubmissionSnapshot {
    pub fn new(bid: Decimal, ask: Decimal) -> Result<Self, FeeError> {
        let sum = bid
            .checked_add(ask)
            .ok_or_else(|| FeeError::ArithmeticOverflow {
                operation: format!("snapshot mid of {} and {}", bid, ask),
            })?;

        Ok(Self {
            bid,
            ask,
            mid: sum / Decimal::TWO,
            captured_at: chrono::Utc::now().timestamp_millis(),
        })
    }

    /// Freeze the live quote of `security`. Both sides must be usable.
    pub fn capture(security: &Security) -> Result<Self, FeeError> {
        let bid = security
            .price(PriceSide::Bid)
            .ok_or_else(|| FeeError::MissingPriceData {
                symbol: security.symbol.clone(),
                side: PriceSide::Bid,
            })?;
        let ask = security
            .price(PriceSide::Ask)
            .ok_or_else(|| FeeError::MissingPriceData {
                symbol: security.symbol.clone(),
                side: PriceSide::Ask,
            })?;

        Self::new(bid, ask)
    }

    /// Snapshot price on `side`, if strictly positive
    pub fn price(&self, side: PriceSide) -> Option<Decimal> {
        let price = match side {
            PriceSide::Bid => self.bid,
            PriceSide::Ask => self.ask,
        };
        Some(price).filter(|p| *p > Decimal::ZERO)
    }
}
