use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::PriceSide;

/// Tradable instrument with its live top-of-book quote.
///
/// Owned by the market data layer; fee models only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    pub symbol: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
}

impl Security {
    pub fn new(
        symbol: impl Into<String>,
        base_currency: impl Into<String>,
        quote_currency: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            base_currency: base_currency.into(),
            quote_currency: quote_currency.into(),
            bid: None,
            ask: None,
        }
    }

    pub fn with_quote(mut self, bid: Decimal, ask: Decimal) -> Self {
        self.set_quote(bid, ask);
        self
    }

    pub fn set_quote(&mut self, bid: Decimal, ask: Decimal) {
        self.bid = Some(bid);
        self.ask = Some(ask);
    }

    /// Live price on `side`, if present and strictly positive
    pub fn price(&self, side: PriceSide) -> Option<Decimal> {
        let price = match side {
            PriceSide::Bid => self.bid,
            PriceSide::Ask => self.ask,
        };
        price.filter(|p| *p > Decimal::ZERO)
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.price(PriceSide::Bid)?;
        let ask = self.price(PriceSide::Ask)?;
        bid.checked_add(ask).map(|sum| sum / Decimal::TWO)
    }
}
