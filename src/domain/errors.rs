use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::trading::types::{OrderSide, OrderType};

/// Errors raised while building a fee context or pricing an order fee
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeeError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Invalid configuration: {field} = {value}. Must be non-negative")]
    InvalidConfiguration { field: String, value: Decimal },

    #[error("Unsupported order type {order_type} for {model}")]
    UnsupportedOrderKind { order_type: OrderType, model: String },

    #[error("Missing price data for {symbol}: no usable {side} price")]
    MissingPriceData { symbol: String, side: PriceSide },

    #[error("Arithmetic overflow computing {operation}")]
    ArithmeticOverflow { operation: String },
}

impl FeeError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        FeeError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Side of the book a price was looked up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSide {
    Bid,
    Ask,
}

impl PriceSide {
    /// The side an aggressive order of `side` executes against
    pub fn opposite_of(side: OrderSide) -> Self {
        match side {
            OrderSide::Buy => PriceSide::Ask,
            OrderSide::Sell => PriceSide::Bid,
        }
    }
}

impl std::fmt::Display for PriceSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceSide::Bid => write!(f, "bid"),
            PriceSide::Ask => write!(f, "ask"),
        }
    }
}
