use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Stop => write!(f, "STOP"),
            OrderType::StopLimit => write!(f, "STOP_LIMIT"),
        }
    }
}

/// Venue-specific order flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProperties {
    /// Rejected or re-priced by the venue rather than allowed to take liquidity
    pub post_only: bool,
}

/// A trade request as seen by the fee models.
///
/// `quantity` is signed: positive buys, negative sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    pub quantity: Decimal,
    pub order_type: OrderType,
    pub limit_price: Option<Decimal>,
    pub properties: OrderProperties,
    pub timestamp: i64,
}

impl Order {
    fn new(
        symbol: impl Into<String>,
        quantity: Decimal,
        order_type: OrderType,
        limit_price: Option<Decimal>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: symbol.into(),
            quantity,
            order_type,
            limit_price,
            properties: OrderProperties::default(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn market(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(symbol, quantity, OrderType::Market, None)
    }

    pub fn limit(symbol: impl Into<String>, quantity: Decimal, limit_price: Decimal) -> Self {
        Self::new(symbol, quantity, OrderType::Limit, Some(limit_price))
    }

    pub fn stop_market(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(symbol, quantity, OrderType::Stop, None)
    }

    pub fn stop_limit(symbol: impl Into<String>, quantity: Decimal, limit_price: Decimal) -> Self {
        Self::new(symbol, quantity, OrderType::StopLimit, Some(limit_price))
    }

    pub fn with_post_only(mut self, post_only: bool) -> Self {
        self.properties.post_only = post_only;
        self
    }

    /// Direction derived from the quantity sign. A zero quantity counts as a buy.
    pub fn side(&self) -> OrderSide {
        if self.quantity < Decimal::ZERO {
            OrderSide::Sell
        } else {
            OrderSide::Buy
        }
    }

    pub fn abs_quantity(&self) -> Decimal {
        self.quantity.abs()
    }
}
