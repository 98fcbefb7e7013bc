use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

use crate::domain::errors::FeeError;
use crate::domain::market::security::Security;
use crate::domain::trading::fee_context::FeeContext;
use crate::domain::trading::types::Order;

/// Fee charged by a venue for one order, in the security's quote currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFee {
    pub amount: Decimal,
    pub currency: String,
}

impl OrderFee {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency)
    }
}

impl fmt::Display for OrderFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Venue fee schedule.
///
/// Implementations hold only immutable configuration, so a single instance
/// can be shared across threads and queried concurrently.
pub trait FeeModel: Debug + Send + Sync {
    /// Fee for the order in `context`. Never negative.
    fn order_fee(&self, context: &FeeContext<'_>) -> Result<OrderFee, FeeError>;

    /// Get description of the fee model
    fn description(&self) -> String;
}

/// `rate x price x quantity`, failing instead of panicking when the product
/// leaves the Decimal range
pub fn scaled_amount(rate: Decimal, price: Decimal, quantity: Decimal) -> Result<Decimal, FeeError> {
    rate.checked_mul(price)
        .and_then(|notional_rate| notional_rate.checked_mul(quantity))
        .ok_or_else(|| FeeError::ArithmeticOverflow {
            operation: format!("fee amount {} x {} x {}", rate, price, quantity),
        })
}

/// Prices an order for call sites that hold a security and an order but no
/// context. No submission snapshot is attached; callers that need the quote
/// seen at submission must build the [`FeeContext`] themselves.
pub fn order_fee_for<M>(model: &M, security: &Security, order: &Order) -> Result<OrderFee, FeeError>
where
    M: FeeModel + ?Sized,
{
    let context = FeeContext::new(security, order)?;
    model.order_fee(&context)
}
