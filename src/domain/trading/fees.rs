use rust_decimal::Decimal;
use tracing::trace;

use crate::domain::errors::{FeeError, PriceSide};
use crate::domain::trading::fee_context::FeeContext;
use crate::domain::trading::fee_model::{FeeModel, OrderFee, scaled_amount};
use crate::domain::trading::types::OrderType;

fn non_negative(field: &str, value: Decimal) -> Result<Decimal, FeeError> {
    if value < Decimal::ZERO {
        return Err(FeeError::InvalidConfiguration {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Venue that charges nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFeeModel;

impl FeeModel for ZeroFeeModel {
    fn order_fee(&self, context: &FeeContext<'_>) -> Result<OrderFee, FeeError> {
        Ok(OrderFee::zero(context.security().quote_currency.clone()))
    }

    fn description(&self) -> String {
        "Zero Fee Model".to_string()
    }
}

/// Single rate on notional, blind to maker/taker
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRateFeeModel {
    rate: Decimal,
}

impl FlatRateFeeModel {
    pub fn new(rate: Decimal) -> Result<Self, FeeError> {
        Ok(Self {
            rate: non_negative("rate", rate)?,
        })
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

impl FeeModel for FlatRateFeeModel {
    fn order_fee(&self, context: &FeeContext<'_>) -> Result<OrderFee, FeeError> {
        let order = context.order();
        // Stop orders fill at market once triggered
        let reference_price = match order.order_type {
            OrderType::Market | OrderType::Stop => {
                context.prevailing_price(PriceSide::opposite_of(order.side()))?
            }
            OrderType::Limit | OrderType::StopLimit => context.limit_price()?,
        };
        let amount = scaled_amount(self.rate, reference_price, order.abs_quantity())?;

        trace!(
            order_id = %order.id,
            rate = %self.rate,
            %reference_price,
            %amount,
            "FlatRateFeeModel: priced order"
        );

        Ok(OrderFee::new(amount, context.security().quote_currency.clone()))
    }

    fn description(&self) -> String {
        format!(
            "Flat Rate Fee Model ({:.4}%)",
            self.rate * Decimal::ONE_HUNDRED
        )
    }
}

/// Fixed commission per unit traded, with an optional per-order floor
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantFeeModel {
    commission_per_unit: Decimal,
    minimum: Decimal,
}

impl ConstantFeeModel {
    pub fn new(commission_per_unit: Decimal, minimum: Decimal) -> Result<Self, FeeError> {
        Ok(Self {
            commission_per_unit: non_negative("commission_per_unit", commission_per_unit)?,
            minimum: non_negative("minimum", minimum)?,
        })
    }
}

impl FeeModel for ConstantFeeModel {
    fn order_fee(&self, context: &FeeContext<'_>) -> Result<OrderFee, FeeError> {
        let quantity = context.order().abs_quantity();
        let currency = context.security().quote_currency.clone();

        if quantity.is_zero() {
            return Ok(OrderFee::zero(currency));
        }

        let amount = self
            .commission_per_unit
            .checked_mul(quantity)
            .ok_or_else(|| FeeError::ArithmeticOverflow {
                operation: format!("commission {} x {}", self.commission_per_unit, quantity),
            })?
            .max(self.minimum);
        Ok(OrderFee::new(amount, currency))
    }

    fn description(&self) -> String {
        format!(
            "Constant Fee Model (Com: {}/unit, Min: {})",
            self.commission_per_unit, self.minimum
        )
    }
}
