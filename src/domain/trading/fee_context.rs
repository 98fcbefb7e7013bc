//! Fee Context Value Object
//!
//! Bundles exactly what a fee model reads to price one order: the security,
//! the order and, when the venue reported it, the quote seen at submission.
//!
//! # Invariants
//!
//! - Security and order are always present
//! - `order.symbol` matches `security.symbol`

use rust_decimal::Decimal;

use crate::domain::errors::{FeeError, PriceSide};
use crate::domain::market::security::Security;
use crate::domain::market::snapshot::OrderSubmissionSnapshot;
use crate::domain::trading::types::Order;

#[derive(Debug, Clone, Copy)]
pub struct FeeContext<'a> {
    security: &'a Security,
    order: &'a Order,
    submission: Option<&'a OrderSubmissionSnapshot>,
}

impl<'a> FeeContext<'a> {
    /// Context without a submission snapshot
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the order is for a different symbol.
    pub fn new(security: &'a Security, order: &'a Order) -> Result<Self, FeeError> {
        Self::builder().security(security).order(order).build()
    }

    pub fn builder() -> FeeContextBuilder<'a> {
        FeeContextBuilder::default()
    }

    pub fn with_submission(mut self, submission: &'a OrderSubmissionSnapshot) -> Self {
        self.submission = Some(submission);
        self
    }

    pub fn security(&self) -> &'a Security {
        self.security
    }

    pub fn order(&self) -> &'a Order {
        self.order
    }

    pub fn submission(&self) -> Option<&'a OrderSubmissionSnapshot> {
        self.submission
    }

    /// Prevailing price on `side`: the submission snapshot when it has a usable
    /// value, otherwise the security's live quote.
    pub fn prevailing_price(&self, side: PriceSide) -> Result<Decimal, FeeError> {
        self.submission
            .and_then(|s| s.price(side))
            .or_else(|| self.security.price(side))
            .ok_or_else(|| FeeError::MissingPriceData {
                symbol: self.security.symbol.clone(),
                side,
            })
    }

    /// The order's limit price, required to be present and positive
    pub fn limit_price(&self) -> Result<Decimal, FeeError> {
        match self.order.limit_price {
            Some(price) if price > Decimal::ZERO => Ok(price),
            Some(price) => Err(FeeError::invalid_argument(format!(
                "{} order {} has non-positive limit price {}",
                self.order.order_type, self.order.id, price
            ))),
            None => Err(FeeError::invalid_argument(format!(
                "{} order {} has no limit price",
                self.order.order_type, self.order.id
            ))),
        }
    }
}

/// Assembles a [`FeeContext`], rejecting missing or mismatched inputs
#[derive(Debug, Default)]
pub struct FeeContextBuilder<'a> {
    security: Option<&'a Security>,
    order: Option<&'a Order>,
    submission: Option<&'a OrderSubmissionSnapshot>,
}

impl<'a> FeeContextBuilder<'a> {
    pub fn security(mut self, security: &'a Security) -> Self {
        self.security = Some(security);
        self
    }

    pub fn order(mut self, order: &'a Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn submission(mut self, submission: &'a OrderSubmissionSnapshot) -> Self {
        self.submission = Some(submission);
        self
    }

    pub fn build(self) -> Result<FeeContext<'a>, FeeError> {
        let security = self
            .security
            .ok_or_else(|| FeeError::invalid_argument("fee context requires a security"))?;
        let order = self
            .order
            .ok_or_else(|| FeeError::invalid_argument("fee context requires an order"))?;

        if order.symbol != security.symbol {
            return Err(FeeError::invalid_argument(format!(
                "order {} is for {} but security is {}",
                order.id, order.symbol, security.symbol
            )));
        }

        Ok(FeeContext {
            security,
            order,
            submission: self.submission,
        })
    }
}
