//! Maker/taker fee model for a spot exchange.
//!
//! An order is billed the maker rate when it rests on the book and the taker
//! rate when it executes immediately against resting liquidity. The fee is
//! `rate x reference price x |quantity|` in the security's quote currency.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use crate::domain::errors::{FeeError, PriceSide};
use crate::domain::trading::fee_context::FeeContext;
use crate::domain::trading::fee_model::{FeeModel, OrderFee, scaled_amount};
use crate::domain::trading::types::{OrderSide, OrderType};

/// Whether an order adds or removes liquidity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Liquidity {
    Maker,
    Taker,
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Liquidity::Maker => write!(f, "MAKER"),
            Liquidity::Taker => write!(f, "TAKER"),
        }
    }
}

/// How an order meets the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderClassification {
    /// Market order, crosses the book on arrival
    Market,
    /// Limit order the venue will never let take liquidity
    LimitPostOnly,
    /// Limit order priced through the opposite side of the book
    LimitCrossing,
    /// Limit order that rests behind the opposite side
    LimitResting,
}

impl OrderClassification {
    pub fn liquidity(self) -> Liquidity {
        match self {
            OrderClassification::Market | OrderClassification::LimitCrossing => Liquidity::Taker,
            OrderClassification::LimitPostOnly | OrderClassification::LimitResting => {
                Liquidity::Maker
            }
        }
    }
}

/// Classify the order in `context`.
///
/// A limit buy crosses when its price is at or above the prevailing ask; a
/// limit sell crosses when its price is at or below the prevailing bid.
pub fn classify(context: &FeeContext<'_>) -> Result<OrderClassification, FeeError> {
    let order = context.order();

    match order.order_type {
        OrderType::Market => Ok(OrderClassification::Market),
        OrderType::Limit if order.properties.post_only => Ok(OrderClassification::LimitPostOnly),
        OrderType::Limit => {
            let limit_price = context.limit_price()?;
            let side = order.side();
            let opposite = context.prevailing_price(PriceSide::opposite_of(side))?;

            let crosses = match side {
                OrderSide::Buy => limit_price >= opposite,
                OrderSide::Sell => limit_price <= opposite,
            };

            Ok(if crosses {
                OrderClassification::LimitCrossing
            } else {
                OrderClassification::LimitResting
            })
        }
        other => Err(FeeError::UnsupportedOrderKind {
            order_type: other,
            model: "ExchangeFeeModel".to_string(),
        }),
    }
}

/// Published maker/taker rate pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeeTier {
    #[default]
    Regular,
    Vip1,
    Vip2,
    Vip3,
}

impl FeeTier {
    pub fn maker_rate(self) -> Decimal {
        match self {
            FeeTier::Regular => dec!(0.001),
            FeeTier::Vip1 => dec!(0.0009),
            FeeTier::Vip2 => dec!(0.0008),
            FeeTier::Vip3 => dec!(0.00042),
        }
    }

    pub fn taker_rate(self) -> Decimal {
        match self {
            FeeTier::Regular | FeeTier::Vip1 | FeeTier::Vip2 => dec!(0.001),
            FeeTier::Vip3 => dec!(0.0006),
        }
    }
}

impl FromStr for FeeTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" | "vip0" => Ok(FeeTier::Regular),
            "vip1" => Ok(FeeTier::Vip1),
            "vip2" => Ok(FeeTier::Vip2),
            "vip3" => Ok(FeeTier::Vip3),
            _ => anyhow::bail!(
                "Invalid fee tier: {}. Must be 'regular', 'vip1', 'vip2' or 'vip3'",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeFeeModel {
    maker_rate: Decimal,
    taker_rate: Decimal,
}

impl Default for ExchangeFeeModel {
    fn default() -> Self {
        Self::for_tier(FeeTier::Regular)
    }
}

impl ExchangeFeeModel {
    /// Custom rate pair, e.g. a promotional tier.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if either rate is negative.
    pub fn new(maker_rate: Decimal, taker_rate: Decimal) -> Result<Self, FeeError> {
        if maker_rate < Decimal::ZERO {
            return Err(FeeError::InvalidConfiguration {
                field: "maker_rate".to_string(),
                value: maker_rate,
            });
        }
        if taker_rate < Decimal::ZERO {
            return Err(FeeError::InvalidConfiguration {
                field: "taker_rate".to_string(),
                value: taker_rate,
            });
        }

        Ok(Self {
            maker_rate,
            taker_rate,
        })
    }

    pub fn for_tier(tier: FeeTier) -> Self {
        Self {
            maker_rate: tier.maker_rate(),
            taker_rate: tier.taker_rate(),
        }
    }

    pub fn maker_rate(&self) -> Decimal {
        self.maker_rate
    }

    pub fn taker_rate(&self) -> Decimal {
        self.taker_rate
    }

    pub fn rate(&self, liquidity: Liquidity) -> Decimal {
        match liquidity {
            Liquidity::Maker => self.maker_rate,
            Liquidity::Taker => self.taker_rate,
        }
    }

    /// Price the rate is scaled by: the execution side for market orders,
    /// the limit price for limit orders whatever their classification.
    fn reference_price(
        &self,
        context: &FeeContext<'_>,
        classification: OrderClassification,
    ) -> Result<Decimal, FeeError> {
        match classification {
            OrderClassification::Market => {
                let side = PriceSide::opposite_of(context.order().side());
                context.prevailing_price(side)
            }
            OrderClassification::LimitPostOnly
            | OrderClassification::LimitCrossing
            | OrderClassification::LimitResting => context.limit_price(),
        }
    }
}

impl FeeModel for ExchangeFeeModel {
    fn order_fee(&self, context: &FeeContext<'_>) -> Result<OrderFee, FeeError> {
        let classification = classify(context)?;
        let liquidity = classification.liquidity();
        let rate = self.rate(liquidity);
        let reference_price = self.reference_price(context, classification)?;
        let amount = scaled_amount(rate, reference_price, context.order().abs_quantity())?;

        trace!(
            order_id = %context.order().id,
            symbol = %context.security().symbol,
            ?classification,
            %liquidity,
            %rate,
            %reference_price,
            %amount,
            "ExchangeFeeModel: priced order"
        );

        Ok(OrderFee::new(amount, context.security().quote_currency.clone()))
    }

    fn description(&self) -> String {
        format!(
            "Exchange Fee Model (Maker: {:.4}%, Taker: {:.4}%)",
            self.maker_rate * Decimal::ONE_HUNDRED,
            self.taker_rate * Decimal::ONE_HUNDRED
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::security::Security;
    use crate::domain::market::snapshot::OrderSubmissionSnapshot;
    use crate::domain::trading::types::Order;

    fn btc() -> Security {
        Security::new("BTCUSDT", "BTC", "USDT").with_quote(dec!(100), dec!(1000))
    }

    fn classify_order(security: &Security, order: &Order) -> OrderClassification {
        classify(&FeeContext::new(security, order).unwrap()).unwrap()
    }

    #[test]
    fn test_default_is_regular_tier() {
        let model = ExchangeFeeModel::default();
        assert_eq!(model.maker_rate(), dec!(0.001));
        assert_eq!(model.taker_rate(), dec!(0.001));
    }

    #[test]
    fn test_negative_rates_rejected() {
        assert_eq!(
            ExchangeFeeModel::new(dec!(-0.0001), dec!(0.001)),
            Err(FeeError::InvalidConfiguration {
                field: "maker_rate".to_string(),
                value: dec!(-0.0001),
            })
        );
        assert!(matches!(
            ExchangeFeeModel::new(dec!(0.001), dec!(-0.001)),
            Err(FeeError::InvalidConfiguration { ref field, .. }) if field == "taker_rate"
        ));
        assert!(ExchangeFeeModel::new(Decimal::ZERO, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_market_is_taker_even_when_post_only() {
        let security = btc();
        let order = Order::market("BTCUSDT", dec!(1)).with_post_only(true);
        let classification = classify_order(&security, &order);

        assert_eq!(classification, OrderClassification::Market);
        assert_eq!(classification.liquidity(), Liquidity::Taker);
    }

    #[test]
    fn test_post_only_limit_is_maker_even_when_crossing() {
        let security = btc();
        let order = Order::limit("BTCUSDT", dec!(1), dec!(5000)).with_post_only(true);
        assert_eq!(
            classify_order(&security, &order),
            OrderClassification::LimitPostOnly
        );
    }

    #[test]
    fn test_limit_buy_against_ask() {
        let security = btc();
        let below = Order::limit("BTCUSDT", dec!(1), dec!(999.99));
        let at = Order::limit("BTCUSDT", dec!(1), dec!(1000));
        let above = Order::limit("BTCUSDT", dec!(1), dec!(1001));

        assert_eq!(classify_order(&security, &below), OrderClassification::LimitResting);
        assert_eq!(classify_order(&security, &at), OrderClassification::LimitCrossing);
        assert_eq!(classify_order(&security, &above), OrderClassification::LimitCrossing);
    }

    #[test]
    fn test_limit_sell_against_bid() {
        let security = btc();
        let above = Order::limit("BTCUSDT", dec!(-1), dec!(100.01));
        let at = Order::limit("BTCUSDT", dec!(-1), dec!(100));
        let below = Order::limit("BTCUSDT", dec!(-1), dec!(50));

        assert_eq!(classify_order(&security, &above), OrderClassification::LimitResting);
        assert_eq!(classify_order(&security, &at), OrderClassification::LimitCrossing);
        assert_eq!(classify_order(&security, &below), OrderClassification::LimitCrossing);
    }

    #[test]
    fn test_classification_uses_snapshot_over_live_quote() {
        let security = btc();
        let order = Order::limit("BTCUSDT", dec!(1), dec!(950));
        let snapshot = OrderSubmissionSnapshot::new(dec!(90), dec!(900)).unwrap();
        let ctx = FeeContext::new(&security, &order)
            .unwrap()
            .with_submission(&snapshot);

        // Rests against the live ask of 1000 but crosses the submitted ask of 900
        assert_eq!(classify(&ctx).unwrap(), OrderClassification::LimitCrossing);
    }

    #[test]
    fn test_limit_sell_classified_against_snapshot_bid() {
        let security = btc();
        let order = Order::limit("BTCUSDT", dec!(-1), dec!(150));
        let snapshot = OrderSubmissionSnapshot::new(dec!(200), dec!(900)).unwrap();
        let ctx = FeeContext::new(&security, &order)
            .unwrap()
            .with_submission(&snapshot);

        // Rests above the live bid of 100 but crosses the submitted bid of 200
        assert_eq!(classify(&ctx).unwrap(), OrderClassification::LimitCrossing);
        assert_eq!(
            classify(&FeeContext::new(&security, &order).unwrap()).unwrap(),
            OrderClassification::LimitResting
        );
    }

    #[test]
    fn test_post_only_limit_price_still_validated() {
        let security = btc();
        let model = ExchangeFeeModel::default();

        let mut order = Order::limit("BTCUSDT", dec!(1), dec!(100)).with_post_only(true);
        order.limit_price = None;
        let ctx = FeeContext::new(&security, &order).unwrap();
        assert!(matches!(model.order_fee(&ctx), Err(FeeError::InvalidArgument { .. })));

        order.limit_price = Some(Decimal::ZERO);
        let ctx = FeeContext::new(&security, &order).unwrap();
        assert!(matches!(model.order_fee(&ctx), Err(FeeError::InvalidArgument { .. })));
    }

    #[test]
    fn test_notional_overflow_is_an_error() {
        let security = Security::new("BTCUSDT", "BTC", "USDT").with_quote(dec!(100), Decimal::MAX);
        let model = ExchangeFeeModel::new(Decimal::ONE, Decimal::ONE).unwrap();
        let order = Order::market("BTCUSDT", dec!(10));
        let ctx = FeeContext::new(&security, &order).unwrap();

        assert!(matches!(
            model.order_fee(&ctx),
            Err(FeeError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_stop_orders_unsupported() {
        let security = btc();
        let model = ExchangeFeeModel::default();

        for order in [
            Order::stop_market("BTCUSDT", dec!(1)),
            Order::stop_limit("BTCUSDT", dec!(1), dec!(900)),
        ] {
            let ctx = FeeContext::new(&security, &order).unwrap();
            assert!(matches!(
                model.order_fee(&ctx),
                Err(FeeError::UnsupportedOrderKind { .. })
            ));
        }
    }

    #[test]
    fn test_market_fee_uses_execution_side() {
        let security = btc();
        let model = ExchangeFeeModel::new(dec!(0.0006), dec!(0.0008)).unwrap();

        let buy = Order::market("BTCUSDT", dec!(2));
        let sell = Order::market("BTCUSDT", dec!(-2));

        let buy_fee = model.order_fee(&FeeContext::new(&security, &buy).unwrap()).unwrap();
        let sell_fee = model.order_fee(&FeeContext::new(&security, &sell).unwrap()).unwrap();

        assert_eq!(buy_fee, OrderFee::new(dec!(1.6), "USDT"));
        assert_eq!(sell_fee, OrderFee::new(dec!(0.16), "USDT"));
    }

    #[test]
    fn test_limit_fee_uses_limit_price() {
        let security = btc();
        let model = ExchangeFeeModel::new(dec!(0.0006), dec!(0.0008)).unwrap();

        // Crossing: taker rate on the limit price, not the ask
        let crossing = Order::limit("BTCUSDT", dec!(3), dec!(1200));
        let fee = model
            .order_fee(&FeeContext::new(&security, &crossing).unwrap())
            .unwrap();
        assert_eq!(fee.amount, dec!(0.0008) * dec!(1200) * dec!(3));

        let resting = Order::limit("BTCUSDT", dec!(3), dec!(500));
        let fee = model
            .order_fee(&FeeContext::new(&security, &resting).unwrap())
            .unwrap();
        assert_eq!(fee.amount, dec!(0.0006) * dec!(500) * dec!(3));
    }

    #[test]
    fn test_market_order_without_quote_fails() {
        let security = Security::new("BTCUSDT", "BTC", "USDT");
        let order = Order::market("BTCUSDT", dec!(-1));
        let ctx = FeeContext::new(&security, &order).unwrap();

        assert_eq!(
            ExchangeFeeModel::default().order_fee(&ctx),
            Err(FeeError::MissingPriceData {
                symbol: "BTCUSDT".to_string(),
                side: PriceSide::Bid,
            })
        );
    }

    #[test]
    fn test_post_only_limit_needs_no_quote() {
        let security = Security::new("BTCUSDT", "BTC", "USDT");
        let order = Order::limit("BTCUSDT", dec!(1), dec!(100)).with_post_only(true);
        let ctx = FeeContext::new(&security, &order).unwrap();

        let fee = ExchangeFeeModel::default().order_fee(&ctx).unwrap();
        assert_eq!(fee.amount, dec!(0.1));
    }

    #[test]
    fn test_tiers() {
        let vip3 = ExchangeFeeModel::for_tier(FeeTier::Vip3);
        assert_eq!(vip3.rate(Liquidity::Maker), dec!(0.00042));
        assert_eq!(vip3.rate(Liquidity::Taker), dec!(0.0006));

        assert_eq!("VIP2".parse::<FeeTier>().unwrap(), FeeTier::Vip2);
        assert_eq!("vip0".parse::<FeeTier>().unwrap(), FeeTier::Regular);
        assert!("platinum".parse::<FeeTier>().is_err());
    }

    #[test]
    fn test_description() {
        let description = ExchangeFeeModel::default().description();
        assert!(description.contains("Maker: 0.1000%"));
        assert!(description.contains("Taker: 0.1000%"));
    }
}
