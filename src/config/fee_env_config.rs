//! Fee model configuration parsing from environment variables.
//!
//! This module handles loading the venue fee schedule: which model prices
//! orders, its tier, and any custom rates.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use super::FeeModelKind;
use crate::domain::trading::exchange_fee_model::{ExchangeFeeModel, FeeTier};
use crate::domain::trading::fee_model::FeeModel;
use crate::domain::trading::fees::{ConstantFeeModel, FlatRateFeeModel, ZeroFeeModel};

/// Fee environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FeeEnvConfig {
    pub model: FeeModelKind,
    pub tier: FeeTier,
    /// Overrides the tier when both maker and taker are set
    pub maker_rate: Option<Decimal>,
    pub taker_rate: Option<Decimal>,
    pub flat_rate: Decimal,
    pub commission_per_unit: Decimal,
    pub minimum_commission: Decimal,
}

impl Default for FeeEnvConfig {
    fn default() -> Self {
        Self {
            model: FeeModelKind::Exchange,
            tier: FeeTier::Regular,
            maker_rate: None,
            taker_rate: None,
            flat_rate: Decimal::new(1, 3), // 0.001
            commission_per_unit: Decimal::ZERO,
            minimum_commission: Decimal::ZERO,
        }
    }
}

impl FeeEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Same as [`FeeEnvConfig::from_env`] with an injectable variable lookup
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let model = match lookup("FEE_MODEL") {
            Some(raw) => FeeModelKind::from_str(&raw)?,
            None => defaults.model,
        };
        let tier = match lookup("FEE_TIER") {
            Some(raw) => FeeTier::from_str(&raw)?,
            None => defaults.tier,
        };

        Ok(Self {
            model,
            tier,
            maker_rate: Self::parse_decimal(&lookup, "FEE_MAKER_RATE")?,
            taker_rate: Self::parse_decimal(&lookup, "FEE_TAKER_RATE")?,
            flat_rate: Self::parse_decimal(&lookup, "FEE_FLAT_RATE")?
                .unwrap_or(defaults.flat_rate),
            commission_per_unit: Self::parse_decimal(&lookup, "FEE_COMMISSION_PER_UNIT")?
                .unwrap_or(defaults.commission_per_unit),
            minimum_commission: Self::parse_decimal(&lookup, "FEE_MINIMUM_COMMISSION")?
                .unwrap_or(defaults.minimum_commission),
        })
    }

    fn parse_decimal<F>(lookup: &F, key: &str) -> Result<Option<Decimal>>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(key)
            .map(|raw| {
                Decimal::from_str(raw.trim()).with_context(|| format!("Failed to parse {}", key))
            })
            .transpose()
    }

    /// Build the configured model, shareable across threads
    pub fn create_fee_model(&self) -> Result<Arc<dyn FeeModel>> {
        let model: Arc<dyn FeeModel> = match self.model {
            FeeModelKind::Exchange => match (self.maker_rate, self.taker_rate) {
                (Some(maker), Some(taker)) => Arc::new(
                    ExchangeFeeModel::new(maker, taker)
                        .context("Invalid exchange fee rates")?,
                ),
                (None, None) => Arc::new(ExchangeFeeModel::for_tier(self.tier)),
                _ => anyhow::bail!(
                    "FEE_MAKER_RATE and FEE_TAKER_RATE must be set together"
                ),
            },
            FeeModelKind::Flat => Arc::new(
                FlatRateFeeModel::new(self.flat_rate).context("Invalid flat fee rate")?,
            ),
            FeeModelKind::Constant => Arc::new(
                ConstantFeeModel::new(self.commission_per_unit, self.minimum_commission)
                    .context("Invalid constant fee commission")?,
            ),
            FeeModelKind::Zero => Arc::new(ZeroFeeModel),
        };

        debug!("Fee model configured: {}", model.description());
        Ok(model)
    }
}
