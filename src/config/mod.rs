//! Configuration module for venue fees.
//!
//! Fee schedules are loaded from environment variables and turned into a
//! shareable [`FeeModel`](crate::domain::trading::fee_model::FeeModel).

mod fee_env_config;

pub use fee_env_config::FeeEnvConfig;

use std::str::FromStr;

/// Which fee model prices orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeModelKind {
    Exchange,
    Flat,
    Constant,
    Zero,
}

impl FromStr for FeeModelKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exchange" => Ok(FeeModelKind::Exchange),
            "flat" => Ok(FeeModelKind::Flat),
            "constant" => Ok(FeeModelKind::Constant),
            "zero" => Ok(FeeModelKind::Zero),
            _ => anyhow::bail!(
                "Invalid FEE_MODEL: {}. Must be 'exchange', 'flat', 'constant' or 'zero'",
                s
            ),
        }
    }
}
