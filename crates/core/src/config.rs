//! Environment-driven configuration shared by the binaries.
//!
//! Economic defaults for cost estimation live here, not in
//! [`crate::estimation`]. Every loader has a `from_lookup` form taking a key
//! lookup closure so it can be tested without touching process environment.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::estimation::{CostModel, GasUnits, OperationKind};

/// Default gas price in base units (1 gwei expressed in ETH).
pub const DEFAULT_GAS_PRICE: &str = "0.000000001";
/// Default base-unit to display-currency rate (USD per ETH).
pub const DEFAULT_DISPLAY_RATE: &str = "2000";
pub const DEFAULT_SINGLE_MINT_GAS: GasUnits = 21_000;
/// `size:gas` pairs of per-item gas for batch mints.
pub const DEFAULT_BATCH_MINT_GAS: &str = "5:18000,10:17500";
pub const DEFAULT_DEPLOYMENT_GAS: GasUnits = 2_500_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Parse `key` from `lookup`, falling back to `default` when unset.
pub fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Process-environment lookup for use with the `from_lookup` constructors.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Gas table and prices used to build a [`CostModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub gas_price: Decimal,
    pub display_rate: Decimal,
    pub single_mint_gas: GasUnits,
    /// `(batch_size, per_item_gas)` pairs.
    pub batch_mint_gas: Vec<(u64, GasUnits)>,
    pub deployment_gas: GasUnits,
}

impl PricingConfig {
    /// Load pricing from environment variables with defaults.
    ///
    /// | Env Var            | Default              |
    /// |--------------------|----------------------|
    /// | `GAS_PRICE`        | `0.000000001`        |
    /// | `DISPLAY_RATE`     | `2000`               |
    /// | `SINGLE_MINT_GAS`  | `21000`              |
    /// | `BATCH_MINT_GAS`   | `5:18000,10:17500`   |
    /// | `DEPLOYMENT_GAS`   | `2500000`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gas_price = parse_decimal(&lookup, "GAS_PRICE", DEFAULT_GAS_PRICE)?;
        let display_rate = parse_decimal(&lookup, "DISPLAY_RATE", DEFAULT_DISPLAY_RATE)?;
        let single_mint_gas = parse_or(&lookup, "SINGLE_MINT_GAS", DEFAULT_SINGLE_MINT_GAS)?;
        let deployment_gas = parse_or(&lookup, "DEPLOYMENT_GAS", DEFAULT_DEPLOYMENT_GAS)?;

        let batch_raw = lookup("BATCH_MINT_GAS").unwrap_or_else(|| DEFAULT_BATCH_MINT_GAS.into());
        let batch_mint_gas = parse_batch_table(&batch_raw).map_err(|reason| ConfigError::Invalid {
            key: "BATCH_MINT_GAS",
            value: batch_raw.clone(),
            reason,
        })?;

        Ok(Self {
            gas_price,
            display_rate,
            single_mint_gas,
            batch_mint_gas,
            deployment_gas,
        })
    }

    pub fn cost_model(&self) -> CostModel {
        let model = CostModel::new(self.display_rate)
            .with_operation(OperationKind::SingleMint, self.single_mint_gas)
            .with_operation(OperationKind::ContractDeployment, self.deployment_gas);

        self.batch_mint_gas
            .iter()
            .fold(model, |model, &(size, gas)| {
                model.with_operation(OperationKind::BatchMintPerItem(size), gas)
            })
    }
}

fn parse_decimal<F>(lookup: &F, key: &'static str, default: &str) -> Result<Decimal, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    let value = Decimal::from_str(raw.trim()).map_err(|e| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "must not be negative".into(),
        });
    }
    Ok(value)
}

/// Parse a `size:gas,size:gas` table. Sizes must be at least 1 and unique.
pub fn parse_batch_table(raw: &str) -> Result<Vec<(u64, GasUnits)>, String> {
    let mut table: Vec<(u64, GasUnits)> = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (size, gas) = entry
            .split_once(':')
            .ok_or_else(|| format!("entry '{entry}' is not of the form size:gas"))?;
        let size: u64 = size
            .trim()
            .parse()
            .map_err(|e| format!("bad batch size in '{entry}': {e}"))?;
        let gas: GasUnits = gas
            .trim()
            .parse()
            .map_err(|e| format!("bad gas figure in '{entry}': {e}"))?;

        if size == 0 {
            return Err(format!("batch size in '{entry}' must be at least 1"));
        }
        if table.iter().any(|(s, _)| *s == size) {
            return Err(format!("batch size {size} listed twice"));
        }
        table.push((size, gas));
    }

    table.sort_unstable_by_key(|(size, _)| *size);
    Ok(table)
}
