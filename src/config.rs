//! Engine constants, explicitly passed rather than ambient.
//!
//! Every component that needs a constant takes the config as a value; there
//! is no global deployment state.

use crate::domain::ScaledAmount;
use std::collections::HashMap;
use thiserror::Error;

/// Numeric constants of the valuation engine plus the transaction-layer
/// defaults consumed by external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Decimal exponent of every USD-denominated value.
    pub usd_decimals: u32,
    /// Basis-points divisor used for leverage and percentage figures.
    pub bps_divisor: u64,
    /// Minimum collateral floor, in whole USD.
    pub min_collateral_usd_units: i128,
    /// Default execution fee, lamports. Not used by the valuation core.
    pub execution_fee_lamports: u64,
    /// Rent-exempt minimum for token accounts, lamports. Not used by the
    /// valuation core.
    pub rent_exempt_lamports: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            usd_decimals: 20,
            bps_divisor: 10_000,
            min_collateral_usd_units: 1,
            execution_fee_lamports: 300_000,
            rent_exempt_lamports: 2_039_280,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = EngineConfig::default();

        let usd_decimals = parse_or(&env_map, "USD_DECIMALS", defaults.usd_decimals)?;
        let bps_divisor = parse_or(&env_map, "BPS_DIVISOR", defaults.bps_divisor)?;
        let min_collateral_usd_units = parse_or(
            &env_map,
            "MIN_COLLATERAL_USD",
            defaults.min_collateral_usd_units,
        )?;
        let execution_fee_lamports = parse_or(
            &env_map,
            "EXECUTION_FEE_LAMPORTS",
            defaults.execution_fee_lamports,
        )?;
        let rent_exempt_lamports = parse_or(
            &env_map,
            "RENT_EXEMPT_LAMPORTS",
            defaults.rent_exempt_lamports,
        )?;

        if bps_divisor == 0 {
            return Err(ConfigError::InvalidValue(
                "BPS_DIVISOR".to_string(),
                "must be nonzero".to_string(),
            ));
        }

        Ok(EngineConfig {
            usd_decimals,
            bps_divisor,
            min_collateral_usd_units,
            execution_fee_lamports,
            rent_exempt_lamports,
        })
    }

    /// The minimum collateral floor at the USD exponent.
    pub fn min_collateral_usd(&self) -> ScaledAmount {
        ScaledAmount::expand(self.min_collateral_usd_units, self.usd_decimals)
    }
}

fn parse_or<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|_| {
            ConfigError::InvalidValue(key.to_string(), format!("could not parse {:?}", raw))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let cfg = EngineConfig::from_env_map(HashMap::new()).unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.usd_decimals, 20);
        assert_eq!(cfg.bps_divisor, 10_000);
    }

    #[test]
    fn test_overrides_from_env() {
        let mut map = HashMap::new();
        map.insert("USD_DECIMALS".to_string(), "30".to_string());
        map.insert("MIN_COLLATERAL_USD".to_string(), "10".to_string());
        let cfg = EngineConfig::from_env_map(map).unwrap();
        assert_eq!(cfg.usd_decimals, 30);
        assert_eq!(cfg.min_collateral_usd_units, 10);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let mut map = HashMap::new();
        map.insert("BPS_DIVISOR".to_string(), "not_a_number".to_string());
        match EngineConfig::from_env_map(map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BPS_DIVISOR"),
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_bps_divisor_is_rejected() {
        let mut map = HashMap::new();
        map.insert("BPS_DIVISOR".to_string(), "0".to_string());
        assert!(EngineConfig::from_env_map(map).is_err());
    }

    #[test]
    fn test_min_collateral_usd_scaling() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.min_collateral_usd(), ScaledAmount::expand(1, 20));
    }
}
