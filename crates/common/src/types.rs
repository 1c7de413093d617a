use alloy::primitives::{Address, U256, address};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Three-state health classification of a collateralized debt position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// At or above the minimum collateral ratio.
    Healthy,
    /// Between the liquidation threshold and the minimum ratio.
    Warning,
    /// Below the liquidation threshold.
    AtRisk,
}

impl HealthState {
    /// Label shown next to the ratio gauge.
    pub fn label(&self) -> &'static str {
        match self {
            HealthState::Healthy => "Healthy",
            HealthState::Warning => "Warning",
            HealthState::AtRisk => "Liquidation Risk",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Healthy => write!(f, "healthy"),
            HealthState::Warning => write!(f, "warning"),
            HealthState::AtRisk => write!(f, "at_risk"),
        }
    }
}

/// A user's position exactly as the vault's `getPosition` reports it.
///
/// Amounts are 18-decimal fixed point; `ratio_bps` is the contract's ratio
/// in percent × 100 (15000 = 150.00%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub collateral: U256,
    pub debt: U256,
    pub ratio_bps: U256,
    pub is_healthy: bool,
}

/// Protocol risk thresholds, in percent.
///
/// These mirror the vault contract's configuration. The contract enforces
/// them; a stale copy here only affects what the UI displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Minimum ratio required to mint (default 150%)
    #[serde(with = "rust_decimal::serde::str")]
    pub min_ratio: Decimal,
    /// Ratio below which the position can be liquidated (default 130%)
    #[serde(with = "rust_decimal::serde::str")]
    pub liquidation_ratio: Decimal,
}

/// Largest accepted threshold, in percent (10 000x overcollateralized).
pub const MAX_RATIO_PERCENT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Rejected threshold configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("liquidation ratio must be positive, got {0}")]
    NonPositive(Decimal),

    #[error("liquidation ratio {liquidation} exceeds minimum ratio {min}")]
    Inverted { min: Decimal, liquidation: Decimal },

    #[error("minimum ratio {0} exceeds the 1000000% ceiling")]
    TooLarge(Decimal),
}

impl RiskThresholds {
    pub fn new(min_ratio: Decimal, liquidation_ratio: Decimal) -> Result<Self, ThresholdError> {
        let thresholds = Self {
            min_ratio,
            liquidation_ratio,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Require `0 < liquidation_ratio <= min_ratio <= MAX_RATIO_PERCENT`.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.liquidation_ratio <= Decimal::ZERO {
            return Err(ThresholdError::NonPositive(self.liquidation_ratio));
        }
        if self.liquidation_ratio > self.min_ratio {
            return Err(ThresholdError::Inverted {
                min: self.min_ratio,
                liquidation: self.liquidation_ratio,
            });
        }
        if self.min_ratio > MAX_RATIO_PERCENT {
            return Err(ThresholdError::TooLarge(self.min_ratio));
        }
        Ok(())
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            min_ratio: Decimal::from(150),
            liquidation_ratio: Decimal::from(130),
        }
    }
}

/// Deployed contract addresses (Sepolia by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    /// OIL collateral token
    pub oil_collateral: Address,
    /// sUSD stablecoin
    pub stratum_stable: Address,
    /// CDP vault
    pub stratum_vault: Address,
    /// Oracle price feed (mock on testnet)
    pub price_feed: Address,
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            oil_collateral: address!("0x113a6d4d1bec8f2632a2cab7a469851fc8b5ecc3"),
            stratum_stable: address!("0x5c59f6941f418e55d35008334270cc8de57f4d8d"),
            stratum_vault: address!("0x5ec12c85837439d409a550d4e7c22d950ee2148e"),
            price_feed: address!("0x383f83abb034edc76b778e05f0e20d4e0e107caa"),
        }
    }
}
