//! Collateral Ratio calculator.
//!
//! CR = collateral * unit_price / debt, expressed in percent.
//!
//! All inputs are wads (see [`crate::amount`]). The ratio is computed in
//! integer arithmetic as basis points of a percent, the same unit the vault's
//! `getPosition` returns, rounding half-up to the nearest 0.01%. It is then
//! exposed as a `Decimal` percent with two fractional digits.

use std::cmp::Ordering;

use alloy::primitives::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use stratum_common::types::{HealthState, RiskThresholds};

use crate::amount::{WAD, parse_amount};
use crate::error::RatioError;

/// Basis points per 100% (ratio 1.0 == 10_000).
pub const BPS_PER_UNIT: u64 = 10_000;

/// Result of a ratio computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum CollateralRatio {
    /// Debt is zero: no liquidation risk, ratio undefined.
    NoDebt,
    /// Ratio in percent, two fractional digits (187.50 = 187.5%).
    Finite(#[serde(with = "rust_decimal::serde::str")] Decimal),
}

impl CollateralRatio {
    /// Percent value, `None` when there is no debt.
    pub fn percent(&self) -> Option<Decimal> {
        match self {
            CollateralRatio::NoDebt => None,
            CollateralRatio::Finite(p) => Some(*p),
        }
    }

    pub fn is_no_debt(&self) -> bool {
        matches!(self, CollateralRatio::NoDebt)
    }

    /// Build from basis points of a percent (15000 → 150.00%).
    ///
    /// Ratios beyond what `Decimal` can hold saturate at `Decimal::MAX`.
    pub fn from_bps(bps: U256) -> Self {
        let percent = u128::try_from(bps)
            .ok()
            .and_then(|v| i128::try_from(v).ok())
            .and_then(|v| Decimal::try_from_i128_with_scale(v, 2).ok())
            .unwrap_or(Decimal::MAX);
        CollateralRatio::Finite(percent)
    }
}

impl PartialOrd for CollateralRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `NoDebt` orders above every finite ratio.
impl Ord for CollateralRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CollateralRatio::NoDebt, CollateralRatio::NoDebt) => Ordering::Equal,
            (CollateralRatio::NoDebt, CollateralRatio::Finite(_)) => Ordering::Greater,
            (CollateralRatio::Finite(_), CollateralRatio::NoDebt) => Ordering::Less,
            (CollateralRatio::Finite(a), CollateralRatio::Finite(b)) => a.cmp(b),
        }
    }
}

/// Computes and classifies collateralization ratios against injected
/// protocol thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioModel {
    thresholds: RiskThresholds,
}

impl RatioModel {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Ratio of `collateral` valued at `unit_price` against `debt`.
    ///
    /// All three are wads. A zero `unit_price` is rejected; a zero `debt`
    /// yields [`CollateralRatio::NoDebt`].
    pub fn compute_ratio(
        collateral: U256,
        unit_price: U256,
        debt: U256,
    ) -> Result<CollateralRatio, RatioError> {
        Ok(match Self::ratio_bps(collateral, unit_price, debt)? {
            Some(bps) => CollateralRatio::from_bps(bps),
            None => CollateralRatio::NoDebt,
        })
    }

    /// Ratio in basis points of a percent, `None` when `debt` is zero.
    ///
    /// `bps = round_half_up(collateral * price * 10_000 / (debt * 1e18))`
    pub fn ratio_bps(
        collateral: U256,
        unit_price: U256,
        debt: U256,
    ) -> Result<Option<U256>, RatioError> {
        if unit_price.is_zero() {
            return Err(RatioError::InvalidInput(
                "unit price must be positive".to_string(),
            ));
        }
        if debt.is_zero() {
            return Ok(None);
        }

        let numerator = collateral
            .checked_mul(unit_price)
            .and_then(|v| v.checked_mul(U256::from(BPS_PER_UNIT)))
            .ok_or_else(too_large)?;
        let denominator = debt.checked_mul(WAD).ok_or_else(too_large)?;

        let rounded = numerator
            .checked_add(denominator / U256::from(2u8))
            .ok_or_else(too_large)?
            / denominator;

        Ok(Some(rounded))
    }

    /// Preview a prospective ratio from user-entered decimal strings.
    ///
    /// Inputs are validated before any arithmetic so malformed values never
    /// reach the display.
    pub fn preview(
        collateral: &str,
        unit_price: &str,
        debt: &str,
    ) -> Result<CollateralRatio, RatioError> {
        let collateral = parse_amount(collateral)?;
        let unit_price = parse_amount(unit_price)?;
        let debt = parse_amount(debt)?;
        Self::compute_ratio(collateral, unit_price, debt)
    }

    /// Re-render the ratio the vault already computed.
    ///
    /// The contract reports a ratio even for debt-free positions; those are
    /// shown as `NoDebt` regardless of the raw value.
    pub fn from_contract_ratio(raw_bps: U256, debt: U256) -> CollateralRatio {
        if debt.is_zero() {
            CollateralRatio::NoDebt
        } else {
            CollateralRatio::from_bps(raw_bps)
        }
    }

    /// Classify a ratio; `NoDebt` is always healthy.
    pub fn classify(&self, ratio: &CollateralRatio) -> HealthState {
        match ratio {
            CollateralRatio::NoDebt => HealthState::Healthy,
            CollateralRatio::Finite(percent) => self.classify_percent(*percent),
        }
    }

    /// `Healthy` at or above the minimum ratio, `Warning` from the
    /// liquidation threshold (inclusive) up to it, `AtRisk` below.
    pub fn classify_percent(&self, ratio_percent: Decimal) -> HealthState {
        if ratio_percent >= self.thresholds.min_ratio {
            HealthState::Healthy
        } else if ratio_percent >= self.thresholds.liquidation_ratio {
            HealthState::Warning
        } else {
            HealthState::AtRisk
        }
    }

    /// Minimum ratio in basis points of a percent.
    pub fn min_ratio_bps(&self) -> U256 {
        percent_to_bps(self.thresholds.min_ratio)
    }

    /// Liquidation ratio in basis points of a percent.
    pub fn liquidation_ratio_bps(&self) -> U256 {
        percent_to_bps(self.thresholds.liquidation_ratio)
    }
}

/// Thresholds that cannot be represented saturate upward, so an unvalidated
/// oversized threshold classifies more strictly, never less.
fn percent_to_bps(percent: Decimal) -> U256 {
    percent
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|bps| bps.round().to_u128())
        .map(U256::from)
        .unwrap_or(U256::MAX)
}

fn too_large() -> RatioError {
    RatioError::InvalidInput("amount too large".to_string())
}
