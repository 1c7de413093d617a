//! Position projections and display values.
//!
//! Everything here previews what the vault would do; the vault itself stays
//! authoritative for minting limits and liquidation.

use alloy::primitives::U256;
use rust_decimal::Decimal;
use serde::Serialize;

use stratum_common::types::{HealthState, Position};

use crate::amount::{WAD, format_amount};
use crate::cr_calculator::{BPS_PER_UNIT, CollateralRatio, RatioModel};
use crate::error::RatioError;

/// Ratio at which the gauge is drawn full, in percent.
const GAUGE_FULL_PERCENT: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// A vault call the user is about to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionAction {
    /// `depositAndMint(collateralAmount, mintAmount)`
    DepositAndMint { collateral: U256, mint: U256 },
    /// `burnAndWithdraw(burnAmount, withdrawAmount)`
    BurnAndWithdraw { burn: U256, withdraw: U256 },
}

/// Display bundle for a current or prospective position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionView {
    /// Collateral in whole OIL
    pub collateral: String,
    /// Debt in whole sUSD
    pub debt: String,
    pub ratio: CollateralRatio,
    pub health: HealthState,
    pub health_label: &'static str,
    /// Whether a transaction leading to this position should be enabled
    pub can_submit: bool,
    /// OIL price at which the position reaches the liquidation threshold
    pub liquidation_price: Option<String>,
    /// Fill fraction of the ratio gauge, 0..=1
    #[serde(with = "rust_decimal::serde::str")]
    pub gauge_fill: Decimal,
}

impl PositionView {
    /// Render a position read from the vault, using the ratio it reported.
    pub fn from_contract(position: &Position, model: &RatioModel) -> Result<Self, RatioError> {
        let ratio = RatioModel::from_contract_ratio(position.ratio_bps, position.debt);
        let view = Self::build(position.collateral, position.debt, ratio, model)?;

        // The vault's own flag is authoritative; a disagreement means our
        // thresholds drifted from the contract configuration.
        if position.is_healthy == (view.health == HealthState::AtRisk) {
            tracing::warn!(
                contract_healthy = position.is_healthy,
                health = %view.health,
                ratio_bps = %position.ratio_bps,
                "Local health classification disagrees with vault"
            );
        }

        Ok(view)
    }

    /// Render a position valued locally at `unit_price`.
    pub fn at_price(
        collateral: U256,
        debt: U256,
        unit_price: U256,
        model: &RatioModel,
    ) -> Result<Self, RatioError> {
        let ratio = RatioModel::compute_ratio(collateral, unit_price, debt)?;
        Self::build(collateral, debt, ratio, model)
    }

    fn build(
        collateral: U256,
        debt: U256,
        ratio: CollateralRatio,
        model: &RatioModel,
    ) -> Result<Self, RatioError> {
        let health = model.classify(&ratio);
        // No price rescues debt backed by nothing; the ratio already says AtRisk.
        let liquidation_price = if collateral.is_zero() {
            None
        } else {
            liquidation_price(collateral, debt, model)?
        };

        Ok(Self {
            collateral: format_amount(collateral),
            debt: format_amount(debt),
            ratio,
            health,
            health_label: health.label(),
            can_submit: can_submit(&ratio, model),
            liquidation_price: liquidation_price.map(format_amount),
            gauge_fill: gauge_fill(&ratio),
        })
    }
}

/// Apply a vault action to a position's collateral and debt.
///
/// Returns the resulting `(collateral, debt)`.
pub fn project(
    collateral: U256,
    debt: U256,
    action: PositionAction,
) -> Result<(U256, U256), RatioError> {
    match action {
        PositionAction::DepositAndMint {
            collateral: added,
            mint,
        } => {
            let collateral = collateral.checked_add(added).ok_or_else(|| {
                RatioError::InvalidInput("collateral amount too large".to_string())
            })?;
            let debt = debt
                .checked_add(mint)
                .ok_or_else(|| RatioError::InvalidInput("mint amount too large".to_string()))?;
            Ok((collateral, debt))
        }
        PositionAction::BurnAndWithdraw { burn, withdraw } => {
            let debt = debt.checked_sub(burn).ok_or_else(|| {
                RatioError::InvalidInput(format!(
                    "cannot burn {} sUSD, debt is {}",
                    format_amount(burn),
                    format_amount(debt)
                ))
            })?;
            let collateral = collateral.checked_sub(withdraw).ok_or_else(|| {
                RatioError::InvalidInput(format!(
                    "cannot withdraw {} OIL, collateral is {}",
                    format_amount(withdraw),
                    format_amount(collateral)
                ))
            })?;
            Ok((collateral, debt))
        }
    }
}

/// Largest total debt that keeps `collateral` at or above the minimum ratio,
/// rounded down.
pub fn max_mintable(
    collateral: U256,
    unit_price: U256,
    model: &RatioModel,
) -> Result<U256, RatioError> {
    let min_bps = model.min_ratio_bps();
    if min_bps.is_zero() {
        return Err(RatioError::InvalidInput(
            "minimum ratio rounds to zero".to_string(),
        ));
    }
    let numerator = collateral
        .checked_mul(unit_price)
        .and_then(|v| v.checked_mul(U256::from(BPS_PER_UNIT)))
        .ok_or_else(|| RatioError::InvalidInput("amount too large".to_string()))?;
    let denominator = WAD
        .checked_mul(min_bps)
        .ok_or_else(|| RatioError::InvalidInput("minimum ratio too large".to_string()))?;
    Ok(numerator / denominator)
}

/// Remaining sUSD that can be minted on top of `debt`; zero when the
/// position is already at or past the limit.
pub fn available_to_mint(
    collateral: U256,
    debt: U256,
    unit_price: U256,
    model: &RatioModel,
) -> Result<U256, RatioError> {
    Ok(max_mintable(collateral, unit_price, model)?.saturating_sub(debt))
}

/// Unit price at which the position hits the liquidation ratio, rounded up.
///
/// `None` when there is no debt to liquidate.
pub fn liquidation_price(
    collateral: U256,
    debt: U256,
    model: &RatioModel,
) -> Result<Option<U256>, RatioError> {
    if debt.is_zero() {
        return Ok(None);
    }
    if collateral.is_zero() {
        return Err(RatioError::InvalidInput(
            "position has debt but no collateral".to_string(),
        ));
    }

    let numerator = debt
        .checked_mul(model.liquidation_ratio_bps())
        .and_then(|v| v.checked_mul(WAD))
        .ok_or_else(|| RatioError::InvalidInput("amount too large".to_string()))?;
    let denominator = collateral
        .checked_mul(U256::from(BPS_PER_UNIT))
        .ok_or_else(|| RatioError::InvalidInput("amount too large".to_string()))?;

    Ok(Some(numerator.div_ceil(denominator)))
}

/// A prospective position may be submitted only while healthy.
pub fn can_submit(ratio: &CollateralRatio, model: &RatioModel) -> bool {
    model.classify(ratio) == HealthState::Healthy
}

/// Gauge fill fraction: `min(ratio / 200%, 1)`, full when there is no debt.
pub fn gauge_fill(ratio: &CollateralRatio) -> Decimal {
    match ratio {
        CollateralRatio::NoDebt => Decimal::ONE,
        CollateralRatio::Finite(percent) => {
            let fill = percent
                .checked_div(GAUGE_FULL_PERCENT)
                .unwrap_or(Decimal::ONE);
            fill.min(Decimal::ONE)
        }
    }
}
