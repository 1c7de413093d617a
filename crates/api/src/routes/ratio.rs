//! Ratio preview and classification routes.

use alloy::primitives::U256;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stratum_common::error::AppError;
use stratum_common::types::HealthState;
use stratum_contracts::decode_hex;
use stratum_contracts::vault::VaultContract;
use stratum_engine::amount::{decimal_to_wad, format_amount, parse_amount};
use stratum_engine::cr_calculator::{CollateralRatio, RatioModel};
use stratum_engine::position::{PositionView, max_mintable};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ratio/preview", post(preview_ratio))
        .route("/api/ratio/classify", post(classify_ratio))
        .route("/api/ratio/decode", post(decode_ratio))
}

/// Request body for a ratio preview. Amounts are whole-token decimal strings.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub collateral: String,
    pub debt: String,
    /// OIL price in sUSD; defaults to the configured reference price
    pub unit_price: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub position: PositionView,
    pub unit_price: String,
    /// Largest debt the collateral supports at the minimum ratio
    pub max_mintable: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub ratio_percent: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub health: HealthState,
    pub health_label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct DecodeRatioRequest {
    /// Hex-encoded return data of `getCollateralRatio(address)`
    pub data: String,
    /// Current debt in whole sUSD; zero debt reads as no debt whatever the vault reports
    pub debt: String,
}

#[derive(Debug, Serialize)]
pub struct RatioResponse {
    pub ratio: CollateralRatio,
    pub health: HealthState,
    pub health_label: &'static str,
}

/// POST /api/ratio/preview — Ratio and health of a prospective position.
async fn preview_ratio(
    State(state): State<AppState>,
    Json(req): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let collateral = parse_amount(&req.collateral)?;
    let debt = parse_amount(&req.debt)?;
    let unit_price = resolve_unit_price(&state, req.unit_price.as_deref())?;

    let position = PositionView::at_price(collateral, debt, unit_price, &state.model)?;
    let max = max_mintable(collateral, unit_price, &state.model)?;

    tracing::debug!(
        collateral = %req.collateral,
        debt = %req.debt,
        health = %position.health,
        "Ratio preview"
    );

    Ok(Json(PreviewResponse {
        position,
        unit_price: format_amount(unit_price),
        max_mintable: format_amount(max),
    }))
}

/// POST /api/ratio/classify — Health state of a ratio in percent.
async fn classify_ratio(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    if req.ratio_percent.is_sign_negative() && !req.ratio_percent.is_zero() {
        return Err(AppError::InvalidInput(format!(
            "ratio must be non-negative, got {}",
            req.ratio_percent
        )));
    }

    let health = state.model.classify_percent(req.ratio_percent);
    Ok(Json(ClassifyResponse {
        health,
        health_label: health.label(),
    }))
}

/// POST /api/ratio/decode — Classify the ratio the vault reported.
async fn decode_ratio(
    State(state): State<AppState>,
    Json(req): Json<DecodeRatioRequest>,
) -> Result<Json<RatioResponse>, AppError> {
    let debt = parse_amount(&req.debt)?;
    let data = decode_hex(&req.data)?;
    let raw_bps = VaultContract::decode_collateral_ratio(&data)?;

    let ratio = RatioModel::from_contract_ratio(raw_bps, debt);
    let health = state.model.classify(&ratio);
    Ok(Json(RatioResponse {
        ratio,
        health,
        health_label: health.label(),
    }))
}

/// Parse the caller's unit price, falling back to the configured reference price.
pub(crate) fn resolve_unit_price(
    state: &AppState,
    unit_price: Option<&str>,
) -> Result<U256, AppError> {
    let price = match unit_price {
        Some(raw) => parse_amount(raw)?,
        None => decimal_to_wad(state.config.reference_price)?,
    };
    if price.is_zero() {
        return Err(AppError::InvalidInput(
            "unit price must be positive".to_string(),
        ));
    }
    Ok(price)
}
