//! Position rendering and projection routes.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use stratum_common::error::AppError;
use stratum_contracts::decode_hex;
use stratum_contracts::vault::VaultContract;
use stratum_engine::amount::{format_amount, parse_amount};
use stratum_engine::position::{PositionAction, PositionView, available_to_mint, project};

use crate::routes::ratio::resolve_unit_price;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/position/decode", post(decode_position))
        .route("/api/position/project", post(project_position))
}

#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    /// Hex-encoded return data of `getPosition(address)`
    pub data: String,
}

/// Vault action in whole-token decimal strings.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionRequest {
    DepositAndMint { collateral: String, mint: String },
    BurnAndWithdraw { burn: String, withdraw: String },
}

#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    pub collateral: String,
    pub debt: String,
    pub unit_price: Option<String>,
    pub action: ActionRequest,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub current: PositionView,
    pub projected: PositionView,
    /// sUSD still mintable after the action
    pub available_to_mint: String,
}

/// POST /api/position/decode — Render the position the vault reported.
async fn decode_position(
    State(state): State<AppState>,
    Json(req): Json<DecodeRequest>,
) -> Result<Json<PositionView>, AppError> {
    let data = decode_hex(&req.data)?;
    let position = VaultContract::decode_position(&data)?;
    let view = PositionView::from_contract(&position, &state.model)?;
    Ok(Json(view))
}

/// POST /api/position/project — Position after a depositAndMint or burnAndWithdraw.
async fn project_position(
    State(state): State<AppState>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let collateral = parse_amount(&req.collateral)?;
    let debt = parse_amount(&req.debt)?;
    let unit_price = resolve_unit_price(&state, req.unit_price.as_deref())?;

    let action = match &req.action {
        ActionRequest::DepositAndMint { collateral, mint } => PositionAction::DepositAndMint {
            collateral: parse_amount(collateral)?,
            mint: parse_amount(mint)?,
        },
        ActionRequest::BurnAndWithdraw { burn, withdraw } => PositionAction::BurnAndWithdraw {
            burn: parse_amount(burn)?,
            withdraw: parse_amount(withdraw)?,
        },
    };

    let current = PositionView::at_price(collateral, debt, unit_price, &state.model)?;
    let (next_collateral, next_debt) = project(collateral, debt, action)?;
    let projected = PositionView::at_price(next_collateral, next_debt, unit_price, &state.model)?;
    let available = available_to_mint(next_collateral, next_debt, unit_price, &state.model)?;

    tracing::debug!(
        ?action,
        current = %current.health,
        projected = %projected.health,
        "Position projected"
    );

    Ok(Json(ProjectResponse {
        current,
        projected,
        available_to_mint: format_amount(available),
    }))
}
