//! Call data builders. The UI passes the result to the wallet for signing;
//! nothing is submitted from here.

use std::str::FromStr;

use alloy::primitives::Address;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use stratum_common::error::AppError;
use stratum_contracts::PreparedCall;
use stratum_engine::amount::parse_amount;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/calldata/approve", post(approve))
        .route("/api/calldata/deposit-and-mint", post(deposit_and_mint))
        .route("/api/calldata/burn-and-withdraw", post(burn_and_withdraw))
        .route("/api/calldata/get-position/{user}", get(get_position))
        .route("/api/calldata/collateral-ratio/{user}", get(get_collateral_ratio))
        .route("/api/calldata/balance-of/{token}/{user}", get(balance_of))
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct DepositAndMintRequest {
    pub collateral: String,
    pub mint: String,
}

#[derive(Debug, Deserialize)]
pub struct BurnAndWithdrawRequest {
    pub burn: String,
    pub withdraw: String,
}

#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub to: String,
    pub data: String,
    pub function: &'static str,
}

impl From<PreparedCall> for CallResponse {
    fn from(call: PreparedCall) -> Self {
        Self {
            to: call.to.to_string(),
            data: call.data_hex(),
            function: call.function,
        }
    }
}

/// POST /api/calldata/approve — Let the vault pull `amount` OIL.
async fn approve(
    State(state): State<AppState>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<CallResponse>, AppError> {
    let amount = parse_amount(&req.amount)?;
    Ok(Json(state.contracts.approve_collateral(amount).into()))
}

/// POST /api/calldata/deposit-and-mint — Deposit OIL and mint sUSD in one call.
///
/// The vault enforces the minimum ratio; this only encodes the call.
async fn deposit_and_mint(
    State(state): State<AppState>,
    Json(req): Json<DepositAndMintRequest>,
) -> Result<Json<CallResponse>, AppError> {
    let collateral = parse_amount(&req.collateral)?;
    let mint = parse_amount(&req.mint)?;
    if collateral.is_zero() && mint.is_zero() {
        return Err(AppError::InvalidInput(
            "deposit or mint amount must be positive".to_string(),
        ));
    }
    Ok(Json(state.contracts.vault.deposit_and_mint(collateral, mint).into()))
}

/// POST /api/calldata/burn-and-withdraw — Repay sUSD and withdraw OIL.
async fn burn_and_withdraw(
    State(state): State<AppState>,
    Json(req): Json<BurnAndWithdrawRequest>,
) -> Result<Json<CallResponse>, AppError> {
    let burn = parse_amount(&req.burn)?;
    let withdraw = parse_amount(&req.withdraw)?;
    if burn.is_zero() && withdraw.is_zero() {
        return Err(AppError::InvalidInput(
            "burn or withdraw amount must be positive".to_string(),
        ));
    }
    Ok(Json(state.contracts.vault.burn_and_withdraw(burn, withdraw).into()))
}

/// GET /api/calldata/get-position/{user} — Read call for a user's position.
async fn get_position(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<CallResponse>, AppError> {
    let user = parse_address(&user)?;
    Ok(Json(state.contracts.vault.get_position(user).into()))
}

/// GET /api/calldata/collateral-ratio/{user} — Read call for the vault's ratio alone.
async fn get_collateral_ratio(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<CallResponse>, AppError> {
    let user = parse_address(&user)?;
    Ok(Json(state.contracts.vault.get_collateral_ratio(user).into()))
}

/// GET /api/calldata/balance-of/{token}/{user} — Read call for an OIL or sUSD balance.
async fn balance_of(
    State(state): State<AppState>,
    Path((token, user)): Path<(String, String)>,
) -> Result<Json<CallResponse>, AppError> {
    let contract = state
        .contracts
        .token(&token)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown token {}", token)))?;
    let user = parse_address(&user)?;
    Ok(Json(contract.balance_of(user).into()))
}

fn parse_address(raw: &str) -> Result<Address, AppError> {
    Address::from_str(raw.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid address {}: {}", raw, e)))
}
