//! Token balance decoding.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use stratum_common::error::AppError;
use stratum_contracts::decode_hex;
use stratum_contracts::token::TokenContract;
use stratum_engine::amount::format_amount;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/token/balance/decode", post(decode_balance))
}

#[derive(Debug, Deserialize)]
pub struct DecodeBalanceRequest {
    /// `OIL` or `sUSD`
    pub token: String,
    /// Hex-encoded return data of `balanceOf(address)`
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub token: &'static str,
    pub address: String,
    /// Whole-token balance, e.g. the "Available" figure next to a deposit
    pub balance: String,
}

/// POST /api/token/balance/decode — Render a `balanceOf` result in whole tokens.
async fn decode_balance(
    State(state): State<AppState>,
    Json(req): Json<DecodeBalanceRequest>,
) -> Result<Json<BalanceResponse>, AppError> {
    let contract = state
        .contracts
        .token(&req.token)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown token {}", req.token)))?;
    let data = decode_hex(&req.data)?;
    let balance = TokenContract::decode_balance(&data)?;

    Ok(Json(BalanceResponse {
        token: contract.symbol(),
        address: contract.address().to_string(),
        balance: format_amount(balance),
    }))
}
