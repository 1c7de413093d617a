//! Protocol parameters the UI renders next to the position.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Serialize;

use stratum_common::types::RiskThresholds;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/protocol", get(protocol_info))
}

#[derive(Debug, Serialize)]
pub struct ContractsResponse {
    pub oil_collateral: String,
    pub stratum_stable: String,
    pub stratum_vault: String,
    pub price_feed: String,
}

#[derive(Debug, Serialize)]
pub struct ProtocolResponse {
    pub chain_id: u64,
    pub rpc_url: String,
    pub thresholds: RiskThresholds,
    #[serde(with = "rust_decimal::serde::str")]
    pub reference_price: Decimal,
    pub contracts: ContractsResponse,
}

/// GET /api/protocol — Thresholds, reference price and deployment info.
async fn protocol_info(State(state): State<AppState>) -> Json<ProtocolResponse> {
    let config = &state.config;
    let addresses = &config.contracts;

    Json(ProtocolResponse {
        chain_id: config.chain_id,
        rpc_url: config.rpc_url.clone(),
        thresholds: config.thresholds,
        reference_price: config.reference_price,
        contracts: ContractsResponse {
            oil_collateral: addresses.oil_collateral.to_string(),
            stratum_stable: addresses.stratum_stable.to_string(),
            stratum_vault: addresses.stratum_vault.to_string(),
            price_feed: addresses.price_feed.to_string(),
        },
    })
}
