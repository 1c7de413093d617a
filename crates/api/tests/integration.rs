//! Integration tests for API routes.
//!
//! Uses `tower::ServiceExt` to test Axum routes without a real HTTP server.
//!
//! ```bash
//! cargo test -p stratum-api --test integration
//! ```

use std::str::FromStr;

use alloy::primitives::U256;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tower::ServiceExt;

use stratum_api::routes::create_router;
use stratum_api::state::AppState;
use stratum_common::config::StratumConfig;
use stratum_common::types::{ContractAddresses, RiskThresholds};

// ============================================================
// Helpers
// ============================================================

fn test_config() -> StratumConfig {
    StratumConfig {
        rpc_url: "http://unused".to_string(),
        chain_id: 11_155_111,
        contracts: ContractAddresses::default(),
        thresholds: RiskThresholds::default(),
        reference_price: dec!(75),
        api_port: 3000,
    }
}

fn app() -> Router {
    create_router(AppState::new(test_config()))
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn decimal(value: &serde_json::Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

fn word(val: U256) -> String {
    alloy::hex::encode(val.to_be_bytes::<32>())
}

fn tokens(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

// ============================================================
// Health & protocol
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "stratum-api");
}

#[tokio::test]
async fn test_protocol_endpoint() {
    let (status, json) = get_json("/api/protocol").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["chain_id"], 11_155_111);
    assert_eq!(json["thresholds"]["min_ratio"], "150");
    assert_eq!(json["thresholds"]["liquidation_ratio"], "130");
    assert_eq!(json["reference_price"], "75");
    let vault = json["contracts"]["stratum_vault"].as_str().unwrap();
    assert_eq!(vault.to_lowercase(), "0x5ec12c85837439d409a550d4e7c22d950ee2148e");
}

// ============================================================
// Ratio
// ============================================================

#[tokio::test]
async fn test_preview_healthy_with_reference_price() {
    let (status, json) = post_json(
        "/api/ratio/preview",
        serde_json::json!({"collateral": "1000", "debt": "40000"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ratio"]["kind"], "finite");
    assert_eq!(decimal(&json["ratio"]["percent"]), dec!(187.5));
    assert_eq!(json["health"], "healthy");
    assert_eq!(json["can_submit"], true);
    assert_eq!(json["unit_price"], "75");
    assert_eq!(json["max_mintable"], "50000");
    assert_eq!(json["liquidation_price"], "52");
    assert_eq!(decimal(&json["gauge_fill"]), dec!(0.9375));
}

#[tokio::test]
async fn test_preview_warning() {
    let (status, json) = post_json(
        "/api/ratio/preview",
        serde_json::json!({"collateral": "1000", "debt": "57692.31", "unit_price": "75"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&json["ratio"]["percent"]), dec!(130));
    assert_eq!(json["health"], "warning");
    assert_eq!(json["can_submit"], false);
}

#[tokio::test]
async fn test_preview_no_debt() {
    let (status, json) = post_json(
        "/api/ratio/preview",
        serde_json::json!({"collateral": "500", "debt": "0"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ratio"]["kind"], "no_debt");
    assert_eq!(json["health"], "healthy");
    assert!(json["liquidation_price"].is_null());
}

#[tokio::test]
async fn test_preview_negative_collateral_rejected() {
    let (status, json) = post_json(
        "/api/ratio/preview",
        serde_json::json!({"collateral": "-1", "debt": "100", "unit_price": "75"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("non-negative"));
}

#[tokio::test]
async fn test_preview_debt_before_collateral() {
    let (status, json) = post_json(
        "/api/ratio/preview",
        serde_json::json!({"collateral": "0", "debt": "100", "unit_price": "75"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&json["ratio"]["percent"]), Decimal::ZERO);
    assert_eq!(json["health"], "at_risk");
    assert_eq!(json["can_submit"], false);
    assert!(json["liquidation_price"].is_null());
}

#[tokio::test]
async fn test_preview_sub_wei_amount_rejected() {
    for collateral in ["1.0000000000000000009", "0.0000000000000000001"] {
        let (status, json) = post_json(
            "/api/ratio/preview",
            serde_json::json!({"collateral": collateral, "debt": "1", "unit_price": "75"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "collateral {}", collateral);
        assert!(json["error"].as_str().unwrap().contains("decimal places"));
    }
}

#[tokio::test]
async fn test_preview_zero_price_rejected() {
    let (status, _) = post_json(
        "/api/ratio/preview",
        serde_json::json!({"collateral": "1000", "debt": "100", "unit_price": "0"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_classify_boundaries() {
    for (ratio, expected) in [
        ("150", "healthy"),
        ("130", "warning"),
        ("129.999", "at_risk"),
    ] {
        let (status, json) = post_json(
            "/api/ratio/classify",
            serde_json::json!({ "ratio_percent": ratio }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["health"], expected, "ratio {}", ratio);
    }
}

#[tokio::test]
async fn test_classify_negative_rejected() {
    let (status, _) = post_json(
        "/api/ratio/classify",
        serde_json::json!({ "ratio_percent": "-5" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================
// Position
// ============================================================

#[tokio::test]
async fn test_decode_position() {
    let data = format!(
        "0x{}{}{}{}",
        word(tokens(1000)),
        word(tokens(40000)),
        word(U256::from(18_750u64)),
        word(U256::from(1u8)),
    );

    let (status, json) = post_json("/api/position/decode", serde_json::json!({ "data": data })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["collateral"], "1000");
    assert_eq!(json["debt"], "40000");
    assert_eq!(decimal(&json["ratio"]["percent"]), dec!(187.5));
    assert_eq!(json["health"], "healthy");
    assert_eq!(json["health_label"], "Healthy");
}

#[tokio::test]
async fn test_decode_seized_position() {
    let data = format!(
        "0x{}{}{}{}",
        word(U256::ZERO),
        word(tokens(100)),
        word(U256::ZERO),
        word(U256::ZERO),
    );

    let (status, json) = post_json("/api/position/decode", serde_json::json!({ "data": data })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["collateral"], "0");
    assert_eq!(decimal(&json["ratio"]["percent"]), Decimal::ZERO);
    assert_eq!(json["health"], "at_risk");
    assert_eq!(json["can_submit"], false);
    assert!(json["liquidation_price"].is_null());
}

#[tokio::test]
async fn test_decode_collateral_ratio() {
    let data = format!("0x{}", word(U256::from(13_500u64)));
    let (status, json) = post_json(
        "/api/ratio/decode",
        serde_json::json!({ "data": data, "debt": "40000" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&json["ratio"]["percent"]), dec!(135));
    assert_eq!(json["health"], "warning");

    // Debt-free vaults may report any sentinel
    let data = format!("0x{}", word(U256::MAX));
    let (status, json) = post_json(
        "/api/ratio/decode",
        serde_json::json!({ "data": data, "debt": "0" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ratio"]["kind"], "no_debt");
    assert_eq!(json["health"], "healthy");
}

#[tokio::test]
async fn test_decode_position_bad_hex() {
    let (status, _) = post_json(
        "/api/position/decode",
        serde_json::json!({ "data": "0xnothex" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_project_deposit_and_mint() {
    let (status, json) = post_json(
        "/api/position/project",
        serde_json::json!({
            "collateral": "0",
            "debt": "0",
            "action": {"type": "deposit_and_mint", "collateral": "1000", "mint": "40000"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["current"]["ratio"]["kind"], "no_debt");
    assert_eq!(json["projected"]["collateral"], "1000");
    assert_eq!(json["projected"]["debt"], "40000");
    assert_eq!(json["projected"]["health"], "healthy");
    assert_eq!(json["available_to_mint"], "10000");
}

#[tokio::test]
async fn test_project_burn_too_much_rejected() {
    let (status, _) = post_json(
        "/api/position/project",
        serde_json::json!({
            "collateral": "1000",
            "debt": "40000",
            "action": {"type": "burn_and_withdraw", "burn": "50000", "withdraw": "0"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================
// Call data
// ============================================================

#[tokio::test]
async fn test_deposit_and_mint_calldata() {
    let (status, json) = post_json(
        "/api/calldata/deposit-and-mint",
        serde_json::json!({"collateral": "1000", "mint": "40000"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["function"], "depositAndMint(uint256,uint256)");
    let data = json["data"].as_str().unwrap();
    assert!(data.starts_with("0x"));
    // selector + two words
    assert_eq!(data.len(), 2 + 8 + 128);
    assert!(data.ends_with(&word(tokens(40000))));
}

#[tokio::test]
async fn test_approve_calldata_targets_collateral() {
    let (status, json) = post_json(
        "/api/calldata/approve",
        serde_json::json!({"amount": "1000"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["function"], "approve(address,uint256)");
    let to = json["to"].as_str().unwrap().to_lowercase();
    assert_eq!(to, "0x113a6d4d1bec8f2632a2cab7a469851fc8b5ecc3");
}

#[tokio::test]
async fn test_empty_burn_and_withdraw_rejected() {
    let (status, _) = post_json(
        "/api/calldata/burn-and-withdraw",
        serde_json::json!({"burn": "0", "withdraw": "0"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_position_calldata() {
    let (status, json) =
        get_json("/api/calldata/get-position/0xabababababababababababababababababababab").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["function"], "getPosition(address)");

    let (status, _) = get_json("/api/calldata/get-position/not-an-address").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_collateral_ratio_calldata() {
    let (status, json) =
        get_json("/api/calldata/collateral-ratio/0xabababababababababababababababababababab").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["function"], "getCollateralRatio(address)");
    assert_eq!(
        json["to"].as_str().unwrap().to_lowercase(),
        "0x5ec12c85837439d409a550d4e7c22d950ee2148e"
    );
}

#[tokio::test]
async fn test_balance_of_calldata() {
    let (status, json) =
        get_json("/api/calldata/balance-of/sUSD/0xabababababababababababababababababababab").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["function"], "balanceOf(address)");
    assert_eq!(
        json["to"].as_str().unwrap().to_lowercase(),
        "0x5c59f6941f418e55d35008334270cc8de57f4d8d"
    );
    let data = json["data"].as_str().unwrap();
    assert!(data.ends_with("abababababababababababababababababababab"));

    let (status, _) =
        get_json("/api/calldata/balance-of/WETH/0xabababababababababababababababababababab").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================
// Token
// ============================================================

#[tokio::test]
async fn test_decode_oil_balance() {
    let data = format!("0x{}", word(tokens(1000) + tokens(1) / U256::from(2u8)));
    let (status, json) = post_json(
        "/api/token/balance/decode",
        serde_json::json!({ "token": "oil", "data": data }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["token"], "OIL");
    assert_eq!(json["balance"], "1000.5");
    assert_eq!(
        json["address"].as_str().unwrap().to_lowercase(),
        "0x113a6d4d1bec8f2632a2cab7a469851fc8b5ecc3"
    );
}

#[tokio::test]
async fn test_decode_balance_truncated_rejected() {
    let (status, _) = post_json(
        "/api/token/balance/decode",
        serde_json::json!({ "token": "sUSD", "data": "0x1234" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
