use std::str::FromStr;

use alloy::primitives::Address;
use anyhow::Context;
use rust_decimal::Decimal;

use crate::types::{ContractAddresses, RiskThresholds};

/// Sepolia testnet, where the Stratum contracts are deployed.
const DEFAULT_CHAIN_ID: u64 = 11_155_111;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StratumConfig {
    /// JSON-RPC endpoint the wallet layer talks to (served to the UI as-is)
    pub rpc_url: String,

    /// EVM chain id of the deployment
    pub chain_id: u64,

    /// Deployed contract addresses
    pub contracts: ContractAddresses,

    /// Risk thresholds mirrored from the vault configuration
    pub thresholds: RiskThresholds,

    /// Reference OIL price in sUSD used for previews when the caller omits one
    pub reference_price: Decimal,

    /// Port the API server binds to (default: 3000)
    pub api_port: u16,
}

impl StratumConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = ContractAddresses::default();
        let contracts = ContractAddresses {
            oil_collateral: address_var("OIL_COLLATERAL_ADDRESS", defaults.oil_collateral)?,
            stratum_stable: address_var("STRATUM_STABLE_ADDRESS", defaults.stratum_stable)?,
            stratum_vault: address_var("STRATUM_VAULT_ADDRESS", defaults.stratum_vault)?,
            price_feed: address_var("PRICE_FEED_ADDRESS", defaults.price_feed)?,
        };

        let thresholds = RiskThresholds::new(
            decimal_var("MIN_COLLATERAL_RATIO", "150")?,
            decimal_var("LIQUIDATION_RATIO", "130")?,
        )
        .context("Invalid risk thresholds")?;

        let reference_price = decimal_var("REFERENCE_PRICE", "75")?;
        if reference_price <= Decimal::ZERO {
            anyhow::bail!("REFERENCE_PRICE must be positive, got {}", reference_price);
        }

        let config = Self {
            rpc_url: std::env::var("RPC_URL")
                .unwrap_or_else(|_| "https://ethereum-sepolia-rpc.publicnode.com".to_string()),
            chain_id: std::env::var("CHAIN_ID")
                .unwrap_or_else(|_| DEFAULT_CHAIN_ID.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("CHAIN_ID must be a valid u64"))?,
            contracts,
            thresholds,
            reference_price,
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_PORT must be a valid u16"))?,
        };

        tracing::debug!(
            chain_id = config.chain_id,
            vault = %config.contracts.stratum_vault,
            min_ratio = %config.thresholds.min_ratio,
            liquidation_ratio = %config.thresholds.liquidation_ratio,
            "Configuration loaded"
        );

        Ok(config)
    }
}

fn address_var(name: &str, default: Address) -> anyhow::Result<Address> {
    match std::env::var(name) {
        Ok(raw) => Address::from_str(raw.trim())
            .map_err(|e| anyhow::anyhow!("{} must be a 20-byte hex address: {}", name, e)),
        Err(_) => Ok(default),
    }
}

fn decimal_var(name: &str, default: &str) -> anyhow::Result<Decimal> {
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    Decimal::from_str(raw.trim()).map_err(|e| anyhow::anyhow!("{} must be a decimal: {}", name, e))
}
