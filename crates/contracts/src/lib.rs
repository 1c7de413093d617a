pub mod token;
pub mod vault;


use alloy::primitives::{Address, Bytes};
use stratum_common::error::AppError;
use stratum_common::types::ContractAddresses;
use thiserror::Error;

use crate::token::TokenContract;
use crate::vault::VaultContract;

/// Errors from ABI encoding/decoding.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("ABI decode error: {0}")]
    Abi(#[from] alloy::sol_types::Error),

    #[error("Invalid hex: {0}")]
    Hex(#[from] alloy::hex::FromHexError),
}

impl From<ContractError> for AppError {
    fn from(err: ContractError) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// A contract call ready to hand to the wallet for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCall {
    /// Target contract
    pub to: Address,
    /// ABI-encoded call data (selector + arguments)
    pub data: Bytes,
    /// Solidity signature of the called function, e.g. `approve(address,uint256)`
    pub function: &'static str,
}

impl PreparedCall {
    /// Call data as a `0x`-prefixed hex string.
    pub fn data_hex(&self) -> String {
        alloy::hex::encode_prefixed(&self.data)
    }
}

/// All Stratum contracts bound to their deployed addresses.
#[derive(Debug, Clone, Copy)]
pub struct StratumContracts {
    pub vault: VaultContract,
    /// OIL collateral token
    pub collateral: TokenContract,
    /// sUSD stablecoin
    pub stable: TokenContract,
}

impl StratumContracts {
    pub fn new(addresses: &ContractAddresses) -> Self {
        Self {
            vault: VaultContract::new(addresses.stratum_vault),
            collateral: TokenContract::new(addresses.oil_collateral, "OIL"),
            stable: TokenContract::new(addresses.stratum_stable, "sUSD"),
        }
    }

    /// Token binding by symbol, `OIL` or `sUSD`, ignoring case.
    pub fn token(&self, symbol: &str) -> Option<TokenContract> {
        let symbol = symbol.trim();
        [self.collateral, self.stable]
            .into_iter()
            .find(|token| token.symbol().eq_ignore_ascii_case(symbol))
    }

    /// `approve` the vault to pull `amount` OIL, the step before `depositAndMint`.
    pub fn approve_collateral(&self, amount: alloy::primitives::U256) -> PreparedCall {
        self.collateral.approve(self.vault.address(), amount)
    }
}

/// Decode a hex string (with or without `0x`) into bytes.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, ContractError> {
    Ok(alloy::hex::decode(input.trim())?)
}
