use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use stratum_common::types::Position;

use crate::{ContractError, PreparedCall};

sol! {
    /// CDP vault: holds OIL collateral and mints sUSD against it.
    interface IStratumVault {
        function depositAndMint(uint256 collateralAmount, uint256 mintAmount) external;
        function burnAndWithdraw(uint256 burnAmount, uint256 withdrawAmount) external;
        function getPosition(address user) external view returns (uint256 collateral, uint256 debt, uint256 ratio, bool isHealthy);
        function getCollateralRatio(address user) external view returns (uint256);
    }
}

/// Vault call builder and return-data decoder.
///
/// Handles:
/// - `depositAndMint(uint256 collateralAmount, uint256 mintAmount)`
/// - `burnAndWithdraw(uint256 burnAmount, uint256 withdrawAmount)`
/// - `getPosition(address user)` → `(collateral, debt, ratio, isHealthy)`
/// - `getCollateralRatio(address user)` → `ratio`
#[derive(Debug, Clone, Copy)]
pub struct VaultContract {
    address: Address,
}

impl VaultContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn deposit_and_mint(&self, collateral_amount: U256, mint_amount: U256) -> PreparedCall {
        let call = IStratumVault::depositAndMintCall {
            collateralAmount: collateral_amount,
            mintAmount: mint_amount,
        };
        self.prepare(call)
    }

    pub fn burn_and_withdraw(&self, burn_amount: U256, withdraw_amount: U256) -> PreparedCall {
        let call = IStratumVault::burnAndWithdrawCall {
            burnAmount: burn_amount,
            withdrawAmount: withdraw_amount,
        };
        self.prepare(call)
    }

    pub fn get_position(&self, user: Address) -> PreparedCall {
        self.prepare(IStratumVault::getPositionCall { user })
    }

    pub fn get_collateral_ratio(&self, user: Address) -> PreparedCall {
        self.prepare(IStratumVault::getCollateralRatioCall { user })
    }

    /// Decode the return data of `getPosition`.
    pub fn decode_position(data: &[u8]) -> Result<Position, ContractError> {
        let ret = IStratumVault::getPositionCall::abi_decode_returns(data)?;
        let position = Position {
            collateral: ret.collateral,
            debt: ret.debt,
            ratio_bps: ret.ratio,
            is_healthy: ret.isHealthy,
        };

        tracing::debug!(
            collateral = %position.collateral,
            debt = %position.debt,
            ratio_bps = %position.ratio_bps,
            is_healthy = position.is_healthy,
            "Decoded vault position"
        );

        Ok(position)
    }

    /// Decode the return data of `getCollateralRatio` (percent × 100).
    pub fn decode_collateral_ratio(data: &[u8]) -> Result<U256, ContractError> {
        Ok(IStratumVault::getCollateralRatioCall::abi_decode_returns(data)?)
    }

    fn prepare<C: SolCall>(&self, call: C) -> PreparedCall {
        PreparedCall {
            to: self.address,
            data: call.abi_encode().into(),
            function: C::SIGNATURE,
        }
    }
}
