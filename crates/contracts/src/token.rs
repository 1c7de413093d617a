use alloy::primitives::{Address, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::{ContractError, PreparedCall};

sol! {
    /// The subset of ERC-20 used for OIL and sUSD.
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
}

/// ERC-20 token binding (OIL collateral or sUSD stablecoin).
#[derive(Debug, Clone, Copy)]
pub struct TokenContract {
    address: Address,
    symbol: &'static str,
}

impl TokenContract {
    pub fn new(address: Address, symbol: &'static str) -> Self {
        Self { address, symbol }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn approve(&self, spender: Address, amount: U256) -> PreparedCall {
        self.prepare(IERC20::approveCall { spender, amount })
    }

    pub fn balance_of(&self, account: Address) -> PreparedCall {
        self.prepare(IERC20::balanceOfCall { account })
    }

    /// Decode the return data of `balanceOf`.
    pub fn decode_balance(data: &[u8]) -> Result<U256, ContractError> {
        Ok(IERC20::balanceOfCall::abi_decode_returns(data)?)
    }

    fn prepare<C: SolCall>(&self, call: C) -> PreparedCall {
        PreparedCall {
            to: self.address,
            data: call.abi_encode().into(),
            function: C::SIGNATURE,
        }
    }
}
