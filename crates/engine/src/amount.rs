//! Fixed-point amount handling.
//!
//! Every amount and price is a `U256` with 18 implied decimals (a "wad"),
//! matching the OIL and sUSD token decimals. Decimal strings coming from the
//! UI are converted here and nowhere else.

use alloy::primitives::U256;
use alloy::primitives::utils::{ParseUnits, format_units, parse_units};
use rust_decimal::Decimal;

use crate::error::RatioError;

/// Decimals of both the collateral token and the stablecoin.
pub const WAD_DECIMALS: u8 = 18;

/// One whole token in smallest units.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Parse a user-entered decimal string (e.g. `"57692.31"`) into a wad.
///
/// Rejects empty, non-numeric, non-finite and negative input, and input
/// finer than one wei.
pub fn parse_amount(input: &str) -> Result<U256, RatioError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RatioError::InvalidInput("amount is empty".to_string()));
    }
    // parse_units truncates extra fraction digits instead of failing
    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > WAD_DECIMALS as usize {
            return Err(RatioError::InvalidInput(format!(
                "amount {:?} has more than {} decimal places",
                trimmed, WAD_DECIMALS
            )));
        }
    }

    match parse_units(trimmed, WAD_DECIMALS) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        // "-0" is still zero
        Ok(ParseUnits::I256(value)) if value.is_zero() => Ok(U256::ZERO),
        Ok(ParseUnits::I256(_)) => Err(RatioError::InvalidInput(format!(
            "amount must be non-negative, got {}",
            trimmed
        ))),
        Err(e) => Err(RatioError::InvalidInput(format!(
            "invalid amount {:?}: {}",
            trimmed, e
        ))),
    }
}

/// Convert a non-negative `Decimal` into a wad.
pub fn decimal_to_wad(value: Decimal) -> Result<U256, RatioError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RatioError::InvalidInput(format!(
            "amount must be non-negative, got {}",
            value
        )));
    }
    parse_amount(&value.normalize().to_string())
}

/// Format a wad as a whole-token decimal string without trailing zeros
/// (`1000000000000000000000` → `"1000"`).
pub fn format_amount(value: U256) -> String {
    let formatted = match format_units(value, WAD_DECIMALS) {
        Ok(s) => s,
        // 18 is always a valid unit
        Err(_) => return value.to_string(),
    };
    trim_fraction(&formatted)
}

fn trim_fraction(formatted: &str) -> String {
    if !formatted.contains('.') {
        return formatted.to_string();
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
