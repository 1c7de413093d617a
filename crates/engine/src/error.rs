use stratum_common::error::AppError;
use thiserror::Error;

/// Errors produced by ratio and position math.
///
/// A zero debt is not an error; it surfaces as `CollateralRatio::NoDebt`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatioError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<RatioError> for AppError {
    fn from(err: RatioError) -> Self {
        match err {
            RatioError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}
