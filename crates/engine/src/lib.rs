pub mod amount;
pub mod cr_calculator;
pub mod error;
pub mod position;
