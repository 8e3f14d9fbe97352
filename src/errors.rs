use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("invalid principal amount: {principal}")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("invalid term: {term}")]
    InvalidTerm {
        term: i32,
    },

    #[error("invalid payment frequency: {periods_per_year} periods per year")]
    InvalidPaymentFrequency {
        periods_per_year: u32,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("loan parameters unavailable: {message}")]
    ParameterUnavailable {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
