use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// level payment of a fully amortizing fixed-rate loan, rounded to cents
///
/// The rate is always converted as `annual / 12`, whatever cadence the caller
/// actually pays on. A term of zero makes the whole principal due at once and
/// returns it unrounded.
pub fn compute_monthly_payment(principal: Money, annual_rate: Rate, term_periods: i32) -> Result<Money> {
    if term_periods < 0 {
        return Err(LoanError::InvalidTerm { term: term_periods });
    }

    if annual_rate.is_negative() {
        return Err(LoanError::InvalidRate { rate: annual_rate });
    }

    if principal.is_negative() {
        return Err(LoanError::InvalidPrincipal { principal });
    }

    if term_periods == 0 {
        return Ok(principal);
    }

    // an annual rate too small to survive the /12 conversion pays straight-line
    let monthly_rate = annual_rate.monthly_rate();
    let payment = if monthly_rate.is_positive() {
        let factor = monthly_rate.annuity_factor(term_periods as u32)?;

        // P * (r / (1 - (1 + r)^-n))
        principal
            .as_decimal()
            .checked_mul(monthly_rate.as_decimal() / factor)
            .ok_or_else(|| LoanError::CalculationError {
                message: format!("payment overflow for principal {}", principal),
            })?
    } else {
        principal.as_decimal() / Decimal::from(term_periods)
    };

    Ok(Money::from_decimal_cents(payment))
}
