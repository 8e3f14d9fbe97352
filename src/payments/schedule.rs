use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// one period of an amortization schedule, every figure rounded to cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 1-based period number
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

/// complete amortization table for a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// sum of the unrounded per-period interest
    pub total_interest: Money,
    pub schedule: Vec<PeriodRecord>,
}

impl AmortizationResult {
    /// get record for specific period
    pub fn get_period(&self, period: u32) -> Option<&PeriodRecord> {
        period
            .checked_sub(1)
            .and_then(|index| self.schedule.get(index as usize))
    }

    /// last record of the schedule
    pub fn final_period(&self) -> Option<&PeriodRecord> {
        self.schedule.last()
    }

    /// sum of the rounded payments
    pub fn total_paid(&self) -> Money {
        self.schedule
            .iter()
            .map(|p| p.payment)
            .fold(Money::ZERO, |acc, x| acc + x)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// amortization schedule for a fixed-rate loan
///
/// The level payment is re-derived from the running balance and the number of
/// periods left on every iteration rather than computed once. Each record is
/// rounded to cents independently; the balance carried into the next period
/// stays at full precision.
///
/// A zero (or non-positive) rate pays the original principal off in equal
/// slices of `principal / term_periods`.
pub fn compute_schedule(
    principal: Money,
    annual_rate: Rate,
    term_periods: i32,
    periods_per_year: u32,
) -> Result<AmortizationResult> {
    if term_periods <= 0 {
        return Err(LoanError::InvalidTerm { term: term_periods });
    }

    if !principal.is_positive() {
        return Err(LoanError::InvalidPrincipal { principal });
    }

    let periodic_rate = annual_rate.periodic_rate(periods_per_year)?;
    let rate = if periodic_rate.is_positive() {
        periodic_rate
    } else {
        Rate::ZERO
    };

    let term = term_periods as u32;
    let straight_line = principal.as_decimal() / Decimal::from(term);

    debug!(
        "amortizing {} at {} over {} periods ({} per year)",
        principal, annual_rate, term, periods_per_year
    );

    let mut schedule = Vec::with_capacity(term as usize);
    let mut balance = principal.as_decimal();
    let mut remaining = term;
    let mut total_interest = Decimal::ZERO;

    for period in 1..=term {
        let (payment, interest, principal_portion) = if rate.is_positive() {
            let factor = rate.annuity_factor(remaining)?;
            let interest = balance
                .checked_mul(rate.as_decimal())
                .ok_or_else(|| overflow("interest", period))?;
            let payment = interest
                .checked_div(factor)
                .ok_or_else(|| overflow("payment", period))?;
            let principal_portion = payment
                .checked_sub(interest)
                .ok_or_else(|| overflow("principal portion", period))?;
            (payment, interest, principal_portion)
        } else {
            (straight_line, Decimal::ZERO, straight_line)
        };

        let mut new_balance = balance
            .checked_sub(principal_portion)
            .ok_or_else(|| overflow("balance", period))?;
        if period == term && Money::from_decimal_cents(new_balance).is_zero() {
            new_balance = Decimal::ZERO;
        }

        trace!(
            "period {}: payment {} interest {} principal {} balance {}",
            period, payment, interest, principal_portion, new_balance
        );

        schedule.push(PeriodRecord {
            period,
            payment: Money::from_decimal_cents(payment),
            interest: Money::from_decimal_cents(interest),
            principal: Money::from_decimal_cents(principal_portion),
            balance: Money::from_decimal_cents(new_balance),
        });

        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| overflow("total interest", period))?;
        balance = new_balance;
        remaining -= 1;
    }

    Ok(AmortizationResult {
        total_interest: Money::from_decimal(total_interest),
        schedule,
    })
}

fn overflow(figure: &str, period: u32) -> LoanError {
    LoanError::CalculationError {
        message: format!("{} overflow in period {}", figure, period),
    }
}
