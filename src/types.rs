use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::{compute_monthly_payment, compute_schedule, AmortizationResult};

/// unique identifier for a loan quote
pub type QuoteId = Uuid;

/// payments per year assumed when the caller does not say otherwise
pub const DEFAULT_PERIODS_PER_YEAR: u32 = 12;

/// fixed-rate installment loan terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    /// number of payment periods; signed so that callers can pass raw input
    pub term_periods: i32,
    pub periods_per_year: u32,
}

impl LoanTerms {
    /// monthly-paying loan terms
    pub fn new(principal: Money, annual_rate: Rate, term_periods: i32) -> Self {
        Self {
            principal,
            annual_rate,
            term_periods,
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
        }
    }

    pub fn with_periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    /// level payment for these terms
    ///
    /// Always month-denominated: `periods_per_year` is not consulted here.
    pub fn monthly_payment(&self) -> Result<Money> {
        compute_monthly_payment(self.principal, self.annual_rate, self.term_periods)
    }

    /// full amortization schedule at `periods_per_year`
    pub fn schedule(&self) -> Result<AmortizationResult> {
        compute_schedule(
            self.principal,
            self.annual_rate,
            self.term_periods,
            self.periods_per_year,
        )
    }
}
