use std::fmt;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::UnderwritingConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::payments::{compute_monthly_payment, PeriodRecord};
use crate::types::{LoanTerms, QuoteId};

use super::parameters::{LoanParameterSource, ParameterTable};

/// borrower's request for a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub amount: Money,
    pub credit_score: u16,
    /// number of monthly payments
    pub term: i32,
    /// monthly income
    pub income: Money,
}

/// why a request was turned down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclineReason {
    AmountAboveMaximum {
        max_amount: Money,
    },
    IncomeBelowMinimum {
        min_income: Money,
    },
    PaymentExceedsIncomeShare {
        payment: Money,
        max_payment: Money,
        max_payment_income_ratio: Decimal,
    },
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclineReason::AmountAboveMaximum { max_amount } => write!(
                f,
                "The maximum loan amount for your credit score is: ${}",
                max_amount
            ),
            DeclineReason::IncomeBelowMinimum { min_income } => write!(
                f,
                "Income must be at least ${:.2}",
                min_income.as_decimal()
            ),
            DeclineReason::PaymentExceedsIncomeShare {
                payment,
                max_payment,
                max_payment_income_ratio,
            } => write!(
                f,
                "The payment amount of ${:.2} calculated for this loan exceeds {:.2}% of monthly income (${:.2})",
                payment.as_decimal(),
                *max_payment_income_ratio * Decimal::from(100),
                max_payment.as_decimal()
            ),
        }
    }
}

/// approved loan quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub id: QuoteId,
    pub created_at: DateTime<Utc>,
    pub amount: Money,
    pub interest_rate: Rate,
    pub origination_fee: Money,
    /// amount plus origination fee
    pub financed_amount: Money,
    pub term: i32,
    pub payment: Money,
    pub total_interest: Money,
    pub schedule: Vec<PeriodRecord>,
}

impl LoanQuote {
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// result of evaluating a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuoteOutcome {
    Approved(LoanQuote),
    Declined(DeclineReason),
}

impl QuoteOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, QuoteOutcome::Approved(_))
    }

    pub fn quote(&self) -> Option<&LoanQuote> {
        match self {
            QuoteOutcome::Approved(quote) => Some(quote),
            QuoteOutcome::Declined(_) => None,
        }
    }

    pub fn decline_reason(&self) -> Option<&DeclineReason> {
        match self {
            QuoteOutcome::Approved(_) => None,
            QuoteOutcome::Declined(reason) => Some(reason),
        }
    }
}

/// applies lending rules to quote requests
pub struct Underwriter<P> {
    parameters: P,
    config: UnderwritingConfig,
}

impl<P: LoanParameterSource> Underwriter<P> {
    pub fn new(parameters: P, config: UnderwritingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { parameters, config })
    }

    pub fn config(&self) -> &UnderwritingConfig {
        &self.config
    }

    pub fn parameters(&self) -> &P {
        &self.parameters
    }

    /// evaluate a request, stopping at the first rule it fails
    ///
    /// Rules, in order: amount within the score's maximum, income at least the
    /// configured minimum, and the payment on amount plus fee within the
    /// configured share of income. Calculation and parameter failures are
    /// returned as errors, not declines.
    pub fn evaluate(&self, request: &QuoteRequest, time_provider: &SafeTimeProvider) -> Result<QuoteOutcome> {
        let max_amount = self.parameters.max_amount(request.credit_score)?;
        if request.amount > max_amount {
            debug!(
                "declined: amount {} above maximum {} for score {}",
                request.amount, max_amount, request.credit_score
            );
            return Ok(QuoteOutcome::Declined(DeclineReason::AmountAboveMaximum { max_amount }));
        }

        if request.income < self.config.min_income {
            debug!("declined: income {} below minimum {}", request.income, self.config.min_income);
            return Ok(QuoteOutcome::Declined(DeclineReason::IncomeBelowMinimum {
                min_income: self.config.min_income,
            }));
        }

        let fee = self.parameters.origination_fee(request.amount)?;
        let max_payment = self.config.max_payment(request.income);
        let rate = self.parameters.interest_rate(request.term, request.credit_score)?;

        let terms = LoanTerms::new(request.amount.checked_add(fee)?, rate, request.term)
            .with_periods_per_year(self.config.periods_per_year);
        let payment = compute_monthly_payment(terms.principal, terms.annual_rate, terms.term_periods)?;

        if payment > max_payment {
            debug!("declined: payment {} above income share {}", payment, max_payment);
            return Ok(QuoteOutcome::Declined(DeclineReason::PaymentExceedsIncomeShare {
                payment,
                max_payment,
                max_payment_income_ratio: self.config.max_payment_income_ratio,
            }));
        }

        let amortization = terms.schedule()?;
        let quote = LoanQuote {
            id: Uuid::new_v4(),
            created_at: time_provider.now(),
            amount: request.amount,
            interest_rate: rate,
            origination_fee: fee,
            financed_amount: terms.principal,
            term: request.term,
            payment,
            total_interest: amortization.total_interest,
            schedule: amortization.schedule,
        };

        debug!(
            "approved quote {}: {} at {} over {} periods, payment {}",
            quote.id, quote.financed_amount, quote.interest_rate, quote.term, quote.payment
        );

        Ok(QuoteOutcome::Approved(quote))
    }
}

impl Underwriter<ParameterTable> {
    /// underwriter driven entirely by configuration
    pub fn from_config(config: UnderwritingConfig) -> Result<Self> {
        let table = config
            .parameter_table
            .clone()
            .ok_or(LoanError::InvalidConfiguration {
                message: "no parameter table configured".to_string(),
            })?;
        Self::new(table, config)
    }
}
