use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::origination::ParameterTable;
use crate::types::DEFAULT_PERIODS_PER_YEAR;

/// underwriting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwritingConfig {
    /// largest share of monthly income the payment may take (0.15 = 15%)
    pub max_payment_income_ratio: Decimal,
    /// lowest monthly income accepted
    pub min_income: Money,
    /// payment cadence used when building quote schedules
    pub periods_per_year: u32,
    /// credit-score bands, when the parameters come from configuration
    pub parameter_table: Option<ParameterTable>,
}

impl Default for UnderwritingConfig {
    fn default() -> Self {
        Self {
            max_payment_income_ratio: dec!(0.15),
            min_income: Money::from_major(1_000),
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            parameter_table: None,
        }
    }
}

impl UnderwritingConfig {
    /// default rules with a parameter table attached
    pub fn with_parameter_table(table: ParameterTable) -> Self {
        Self {
            parameter_table: Some(table),
            ..Self::default()
        }
    }

    /// parse and validate a json configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: UnderwritingConfig =
            serde_json::from_str(json).map_err(|e| LoanError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_payment_income_ratio <= Decimal::ZERO || self.max_payment_income_ratio > Decimal::ONE {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "max_payment_income_ratio must be in (0, 1], got {}",
                    self.max_payment_income_ratio
                ),
            });
        }

        if self.min_income.is_negative() {
            return Err(LoanError::InvalidConfiguration {
                message: format!("min_income cannot be negative, got {}", self.min_income),
            });
        }

        if self.periods_per_year == 0 {
            return Err(LoanError::InvalidPaymentFrequency {
                periods_per_year: self.periods_per_year,
            });
        }

        if let Some(table) = &self.parameter_table {
            table.validate()?;
        }

        Ok(())
    }

    /// largest payment allowed for a monthly income, rounded to cents
    pub fn max_payment(&self, income: Money) -> Money {
        Money::from_decimal_cents(income.as_decimal() * self.max_payment_income_ratio)
    }
}
