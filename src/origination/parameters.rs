use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// source of credit-score based lending parameters
pub trait LoanParameterSource {
    /// largest amount that may be lent at this credit score
    fn max_amount(&self, credit_score: u16) -> Result<Money>;

    /// annual rate offered for a term at this credit score
    fn interest_rate(&self, term: i32, credit_score: u16) -> Result<Rate>;

    /// fee added to the financed amount
    fn origination_fee(&self, amount: Money) -> Result<Money>;
}

/// rate override for terms up to `max_term` periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRate {
    pub max_term: i32,
    pub annual_rate: Rate,
}

/// lending parameters for scores at or above `min_score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min_score: u16,
    pub max_amount: Money,
    pub annual_rate: Rate,
    #[serde(default)]
    pub term_rates: Vec<TermRate>,
}

impl ScoreBand {
    fn rate_for_term(&self, term: i32) -> Rate {
        self.term_rates
            .iter()
            .filter(|t| term <= t.max_term)
            .min_by_key(|t| t.max_term)
            .map(|t| t.annual_rate)
            .unwrap_or(self.annual_rate)
    }
}

/// table-driven parameter source, usually loaded from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTable {
    pub bands: Vec<ScoreBand>,
    /// fee as a percentage of the amount (1.5 = 1.5%)
    pub origination_fee_percent: Decimal,
    #[serde(default)]
    pub minimum_origination_fee: Money,
}

impl ParameterTable {
    pub fn new(bands: Vec<ScoreBand>, origination_fee_percent: Decimal) -> Self {
        Self {
            bands,
            origination_fee_percent,
            minimum_origination_fee: Money::ZERO,
        }
    }

    pub fn minimum_fee(mut self, fee: Money) -> Self {
        self.minimum_origination_fee = fee;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.bands.is_empty() {
            return Err(LoanError::InvalidConfiguration {
                message: "parameter table has no score bands".to_string(),
            });
        }

        for band in &self.bands {
            if band.max_amount.is_negative() {
                return Err(LoanError::InvalidConfiguration {
                    message: format!("band {} has a negative max amount", band.min_score),
                });
            }
            let rates = std::iter::once(band.annual_rate).chain(band.term_rates.iter().map(|t| t.annual_rate));
            for rate in rates {
                if rate.is_negative() {
                    return Err(LoanError::InvalidRate { rate });
                }
            }
        }

        if self.origination_fee_percent < Decimal::ZERO || self.minimum_origination_fee.is_negative() {
            return Err(LoanError::InvalidConfiguration {
                message: "origination fee cannot be negative".to_string(),
            });
        }

        Ok(())
    }

    /// highest band whose floor the score reaches
    fn band(&self, credit_score: u16) -> Result<&ScoreBand> {
        self.bands
            .iter()
            .filter(|b| credit_score >= b.min_score)
            .max_by_key(|b| b.min_score)
            .ok_or_else(|| LoanError::ParameterUnavailable {
                message: format!("no lending band covers credit score {}", credit_score),
            })
    }
}

impl LoanParameterSource for ParameterTable {
    fn max_amount(&self, credit_score: u16) -> Result<Money> {
        Ok(self.band(credit_score)?.max_amount)
    }

    fn interest_rate(&self, term: i32, credit_score: u16) -> Result<Rate> {
        Ok(self.band(credit_score)?.rate_for_term(term))
    }

    fn origination_fee(&self, amount: Money) -> Result<Money> {
        Ok(amount
            .percentage(self.origination_fee_percent)?
            .round_cents()
            .max(self.minimum_origination_fee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> ParameterTable {
        ParameterTable::new(
            vec![
                ScoreBand {
                    min_score: 580,
                    max_amount: Money::from_major(2_000),
                    annual_rate: Rate::from_percentage(30),
                    term_rates: vec![],
                },
                ScoreBand {
                    min_score: 740,
                    max_amount: Money::from_major(25_000),
                    annual_rate: Rate::from_percentage(12),
                    term_rates: vec![
                        TermRate { max_term: 24, annual_rate: Rate::from_percentage(8) },
                        TermRate { max_term: 48, annual_rate: Rate::from_percentage(10) },
                    ],
                },
                ScoreBand {
                    min_score: 660,
                    max_amount: Money::from_major(10_000),
                    annual_rate: Rate::from_percentage(18),
                    term_rates: vec![],
                },
            ],
            dec!(2),
        )
        .minimum_fee(Money::from_major(25))
    }

    #[test]
    fn test_band_lookup() {
        let table = table();
        assert_eq!(table.max_amount(580).unwrap(), Money::from_major(2_000));
        assert_eq!(table.max_amount(700).unwrap(), Money::from_major(10_000));
        assert_eq!(table.max_amount(850).unwrap(), Money::from_major(25_000));
        assert!(matches!(
            table.max_amount(500),
            Err(LoanError::ParameterUnavailable { .. })
        ));
    }

    #[test]
    fn test_term_rates() {
        let table = table();
        assert_eq!(table.interest_rate(12, 760).unwrap(), Rate::from_percentage(8));
        assert_eq!(table.interest_rate(24, 760).unwrap(), Rate::from_percentage(8));
        assert_eq!(table.interest_rate(36, 760).unwrap(), Rate::from_percentage(10));
        assert_eq!(table.interest_rate(60, 760).unwrap(), Rate::from_percentage(12));
        assert_eq!(table.interest_rate(12, 600).unwrap(), Rate::from_percentage(30));
    }

    #[test]
    fn test_origination_fee() {
        let table = table();
        assert_eq!(table.origination_fee(Money::from_major(5_000)).unwrap(), Money::from_major(100));
        // 2% of 500 is below the floor
        assert_eq!(table.origination_fee(Money::from_major(500)).unwrap(), Money::from_major(25));
    }

    #[test]
    fn test_origination_fee_overflow() {
        let huge = Money::from_str_exact("79000000000000000000000000000").unwrap();
        assert!(matches!(
            table().origination_fee(huge),
            Err(LoanError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_validate() {
        assert!(table().validate().is_ok());
        assert!(ParameterTable::new(vec![], dec!(1)).validate().is_err());

        let mut negative = table();
        negative.bands[0].annual_rate = Rate::from_percent(-1);
        assert!(matches!(negative.validate(), Err(LoanError::InvalidRate { .. })));
    }

    #[test]
    fn test_table_from_json() {
        let json = r#"{
            "bands": [
                { "min_score": 600, "max_amount": "5000", "annual_rate": "0.15" }
            ],
            "origination_fee_percent": "1.5"
        }"#;
        let table: ParameterTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.interest_rate(36, 700).unwrap(), Rate::from_percentage(15));
        assert_eq!(table.minimum_origination_fee, Money::ZERO);
        assert_eq!(table.origination_fee(Money::from_major(5_000)).unwrap(), Money::from_major(75));
    }
}
