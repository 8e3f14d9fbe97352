use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use crate::errors::{LoanError, Result};

/// internal precision carried by money between calculations
pub const MONEY_DP: u32 = 8;

/// precision of every figure shown to a borrower
pub const CENTS_DP: u32 = 2;

/// Money type with 8 decimal places of working precision, reported in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_DP))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> std::result::Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(MONEY_DP)))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        let d = Decimal::from(amount) / Decimal::from(10_u64.pow(scale));
        Money(d.round_dp(MONEY_DP))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// create from a full-precision decimal, rounded straight to cents
    pub fn from_decimal_cents(d: Decimal) -> Self {
        let rounded = d.round_dp_with_strategy(CENTS_DP, RoundingStrategy::MidpointAwayFromZero);
        // never report a negative zero
        if rounded.is_zero() {
            Money::ZERO
        } else {
            Money(rounded)
        }
    }

    /// round to cents, half away from zero (1.005 -> 1.01, -1.005 -> -1.01)
    pub fn round_cents(&self) -> Self {
        Money::from_decimal_cents(self.0)
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// check if strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// calculate percentage (e.g., 5% of $100)
    pub fn percentage(&self, percent: Decimal) -> Result<Self> {
        let scaled = self
            .0
            .checked_mul(percent)
            .ok_or_else(|| LoanError::CalculationError {
                message: format!("{}% of {} overflows", percent, self),
            })?;
        Ok(Money((scaled / Decimal::from(100)).round_dp(MONEY_DP)))
    }

    /// addition that reports overflow instead of panicking
    pub fn checked_add(self, other: Money) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(|sum| Money(sum.round_dp(MONEY_DP)))
            .ok_or_else(|| LoanError::CalculationError {
                message: format!("{} + {} overflows", self, other),
            })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(MONEY_DP))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(MONEY_DP);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(MONEY_DP))
    }
}

/// rate type for interest rates, stored as a fraction (0.10 for 10%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from a whole percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from any percentage, signed or fractional (e.g., 15.5 for 15.5%)
    pub fn from_percent(p: impl Into<Decimal>) -> Self {
        Rate(p.into() / Decimal::from(100))
    }

    /// create from basis points (e.g., 500 for 5%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::from(100)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// monthly rate from annual rate
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(12))
    }

    /// per-period rate from annual rate
    pub fn periodic_rate(&self, periods_per_year: u32) -> Result<Rate> {
        if periods_per_year == 0 {
            return Err(LoanError::InvalidPaymentFrequency { periods_per_year });
        }
        Ok(Rate(self.0 / Decimal::from(periods_per_year)))
    }

    /// present value of one unit due after `periods` periods, (1 + r)^-n
    ///
    /// Square-and-multiply on the one-period discount 1 / (1 + r); for a
    /// positive rate every intermediate power stays within (0, 1].
    pub fn discount_factor(&self, periods: u32) -> Result<Decimal> {
        let overflow = || LoanError::CalculationError {
            message: format!("discount factor overflow at rate {}", self),
        };

        let base = Decimal::ONE.checked_add(self.0).ok_or_else(overflow)?;
        let mut power = Decimal::ONE
            .checked_div(base)
            .ok_or_else(|| LoanError::CalculationError {
                message: format!("cannot discount at rate {}", self),
            })?;

        let mut factor = Decimal::ONE;
        let mut exponent = periods;
        while exponent > 0 {
            if exponent & 1 == 1 {
                factor = factor.checked_mul(power).ok_or_else(overflow)?;
            }
            exponent >>= 1;
            if exponent > 0 {
                power = power.checked_mul(power).ok_or_else(overflow)?;
            }
        }
        Ok(factor)
    }

    /// annuity denominator 1 - (1 + r)^-n
    pub fn annuity_factor(&self, periods: u32) -> Result<Decimal> {
        let factor = Decimal::ONE - self.discount_factor(periods)?;
        if factor.is_zero() {
            return Err(LoanError::CalculationError {
                message: format!("rate {} too small to amortize over {} periods", self, periods),
            });
        }
        Ok(factor)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(1.005)).round_cents(), Money::from_decimal(dec!(1.01)));
        assert_eq!(Money::from_decimal(dec!(0.025)).round_cents(), Money::from_decimal(dec!(0.03)));
        assert_eq!(Money::from_decimal(dec!(-1.005)).round_cents(), Money::from_decimal(dec!(-1.01)));
        assert_eq!(Money::from_decimal(dec!(13.2150737)).round_cents().to_string(), "13.22");
    }

    #[test]
    fn test_cents_skip_working_precision() {
        // rounding to 8 places first would lift this to 1.005 and then 1.01
        let d = dec!(1.004999999999);
        assert_eq!(Money::from_decimal_cents(d).to_string(), "1.00");
        assert_eq!(Money::from_decimal(d).round_cents().to_string(), "1.01");
    }

    #[test]
    fn test_round_cents_has_no_negative_zero() {
        let residue = Money::from_decimal(dec!(-0.00000001));
        let rounded = residue.round_cents();
        assert!(rounded.is_zero());
        assert!(!rounded.is_negative());
        assert_eq!(rounded.to_string(), "0");
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(Money::from_minor(1, 2), Money::CENT);
        assert_eq!(Money::from_minor(123_456, 2), Money::from_decimal(dec!(1234.56)));
    }

    #[test]
    fn test_origination_fee_percentage() {
        let amount = Money::from_major(10_000);
        assert_eq!(amount.percentage(dec!(1.5)).unwrap(), Money::from_major(150));
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = Money::from_str_exact("79000000000000000000000000000").unwrap();

        assert!(matches!(huge.percentage(dec!(200)), Err(LoanError::CalculationError { .. })));
        assert!(matches!(
            huge.checked_add(Money::from_str_exact("1000000000000000000000000000").unwrap()),
            Err(LoanError::CalculationError { .. })
        ));
        assert_eq!(
            Money::from_major(900).checked_add(Money::from_major(100)).unwrap(),
            Money::from_major(1_000)
        );
    }

    #[test]
    fn test_rate_constructors() {
        assert_eq!(Rate::from_percentage(10), Rate::from_decimal(dec!(0.10)));
        assert_eq!(Rate::from_percent(dec!(15.5)), Rate::from_decimal(dec!(0.155)));
        assert_eq!(Rate::from_bps(500), Rate::from_percentage(5));
        assert!(Rate::from_percent(-1).is_negative());
        assert!(!Rate::ZERO.is_positive());
    }

    #[test]
    fn test_periodic_rate() {
        let annual = Rate::from_percentage(12);
        assert_eq!(annual.periodic_rate(12).unwrap(), annual.monthly_rate());
        assert_eq!(annual.periodic_rate(4).unwrap(), Rate::from_percentage(3));
        assert_eq!(
            annual.periodic_rate(0),
            Err(LoanError::InvalidPaymentFrequency { periods_per_year: 0 })
        );
    }

    #[test]
    fn test_discount_factor() {
        let rate = Rate::from_percentage(10);
        assert_eq!(rate.discount_factor(0).unwrap(), Decimal::ONE);

        // 1 / 1.1^2 = 0.826446...
        let two = rate.discount_factor(2).unwrap();
        assert!((two - dec!(0.82644628)).abs() < dec!(0.00000001));

        // a long horizon shrinks towards zero instead of growing
        let far = rate.discount_factor(360).unwrap();
        assert!(far > Decimal::ZERO);
        assert!(far < dec!(0.0000000001));
    }

    #[test]
    fn test_discount_factor_matches_repeated_discounting() {
        let rate = Rate::from_percentage(10).monthly_rate();
        let step = Decimal::ONE / (Decimal::ONE + rate.as_decimal());

        let mut expected = Decimal::ONE;
        for periods in 0..=120u32 {
            let factor = rate.discount_factor(periods).unwrap();
            assert!((factor - expected).abs() < dec!(0.0000000000000000001), "{} periods", periods);
            expected *= step;
        }
    }

    #[test]
    fn test_discount_factor_long_term() {
        // exponent bits are consumed one at a time
        let factor = Rate::from_percentage(1).discount_factor(u32::MAX).unwrap();
        assert!(factor.is_zero());
    }

    #[test]
    fn test_annuity_factor() {
        // 1 - 1/1.1 = 0.090909...
        let one = Rate::from_percentage(10).annuity_factor(1).unwrap();
        assert!((one - dec!(0.09090909)).abs() < dec!(0.00000001));
    }
}
