//! Prices

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places kept on currency amounts.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Round an amount to whole minor units (cents), half away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Errors raised when constructing a [`TaxRate`].
#[derive(Debug, Error, PartialEq)]
pub enum TaxRateError {
    /// The rate could not be parsed as a decimal.
    #[error("invalid tax rate: {0}")]
    Parse(#[from] rust_decimal::Error),

    /// The rate is negative or not below 1 (100%).
    #[error("tax rate {0} must be a fraction in [0, 1)")]
    OutOfRange(Decimal),
}

/// Sales tax rate expressed as a fraction of the subtotal (`0.08` is 8%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// A zero tax rate.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a tax rate from a fraction.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRateError::OutOfRange`] if the rate is negative or >= 1.
    pub fn new(rate: Decimal) -> Result<Self, TaxRateError> {
        if rate.is_sign_negative() || rate >= Decimal::ONE {
            return Err(TaxRateError::OutOfRange(rate));
        }

        Ok(Self(rate))
    }

    /// The rate as a fraction.
    pub fn fraction(self) -> Decimal {
        self.0
    }

    /// Tax owed on `subtotal`, rounded to minor units.
    pub fn tax_on(self, subtotal: Decimal) -> Decimal {
        round_currency(subtotal.saturating_mul(self.0))
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = TaxRateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaxRate> for Decimal {
    fn from(value: TaxRate) -> Self {
        value.0
    }
}

impl FromStr for TaxRate {
    type Err = TaxRateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(Decimal::from_str(value.trim())?)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn tax_is_rounded_to_cents() -> TestResult {
        let rate: TaxRate = "0.0825".parse()?;

        assert_eq!(rate.tax_on(Decimal::new(1999, 2)), Decimal::new(165, 2));

        Ok(())
    }

    #[test]
    fn eight_percent_of_one_hundred() -> TestResult {
        let rate: TaxRate = "0.08".parse()?;

        assert_eq!(rate.tax_on(Decimal::new(10000, 2)), Decimal::new(800, 2));
        assert_eq!(rate.to_string(), "8%");

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_rates() {
        assert!(matches!(
            "-0.01".parse::<TaxRate>(),
            Err(TaxRateError::OutOfRange(_))
        ));
        assert!(matches!(
            "1".parse::<TaxRate>(),
            Err(TaxRateError::OutOfRange(_))
        ));
        assert!(matches!(
            "eight".parse::<TaxRate>(),
            Err(TaxRateError::Parse(_))
        ));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_currency(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_currency(Decimal::new(1004, 3)), Decimal::new(100, 2));
    }
}
