//! Money amounts in minor currency units.

use std::fmt;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors converting between major-unit decimals and [`Amount`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The decimal value was negative.
    #[error("amount cannot be negative")]
    Negative,

    /// The decimal value carried sub-minor-unit precision.
    #[error("amount has more than two decimal places")]
    PrecisionLoss,

    /// The value does not fit in a minor-unit integer.
    #[error("amount out of range")]
    OutOfRange,
}

/// A money amount in minor currency units (satang/cents).
///
/// Stored and computed as an integer so cart totals and provider
/// charge amounts never drift through float rounding. Displays as
/// major units with two decimal places ("95.00").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Converts a major-unit decimal (e.g. `95.00`) into an amount.
    ///
    /// # Errors
    ///
    /// Fails on negative values, more than two decimal places, or
    /// values outside the `u64` minor-unit range.
    pub fn from_major(major: Decimal) -> Result<Self, AmountError> {
        if major.is_sign_negative() && !major.is_zero() {
            return Err(AmountError::Negative);
        }

        let minor = major
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(AmountError::OutOfRange)?;

        if minor.fract() != Decimal::ZERO {
            return Err(AmountError::PrecisionLoss);
        }

        minor
            .trunc()
            .to_u64()
            .map(Self)
            .ok_or(AmountError::OutOfRange)
    }

    /// Returns the amount as a major-unit decimal with two places.
    #[must_use]
    pub fn to_major(self) -> Decimal {
        // u64 always fits the 96-bit decimal mantissa.
        Decimal::from_i128_with_scale(i128::from(self.0), 2)
    }

    /// Checked addition in minor units.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction in minor units.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Checked multiplication by a line quantity.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(u64::from(quantity)).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_major(), f)
    }
}

impl From<u64> for Amount {
    fn from(minor: u64) -> Self {
        Self(minor)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn displays_as_major_units_with_two_places() {
        assert_eq!(Amount::from_minor(9500).to_string(), "95.00");
        assert_eq!(Amount::from_minor(5).to_string(), "0.05");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn round_trips_major_decimals() -> TestResult {
        let major: Decimal = "95.00".parse()?;

        assert_eq!(Amount::from_major(major)?, Amount::from_minor(9500));
        assert_eq!(Amount::from_minor(9500).to_major(), major);

        Ok(())
    }

    #[test]
    fn rejects_sub_minor_precision() -> TestResult {
        let major: Decimal = "95.005".parse()?;

        assert_eq!(Amount::from_major(major), Err(AmountError::PrecisionLoss));

        Ok(())
    }

    #[test]
    fn rejects_negative_amounts() -> TestResult {
        let major: Decimal = "-1.00".parse()?;

        assert_eq!(Amount::from_major(major), Err(AmountError::Negative));

        Ok(())
    }

    #[test]
    fn checked_mul_catches_overflow() {
        assert_eq!(Amount::from_minor(u64::MAX).checked_mul(2), None);
        assert_eq!(
            Amount::from_minor(100).checked_mul(3),
            Some(Amount::from_minor(300))
        );
    }
}
