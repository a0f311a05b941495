//! # Discount Rate
//!
//! Percentage discount applied to the enrollment fee.

use crate::domain::value_objects::arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default enrollment discount: 20%.
pub const DEFAULT_DISCOUNT_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// A discount expressed as a percentage in `[0, 100]`.
///
/// # Examples
///
/// ```
/// use lead_desk::domain::value_objects::DiscountRate;
/// use rust_decimal::Decimal;
///
/// let rate = DiscountRate::default();
/// assert_eq!(rate.multiplier().unwrap(), Decimal::new(8, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    /// Creates a discount rate from a percentage.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the percentage is outside
    /// `[0, 100]`.
    pub fn from_pct(pct: Decimal) -> ArithmeticResult<Self> {
        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            return Err(ArithmeticError::InvalidValue(
                "discount percentage must be within 0..=100",
            ));
        }
        Ok(Self(pct))
    }

    /// No discount.
    #[must_use]
    pub const fn none() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the percentage.
    #[inline]
    #[must_use]
    pub fn pct(&self) -> Decimal {
        self.0
    }

    /// Returns the factor applied to the full price: `1 - pct / 100`.
    ///
    /// # Errors
    ///
    /// Returns an `ArithmeticError` on overflow.
    pub fn multiplier(&self) -> ArithmeticResult<Decimal> {
        Decimal::ONE.safe_sub(self.0.safe_div(Decimal::ONE_HUNDRED)?)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        Self(DEFAULT_DISCOUNT_PCT)
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<Decimal> for DiscountRate {
    type Error = ArithmeticError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_pct(value)
    }
}

impl From<DiscountRate> for Decimal {
    fn from(rate: DiscountRate) -> Self {
        rate.0
    }
}
