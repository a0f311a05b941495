//! # Money Value Object
//!
//! Non-negative currency amount stored as a fixed-point decimal with cent
//! precision.
//!
//! # Examples
//!
//! ```
//! use lead_desk::domain::value_objects::Money;
//!
//! let fee = Money::new(201.67).unwrap();
//! assert_eq!(fee.cents(), Ok(20167));
//! assert_eq!(fee.to_string(), "201.67");
//! ```

use crate::domain::value_objects::arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic, round_cents,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A currency amount in reais, always rounded to whole cents.
///
/// # Invariants
///
/// - Never negative
/// - At most two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates an amount from a float, rounding to cents.
    ///
    /// Intended for literals at the edges (tests, fixtures). Computation
    /// inside the crate never goes through `f64`.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the value is negative,
    /// NaN or infinite.
    pub fn new(value: f64) -> ArithmeticResult<Self> {
        let decimal =
            Decimal::from_f64(value).ok_or(ArithmeticError::InvalidValue("not a finite amount"))?;
        Self::from_decimal(decimal)
    }

    /// Creates an amount from a decimal, rounding to cents.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the value is negative.
    pub fn from_decimal(value: Decimal) -> ArithmeticResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ArithmeticError::InvalidValue("negative amount"));
        }
        Ok(Self(round_cents(value)))
    }

    /// Creates an amount from integer cents.
    #[must_use]
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from_i128_with_scale(i128::from(cents), 2))
    }

    /// Returns the amount in integer cents.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the amount does not fit in
    /// `u64` cents.
    pub fn cents(&self) -> ArithmeticResult<u64> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_u64())
            .ok_or(ArithmeticError::Overflow)
    }

    /// Returns the underlying decimal.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies by a decimal factor and rounds back to cents.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` on overflow and
    /// `ArithmeticError::InvalidValue` if the factor is negative.
    pub fn safe_mul(self, factor: Decimal) -> ArithmeticResult<Self> {
        Self::from_decimal(self.0.safe_mul(factor)?)
    }

    /// Adds another amount.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the sum overflows.
    pub fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        Ok(Self(self.0.safe_add(rhs.0)?))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ArithmeticError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|_| ArithmeticError::InvalidValue("unparseable amount"))?;
        Self::from_decimal(decimal)
    }
}
