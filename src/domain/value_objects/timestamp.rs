//! # Timestamp Value Object
//!
//! UTC point in time used for seller creation and assignment history.
//!
//! # Examples
//!
//! ```
//! use lead_desk::domain::value_objects::timestamp::Timestamp;
//!
//! let created = Timestamp::from_secs(1_704_067_200).unwrap();
//! let assigned = created.add_secs(60).unwrap();
//!
//! assert!(assigned.is_after(&created));
//! ```

use crate::domain::value_objects::arithmetic::{ArithmeticError, ArithmeticResult};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>`. Ordering is chronological, which the
/// seller selector relies on for its recency key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Returns `None` if the value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use lead_desk::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_millis(1704067200000).unwrap();
    /// assert_eq!(ts.timestamp_millis(), 1704067200000);
    /// ```
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the Unix timestamp in milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Adds seconds to the timestamp (negative values subtract).
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result is outside the
    /// representable range.
    pub fn add_secs(&self, secs: i64) -> ArithmeticResult<Self> {
        self.shift(Duration::try_seconds(secs))
    }

    /// Adds milliseconds to the timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result is outside the
    /// representable range.
    pub fn add_millis(&self, millis: i64) -> ArithmeticResult<Self> {
        self.shift(Duration::try_milliseconds(millis))
    }

    /// Subtracts seconds from the timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result is outside the
    /// representable range.
    pub fn sub_secs(&self, secs: i64) -> ArithmeticResult<Self> {
        Duration::try_seconds(secs)
            .and_then(|d| self.0.checked_sub_signed(d))
            .map(Self)
            .ok_or(ArithmeticError::Underflow)
    }

    fn shift(&self, delta: Option<Duration>) -> ArithmeticResult<Self> {
        delta
            .and_then(|d| self.0.checked_add_signed(d))
            .map(Self)
            .ok_or(ArithmeticError::Overflow)
    }

    /// Returns true if this timestamp is before another.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Returns true if this timestamp is after another.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Formats the timestamp as RFC 3339.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Returns the underlying DateTime.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
