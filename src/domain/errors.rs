//! # Domain Errors
//!
//! Business rule violations raised by entities and domain services.
//!
//! "No eligible seller" and "no matching pricing rule" are expected
//! business outcomes and are returned as `None`, never as errors.

use crate::domain::value_objects::{ArithmeticError, SellerId, VehicleCategory};
use thiserror::Error;

/// Domain layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Pricing rule data is malformed (min > max, negative fee, overlap).
    #[error("invalid pricing rule: {0}")]
    InvalidPricingRule(String),

    /// Two active rules of the same category cover the same value.
    #[error("overlapping pricing rules for {category}: [{first}] and [{second}]")]
    OverlappingPricingRules {
        /// Category where the overlap occurs.
        category: VehicleCategory,
        /// First rule range, formatted.
        first: String,
        /// Second rule range, formatted.
        second: String,
    },

    /// A manual queue order is not a permutation of the queued sellers.
    #[error("invalid queue order: {0}")]
    InvalidQueueOrder(String),

    /// Seller is not part of the roster or queue.
    #[error("unknown seller: {0}")]
    UnknownSeller(SellerId),

    /// Invalid input value.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Arithmetic failure.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid pricing rule error.
    #[must_use]
    pub fn invalid_pricing_rule(msg: impl Into<String>) -> Self {
        Self::InvalidPricingRule(msg.into())
    }

    /// Creates an invalid queue order error.
    #[must_use]
    pub fn invalid_queue_order(msg: impl Into<String>) -> Self {
        Self::InvalidQueueOrder(msg.into())
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
