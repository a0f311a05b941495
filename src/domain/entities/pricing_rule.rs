//! # Pricing Rule Entity
//!
//! A tier of the monthly fee table: vehicles of one category whose FIPE value
//! falls within an inclusive range pay the tier's monthly fee.
//!
//! # Examples
//!
//! ```
//! use lead_desk::domain::entities::PricingRule;
//! use lead_desk::domain::value_objects::{Money, VehicleCategory};
//!
//! let rule = PricingRule::new(
//!     VehicleCategory::Standard,
//!     Money::new(0.0).unwrap(),
//!     Money::new(30_000.0).unwrap(),
//!     Money::new(120.0).unwrap(),
//! )
//! .unwrap();
//!
//! assert!(rule.contains(Money::new(30_000.0).unwrap()));
//! assert!(!rule.contains(Money::new(30_000.01).unwrap()));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Money, PricingRuleId, VehicleCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tiered pricing rule.
///
/// # Invariants
///
/// - `min_value <= max_value`
/// - Fees are non-negative (guaranteed by [`Money`])
///
/// Deserialization goes through [`PricingRule::with_id`], so stored rules
/// with an inverted range are rejected on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PricingRuleRecord")]
pub struct PricingRule {
    id: PricingRuleId,
    category: VehicleCategory,
    min_value: Money,
    max_value: Money,
    monthly_fee: Money,
    participation_quota: Option<Money>,
    active: bool,
}

impl PricingRule {
    /// Creates an active rule without participation quota.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPricingRule` if `min_value > max_value`.
    pub fn new(
        category: VehicleCategory,
        min_value: Money,
        max_value: Money,
        monthly_fee: Money,
    ) -> DomainResult<Self> {
        Self::with_id(
            PricingRuleId::new_v4(),
            category,
            min_value,
            max_value,
            monthly_fee,
        )
    }

    /// Creates an active rule with a given ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPricingRule` if `min_value > max_value`.
    pub fn with_id(
        id: PricingRuleId,
        category: VehicleCategory,
        min_value: Money,
        max_value: Money,
        monthly_fee: Money,
    ) -> DomainResult<Self> {
        if min_value > max_value {
            return Err(DomainError::invalid_pricing_rule(format!(
                "min value {} exceeds max value {}",
                min_value, max_value
            )));
        }
        Ok(Self {
            id,
            category,
            min_value,
            max_value,
            monthly_fee,
            participation_quota: None,
            active: true,
        })
    }

    /// Sets the flat participation quota.
    #[must_use]
    pub fn with_participation_quota(mut self, quota: Money) -> Self {
        self.participation_quota = Some(quota);
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the rule ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> PricingRuleId {
        self.id
    }

    /// Returns the vehicle category.
    #[inline]
    #[must_use]
    pub fn category(&self) -> VehicleCategory {
        self.category
    }

    /// Returns the inclusive lower bound.
    #[inline]
    #[must_use]
    pub fn min_value(&self) -> Money {
        self.min_value
    }

    /// Returns the inclusive upper bound.
    #[inline]
    #[must_use]
    pub fn max_value(&self) -> Money {
        self.max_value
    }

    /// Returns the monthly fee.
    #[inline]
    #[must_use]
    pub fn monthly_fee(&self) -> Money {
        self.monthly_fee
    }

    /// Returns the participation quota, if the tier has one.
    #[inline]
    #[must_use]
    pub fn participation_quota(&self) -> Option<Money> {
        self.participation_quota
    }

    /// Returns true if the rule is active.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deactivates the rule.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Returns true if `value` lies within `[min_value, max_value]`.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: Money) -> bool {
        self.min_value <= value && value <= self.max_value
    }

    /// Returns true if this rule's range shares at least one value with
    /// `other`'s range. Category and active flag are not considered.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_value <= other.max_value && other.min_value <= self.max_value
    }
}

/// Wire shape of a [`PricingRule`], validated before it becomes one.
#[derive(Deserialize)]
struct PricingRuleRecord {
    id: PricingRuleId,
    category: VehicleCategory,
    min_value: Money,
    max_value: Money,
    monthly_fee: Money,
    participation_quota: Option<Money>,
    active: bool,
}

impl TryFrom<PricingRuleRecord> for PricingRule {
    type Error = DomainError;

    fn try_from(record: PricingRuleRecord) -> DomainResult<Self> {
        let rule = Self::with_id(
            record.id,
            record.category,
            record.min_value,
            record.max_value,
            record.monthly_fee,
        )?
        .with_active(record.active);
        Ok(match record.participation_quota {
            Some(quota) => rule.with_participation_quota(quota),
            None => rule,
        })
    }
}

impl fmt::Display for PricingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}..={} -> {}",
            self.category, self.min_value, self.max_value, self.monthly_fee
        )
    }
}
