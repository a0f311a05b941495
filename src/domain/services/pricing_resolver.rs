//! # Pricing Resolver
//!
//! Finds the tier that prices a vehicle and derives the quotation fees.
//!
//! ```text
//! enrollment            = monthly × 2
//! discounted enrollment = enrollment × (1 − discount / 100)
//! ```
//!
//! All amounts are cent-rounded decimals; nothing goes through `f64`.
//!
//! # Examples
//!
//! ```
//! use lead_desk::domain::services::pricing_resolver::calculate_fields;
//! use lead_desk::domain::value_objects::{DiscountRate, Money};
//!
//! let fields = calculate_fields(Money::new(201.67).unwrap(), None, DiscountRate::default()).unwrap();
//! assert_eq!(fields.enrollment_fee.to_string(), "403.34");
//! assert_eq!(fields.discounted_enrollment_fee.to_string(), "322.67");
//! ```

use crate::domain::entities::{PricingRule, QuotationPricing};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{DiscountRate, Money, VehicleCategory};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Enrollment fee is this many monthly fees.
pub const ENROLLMENT_MULTIPLIER: Decimal = Decimal::TWO;

/// Finds the active rule of `category` whose range contains `value`.
///
/// Returns `None` when the value is outside every range; callers treat that
/// as "not priceable", never as the nearest tier. If overlapping active rules
/// slipped past [`validate_rules`], the one with the lowest lower bound wins.
#[must_use]
pub fn find_rule(
    rules: &[PricingRule],
    category: VehicleCategory,
    value: Money,
) -> Option<&PricingRule> {
    rules
        .iter()
        .filter(|r| r.is_active() && r.category() == category && r.contains(value))
        .min_by(|a, b| {
            a.min_value()
                .cmp(&b.min_value())
                .then_with(|| a.id().cmp(&b.id()))
        })
}

/// Derives the quotation fees from a monthly fee.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn calculate_fields(
    monthly_fee: Money,
    participation_quota: Option<Money>,
    discount: DiscountRate,
) -> DomainResult<QuotationPricing> {
    let enrollment_fee = monthly_fee.safe_mul(ENROLLMENT_MULTIPLIER)?;
    let discounted_enrollment_fee = enrollment_fee.safe_mul(discount.multiplier()?)?;

    Ok(QuotationPricing {
        monthly_fee,
        enrollment_fee,
        discounted_enrollment_fee,
        participation_quota,
    })
}

/// Checks every rule's range and that no two active rules of the same
/// category overlap.
///
/// Meant for rule-authoring time; lookups do not call it.
///
/// # Errors
///
/// - `DomainError::InvalidPricingRule` if a rule's lower bound exceeds its
///   upper bound
/// - `DomainError::OverlappingPricingRules` naming the first overlapping
///   pair found
pub fn validate_rules(rules: &[PricingRule]) -> DomainResult<()> {
    if let Some(inverted) = rules.iter().find(|r| r.min_value() > r.max_value()) {
        return Err(DomainError::invalid_pricing_rule(format!(
            "min value {} exceeds max value {}",
            inverted.min_value(),
            inverted.max_value()
        )));
    }

    let mut by_category: BTreeMap<VehicleCategory, Vec<&PricingRule>> = BTreeMap::new();
    for rule in rules.iter().filter(|r| r.is_active()) {
        by_category.entry(rule.category()).or_default().push(rule);
    }

    for (category, mut tiers) in by_category {
        tiers.sort_by_key(|r| (r.min_value(), r.max_value()));
        for pair in tiers.windows(2) {
            if let [first, second] = pair
                && first.overlaps(second)
            {
                return Err(DomainError::OverlappingPricingRules {
                    category,
                    first: format!("{}..={}", first.min_value(), first.max_value()),
                    second: format!("{}..={}", second.min_value(), second.max_value()),
                });
            }
        }
    }
    Ok(())
}

/// Pricing resolver bound to a discount configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingResolver {
    discount: DiscountRate,
}

impl PricingResolver {
    /// Creates a resolver with the given enrollment discount.
    #[must_use]
    pub fn new(discount: DiscountRate) -> Self {
        Self { discount }
    }

    /// Returns the configured discount.
    #[inline]
    #[must_use]
    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    /// Prices a vehicle, or returns `Ok(None)` when no rule matches.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn resolve(
        &self,
        rules: &[PricingRule],
        category: VehicleCategory,
        value: Money,
    ) -> DomainResult<Option<QuotationPricing>> {
        let Some(rule) = find_rule(rules, category, value) else {
            tracing::debug!(%category, %value, "no pricing rule matches");
            return Ok(None);
        };
        calculate_fields(rule.monthly_fee(), rule.participation_quota(), self.discount).map(Some)
    }

    /// Same as [`PricingResolver::resolve`] but rejects unpriceable values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if no rule matches.
    pub fn resolve_strict(
        &self,
        rules: &[PricingRule],
        category: VehicleCategory,
        value: Money,
    ) -> DomainResult<QuotationPricing> {
        self.resolve(rules, category, value)?.ok_or_else(|| {
            DomainError::invalid_value(format!(
                "vehicle value {} out of priceable range for {}",
                value, category
            ))
        })
    }
}
