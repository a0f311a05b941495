//! # Pricing Catalog
//!
//! Maintains the tiered pricing table and prices incoming quotes against it.
//!
//! New rules are checked against the active rules of their category before
//! they are stored, so the resolver never sees two tiers covering the same
//! vehicle value.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{PricingRule, QuotationPricing};
use crate::domain::services::{PricingResolver, validate_rules};
use crate::domain::value_objects::{Money, PricingRuleId, VehicleCategory};
use crate::infrastructure::persistence::PricingRuleRepository;
use std::fmt;
use std::sync::Arc;

/// Pricing table backed by a [`PricingRuleRepository`].
#[derive(Clone)]
pub struct PricingCatalog {
    rules: Arc<dyn PricingRuleRepository>,
    resolver: PricingResolver,
}

impl PricingCatalog {
    /// Creates a catalog over `rules` priced with `resolver`.
    #[must_use]
    pub fn new(rules: Arc<dyn PricingRuleRepository>, resolver: PricingResolver) -> Self {
        Self { rules, resolver }
    }

    /// Replaces the resolver, keeping the rule store.
    #[must_use]
    pub fn with_resolver(mut self, resolver: PricingResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Returns the resolver used for fee derivation.
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> PricingResolver {
        self.resolver
    }

    /// Adds a rule after checking it against the active table.
    ///
    /// # Errors
    ///
    /// - `DomainError::OverlappingPricingRules` if an active rule of the same
    ///   category covers part of the new range
    /// - `RepositoryError` if storage fails
    pub async fn add_rule(&self, rule: PricingRule) -> ApplicationResult<()> {
        if rule.is_active() {
            let mut table = self.rules.find_active(rule.category()).await?;
            table.push(rule.clone());
            validate_rules(&table)?;
        }
        self.rules.save(&rule).await?;
        tracing::info!(rule_id = %rule.id(), %rule, "pricing rule added");
        Ok(())
    }

    /// Deactivates a rule so it no longer prices quotes.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the rule does not exist.
    pub async fn deactivate_rule(&self, id: &PricingRuleId) -> ApplicationResult<()> {
        if !self.rules.deactivate(id).await? {
            return Err(ApplicationError::not_found("PricingRule", id.to_string()));
        }
        tracing::info!(rule_id = %id, "pricing rule deactivated");
        Ok(())
    }

    /// Prices a vehicle, or returns `Ok(None)` when no active tier covers it.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be loaded or fee arithmetic
    /// overflows.
    pub async fn price(
        &self,
        category: VehicleCategory,
        fipe_value: Money,
    ) -> ApplicationResult<Option<QuotationPricing>> {
        let table = self.rules.find_active(category).await?;
        Ok(self.resolver.resolve(&table, category, fipe_value)?)
    }
}

impl fmt::Debug for PricingCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingCatalog")
            .field("discount", &self.resolver.discount())
            .finish_non_exhaustive()
    }
}
