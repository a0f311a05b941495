//! # In-Memory Pricing Rule Repository
//!
//! In-memory implementation of [`PricingRuleRepository`] for testing.

use crate::domain::entities::PricingRule;
use crate::domain::value_objects::{PricingRuleId, VehicleCategory};
use crate::infrastructure::persistence::traits::{PricingRuleRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`PricingRuleRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryPricingRuleRepository {
    storage: Arc<RwLock<HashMap<PricingRuleId, PricingRule>>>,
}

impl InMemoryPricingRuleRepository {
    /// Creates a new empty in-memory pricing rule repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a repository seeded with `rules`.
    #[must_use]
    pub fn with_rules(rules: impl IntoIterator<Item = PricingRule>) -> Self {
        let storage = rules.into_iter().map(|r| (r.id(), r)).collect();
        Self {
            storage: Arc::new(RwLock::new(storage)),
        }
    }
}

impl Default for InMemoryPricingRuleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PricingRuleRepository for InMemoryPricingRuleRepository {
    async fn save(&self, rule: &PricingRule) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(rule.id(), rule.clone());
        Ok(())
    }

    async fn get(&self, id: &PricingRuleId) -> RepositoryResult<Option<PricingRule>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_active(&self, category: VehicleCategory) -> RepositoryResult<Vec<PricingRule>> {
        let storage = self.storage.read().await;
        let mut rules: Vec<PricingRule> = storage
            .values()
            .filter(|r| r.is_active() && r.category() == category)
            .cloned()
            .collect();
        rules.sort_by_key(PricingRule::min_value);
        Ok(rules)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<PricingRule>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }

    async fn deactivate(&self, id: &PricingRuleId) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        match storage.get_mut(id) {
            Some(rule) => {
                rule.deactivate();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
