//! # In-Memory Quotation Repository
//!
//! In-memory implementation of [`QuotationRepository`] for testing.

use crate::domain::entities::{Quotation, QuotationStatus};
use crate::domain::value_objects::{QuotationId, SellerId};
use crate::infrastructure::persistence::traits::{
    QuotationRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`QuotationRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryQuotationRepository {
    storage: Arc<RwLock<HashMap<QuotationId, Quotation>>>,
}

impl InMemoryQuotationRepository {
    /// Creates a new empty in-memory quotation repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryQuotationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuotationRepository for InMemoryQuotationRepository {
    async fn save(&self, quotation: &Quotation) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        if storage.contains_key(&quotation.id()) {
            return Err(RepositoryError::duplicate(
                "Quotation",
                quotation.id().to_string(),
            ));
        }
        storage.insert(quotation.id(), quotation.clone());
        Ok(())
    }

    async fn get(&self, id: &QuotationId) -> RepositoryResult<Option<Quotation>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_by_seller(&self, seller_id: &SellerId) -> RepositoryResult<Vec<Quotation>> {
        let storage = self.storage.read().await;
        let mut owned: Vec<Quotation> = storage
            .values()
            .filter(|q| q.seller_id() == Some(seller_id))
            .cloned()
            .collect();
        owned.sort_by_key(Quotation::created_at);
        Ok(owned)
    }

    async fn find_unpriced(&self) -> RepositoryResult<Vec<Quotation>> {
        let storage = self.storage.read().await;
        let mut unpriced: Vec<Quotation> = storage
            .values()
            .filter(|q| q.status() == QuotationStatus::Unpriced)
            .cloned()
            .collect();
        unpriced.sort_by_key(Quotation::created_at);
        Ok(unpriced)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}
