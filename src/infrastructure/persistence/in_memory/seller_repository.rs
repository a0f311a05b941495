//! # In-Memory Seller Repository
//!
//! In-memory implementation of [`SellerRepository`] for testing.
//!
//! This implementation uses a thread-safe `HashMap` for storage,
//! making it suitable for unit tests without database dependencies.

use crate::domain::entities::Seller;
use crate::domain::services::SellerQueue;
use crate::domain::value_objects::{SellerId, Timestamp};
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, SellerRepository,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`SellerRepository`].
#[derive(Debug, Clone)]
pub struct InMemorySellerRepository {
    storage: Arc<RwLock<HashMap<SellerId, Seller>>>,
    queue: Arc<RwLock<Option<SellerQueue>>>,
}

impl InMemorySellerRepository {
    /// Creates a new empty in-memory seller repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            queue: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the number of sellers in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySellerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SellerRepository for InMemorySellerRepository {
    async fn save(&self, seller: &Seller) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(seller.id().clone(), seller.clone());
        Ok(())
    }

    async fn get(&self, id: &SellerId) -> RepositoryResult<Option<Seller>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Seller>> {
        let storage = self.storage.read().await;
        let mut sellers: Vec<Seller> = storage.values().cloned().collect();
        sellers.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(sellers)
    }

    async fn record_assignment(&self, id: &SellerId, at: Timestamp) -> RepositoryResult<Seller> {
        let mut storage = self.storage.write().await;
        let seller = storage
            .get_mut(id)
            .ok_or_else(|| RepositoryError::not_found("Seller", id.as_str()))?;
        seller
            .record_assignment(at)
            .map_err(|e| RepositoryError::internal(e.to_string()))?;
        Ok(seller.clone())
    }

    async fn save_queue(&self, queue: &SellerQueue) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        for (id, position) in queue.positions() {
            if let Some(seller) = storage.get_mut(&id) {
                seller.set_queue_position(position);
            }
        }
        drop(storage);

        let mut stored = self.queue.write().await;
        *stored = Some(queue.clone());
        Ok(())
    }

    async fn get_queue(&self) -> RepositoryResult<Option<SellerQueue>> {
        let stored = self.queue.read().await;
        Ok(stored.clone())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seller(id: &str) -> Seller {
        Seller::new(
            SellerId::new(id),
            id.to_uppercase(),
            Timestamp::from_secs(1_700_000_000).unwrap(),
        )
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemorySellerRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.get_queue().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_and_get() {
        let repo = InMemorySellerRepository::new();
        repo.save(&seller("s-1")).await.unwrap();

        let retrieved = repo.get(&SellerId::new("s-1")).await.unwrap();
        assert_eq!(retrieved.unwrap().name(), "S-1");
        assert!(repo.get(&SellerId::new("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_all_is_sorted_by_id() {
        let repo = InMemorySellerRepository::new();
        repo.save(&seller("b")).await.unwrap();
        repo.save(&seller("a")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn record_assignment_updates_history() {
        let repo = InMemorySellerRepository::new();
        repo.save(&seller("s-1")).await.unwrap();
        let at = Timestamp::from_secs(1_700_000_500).unwrap();

        let updated = repo
            .record_assignment(&SellerId::new("s-1"), at)
            .await
            .unwrap();

        assert_eq!(updated.assignment_count(), 1);
        assert_eq!(updated.last_assignment_at(), Some(at));
        let stored = repo.get(&SellerId::new("s-1")).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn record_assignment_unknown_seller() {
        let repo = InMemorySellerRepository::new();
        let err = repo
            .record_assignment(&SellerId::new("ghost"), Timestamp::now())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn save_queue_writes_positions() {
        let repo = InMemorySellerRepository::new();
        repo.save(&seller("a")).await.unwrap();
        repo.save(&seller("b")).await.unwrap();

        let queue = SellerQueue::new(vec![SellerId::new("b"), SellerId::new("a")]).unwrap();
        repo.save_queue(&queue).await.unwrap();

        assert_eq!(repo.get_queue().await.unwrap(), Some(queue));
        let a = repo.get(&SellerId::new("a")).await.unwrap().unwrap();
        assert_eq!(a.queue_position(), 1);
    }
}
