//! # Seller Queue
//!
//! Persisted, manually reorderable distribution queue.
//!
//! When queue mode is enabled the queue is the single source of truth for
//! who is next: the head is the first queued seller that is eligible, and
//! every automatic assignment rotates the assigned seller to the tail.
//! Administrators can override the order at any time with
//! [`SellerQueue::reorder`] or [`SellerQueue::move_to`]; the next automatic
//! assignment resumes from the new arrangement.
//!
//! # Examples
//!
//! ```
//! use lead_desk::domain::entities::Seller;
//! use lead_desk::domain::services::seller_queue::SellerQueue;
//! use lead_desk::domain::services::seller_selector::SelectionPolicy;
//! use lead_desk::domain::value_objects::{SellerId, Timestamp};
//!
//! let t0 = Timestamp::from_secs(1_700_000_000).unwrap();
//! let sellers = vec![
//!     Seller::new(SellerId::new("a"), "Ana", t0),
//!     Seller::new(SellerId::new("b"), "Bia", t0.add_secs(1).unwrap()),
//! ];
//!
//! let mut queue = SellerQueue::from_roster(&sellers);
//! let policy = SelectionPolicy::default();
//! assert_eq!(queue.head(&sellers, &policy).unwrap().id().as_str(), "a");
//!
//! queue.rotate_to_tail(&SellerId::new("a")).unwrap();
//! assert_eq!(queue.head(&sellers, &policy).unwrap().id().as_str(), "b");
//! ```

use crate::domain::entities::Seller;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::seller_selector::{SelectionPolicy, compare_recency};
use crate::domain::value_objects::SellerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered distribution queue of seller IDs.
///
/// # Invariants
///
/// - No duplicate IDs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SellerQueue {
    order: Vec<SellerId>,
}

impl SellerQueue {
    /// Creates a queue from an explicit order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQueueOrder` if an ID appears twice.
    pub fn new(order: Vec<SellerId>) -> DomainResult<Self> {
        ensure_unique(&order)?;
        Ok(Self { order })
    }

    /// Seeds the queue from the natural round-robin order of the roster.
    #[must_use]
    pub fn from_roster(sellers: &[Seller]) -> Self {
        let mut sorted: Vec<&Seller> = sellers.iter().collect();
        sorted.sort_by(|a, b| compare_recency(a, b));
        Self {
            order: sorted.into_iter().map(|s| s.id().clone()).collect(),
        }
    }

    /// Rebuilds the queue from persisted [`Seller::queue_position`] values.
    ///
    /// Sellers sharing a position are ordered by recency.
    #[must_use]
    pub fn from_positions(sellers: &[Seller]) -> Self {
        let mut sorted: Vec<&Seller> = sellers.iter().collect();
        sorted.sort_by(|a, b| {
            a.queue_position()
                .cmp(&b.queue_position())
                .then_with(|| compare_recency(a, b))
        });
        Self {
            order: sorted.into_iter().map(|s| s.id().clone()).collect(),
        }
    }

    /// Returns the queued IDs, head first.
    #[inline]
    #[must_use]
    pub fn order(&self) -> &[SellerId] {
        &self.order
    }

    /// Returns the number of queued sellers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the queue is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if the seller is queued.
    #[must_use]
    pub fn contains(&self, id: &SellerId) -> bool {
        self.order.contains(id)
    }

    /// Returns the first queued seller eligible under `policy`.
    ///
    /// Queued IDs missing from `sellers` are skipped.
    #[must_use]
    pub fn head<'a>(&self, sellers: &'a [Seller], policy: &SelectionPolicy) -> Option<&'a Seller> {
        self.order.iter().find_map(|id| {
            sellers
                .iter()
                .find(|s| s.id() == id)
                .filter(|s| policy.is_eligible(s))
        })
    }

    /// Replaces the order with an administrative arrangement.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQueueOrder` unless `order` is a
    /// permutation of the current queue.
    pub fn reorder(&mut self, order: Vec<SellerId>) -> DomainResult<()> {
        ensure_unique(&order)?;
        if order.len() != self.order.len() || !order.iter().all(|id| self.order.contains(id)) {
            return Err(DomainError::invalid_queue_order(
                "new order must contain exactly the queued sellers",
            ));
        }
        self.order = order;
        Ok(())
    }

    /// Moves one seller to `position` (clamped to the tail).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSeller` if the seller is not queued.
    pub fn move_to(&mut self, id: &SellerId, position: usize) -> DomainResult<()> {
        let current = self.index_of(id)?;
        let seller = self.order.remove(current);
        let target = position.min(self.order.len());
        self.order.insert(target, seller);
        Ok(())
    }

    /// Moves an assigned seller to the tail.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSeller` if the seller is not queued.
    pub fn rotate_to_tail(&mut self, id: &SellerId) -> DomainResult<()> {
        let current = self.index_of(id)?;
        let seller = self.order.remove(current);
        self.order.push(seller);
        Ok(())
    }

    /// Reconciles the queue with the roster.
    ///
    /// Drops IDs no longer in the roster and appends new sellers at the tail
    /// in round-robin order.
    pub fn sync(&mut self, sellers: &[Seller]) {
        let roster: HashSet<&SellerId> = sellers.iter().map(Seller::id).collect();
        self.order.retain(|id| roster.contains(id));

        let mut missing: Vec<&Seller> = sellers
            .iter()
            .filter(|s| !self.order.contains(s.id()))
            .collect();
        missing.sort_by(|a, b| compare_recency(a, b));
        self.order
            .extend(missing.into_iter().map(|s| s.id().clone()));
    }

    /// Re-seeds the queue alphabetically by seller name.
    ///
    /// Only the queue changes; assignment history on the sellers is kept.
    pub fn reset_alphabetical(&mut self, sellers: &[Seller]) {
        let mut sorted: Vec<&Seller> = sellers.iter().collect();
        sorted.sort_by(|a, b| {
            a.name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.id().cmp(b.id()))
        });
        self.order = sorted.into_iter().map(|s| s.id().clone()).collect();
    }

    /// Returns `(seller, position)` pairs for writing back to the roster.
    #[must_use]
    pub fn positions(&self) -> Vec<(SellerId, u32)> {
        self.order
            .iter()
            .zip(0u32..)
            .map(|(id, pos)| (id.clone(), pos))
            .collect()
    }

    fn index_of(&self, id: &SellerId) -> DomainResult<usize> {
        self.order
            .iter()
            .position(|queued| queued == id)
            .ok_or_else(|| DomainError::UnknownSeller(id.clone()))
    }
}

fn ensure_unique(order: &[SellerId]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(order.len());
    for id in order {
        if !seen.insert(id) {
            return Err(DomainError::invalid_queue_order(format!(
                "seller {} appears more than once",
                id
            )));
        }
    }
    Ok(())
}
