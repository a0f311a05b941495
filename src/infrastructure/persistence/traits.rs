//! # Repository Traits
//!
//! Port definitions for the stores the decision core reads from and the
//! application layer writes back to.
//!
//! # Available Repositories
//!
//! - [`SellerRepository`]: Seller roster and distribution queue
//! - [`PricingRuleRepository`]: Tiered pricing table
//! - [`QuotationRepository`]: Submitted quotations
//!
//! # Examples
//!
//! ```ignore
//! use lead_desk::infrastructure::persistence::traits::SellerRepository;
//!
//! async fn roster_size(repo: &impl SellerRepository) {
//!     let sellers = repo.get_all().await.unwrap();
//!     println!("{} sellers in roster", sellers.len());
//! }
//! ```

use crate::domain::entities::{PricingRule, Quotation, Seller};
use crate::domain::services::SellerQueue;
use crate::domain::value_objects::{
    PricingRuleId, QuotationId, SellerId, Timestamp, VehicleCategory,
};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for the seller roster.
#[async_trait]
pub trait SellerRepository: Send + Sync + fmt::Debug {
    /// Saves a seller, replacing any existing record with the same ID.
    async fn save(&self, seller: &Seller) -> RepositoryResult<()>;

    /// Gets a seller by ID.
    async fn get(&self, id: &SellerId) -> RepositoryResult<Option<Seller>>;

    /// Returns the whole roster.
    async fn get_all(&self) -> RepositoryResult<Vec<Seller>>;

    /// Writes back a selection: increments the assignment count and advances
    /// the last assignment time of one seller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the seller does not exist.
    async fn record_assignment(&self, id: &SellerId, at: Timestamp) -> RepositoryResult<Seller>;

    /// Persists the distribution queue and the sellers' queue positions.
    async fn save_queue(&self, queue: &SellerQueue) -> RepositoryResult<()>;

    /// Loads the persisted distribution queue, if one was saved.
    async fn get_queue(&self) -> RepositoryResult<Option<SellerQueue>>;

    /// Returns the roster size.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Repository for pricing rules.
#[async_trait]
pub trait PricingRuleRepository: Send + Sync + fmt::Debug {
    /// Saves a rule, replacing any existing rule with the same ID.
    async fn save(&self, rule: &PricingRule) -> RepositoryResult<()>;

    /// Gets a rule by ID.
    async fn get(&self, id: &PricingRuleId) -> RepositoryResult<Option<PricingRule>>;

    /// Returns the active rules of one category.
    async fn find_active(&self, category: VehicleCategory) -> RepositoryResult<Vec<PricingRule>>;

    /// Returns every rule, active or not.
    async fn get_all(&self) -> RepositoryResult<Vec<PricingRule>>;

    /// Deactivates a rule. Returns false if it does not exist.
    async fn deactivate(&self, id: &PricingRuleId) -> RepositoryResult<bool>;
}

/// Repository for quotations.
#[async_trait]
pub trait QuotationRepository: Send + Sync + fmt::Debug {
    /// Saves a new quotation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the ID already exists.
    async fn save(&self, quotation: &Quotation) -> RepositoryResult<()>;

    /// Gets a quotation by ID.
    async fn get(&self, id: &QuotationId) -> RepositoryResult<Option<Quotation>>;

    /// Returns the quotations owned by a seller.
    async fn find_by_seller(&self, seller_id: &SellerId) -> RepositoryResult<Vec<Quotation>>;

    /// Returns quotations saved without pricing.
    async fn find_unpriced(&self) -> RepositoryResult<Vec<Quotation>>;

    /// Returns the number of quotations.
    async fn count(&self) -> RepositoryResult<u64>;
}
