//! # Persistence Layer
//!
//! Repository ports and their in-memory adapters.
//!
//! ## Repository Traits (Ports)
//!
//! - [`SellerRepository`]: Seller roster and distribution queue
//! - [`PricingRuleRepository`]: Tiered pricing table
//! - [`QuotationRepository`]: Submitted quotations
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations for testing

pub mod in_memory;
pub mod traits;

pub use traits::{
    PricingRuleRepository, QuotationRepository, RepositoryError, RepositoryResult,
    SellerRepository,
};
