//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemorySellerRepository`]: Seller roster and queue
//! - [`InMemoryPricingRuleRepository`]: Pricing table
//! - [`InMemoryQuotationRepository`]: Quotations
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod pricing_rule_repository;
pub mod quotation_repository;
pub mod seller_repository;

pub use pricing_rule_repository::InMemoryPricingRuleRepository;
pub use quotation_repository::InMemoryQuotationRepository;
pub use seller_repository::InMemorySellerRepository;
