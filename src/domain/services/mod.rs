//! # Domain Services
//!
//! Pure decision logic over caller-supplied data. Nothing here performs I/O
//! or mutates its input.
//!
//! - [`seller_selector`]: Next-seller selection under a distribution method
//! - [`seller_queue`]: Manually reorderable distribution queue
//! - [`pricing_resolver`]: Tier lookup and fee derivation

pub mod pricing_resolver;
pub mod seller_queue;
pub mod seller_selector;

pub use pricing_resolver::{PricingResolver, calculate_fields, find_rule, validate_rules};
pub use seller_queue::SellerQueue;
pub use seller_selector::{SelectionPolicy, rank, select_next};
