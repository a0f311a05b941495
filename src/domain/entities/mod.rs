//! # Domain Entities
//!
//! - [`Seller`]: Roster member that receives leads
//! - [`PricingRule`]: Tier of the monthly fee table
//! - [`Quotation`]: Submitted quote with derived pricing and owner

pub mod pricing_rule;
pub mod quotation;
pub mod seller;

pub use pricing_rule::PricingRule;
pub use quotation::{Quotation, QuotationPricing, QuotationStatus};
pub use seller::Seller;
