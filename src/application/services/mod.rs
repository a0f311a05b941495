//! # Application Services
//!
//! Services that orchestrate domain logic and persistence.
//!
//! - [`LeadAssignmentService`]: Quote submission and seller distribution
//! - [`PricingCatalog`]: Pricing table maintenance and quote pricing

pub mod lead_assignment;
pub mod pricing_catalog;

pub use lead_assignment::{AssignmentOutcome, LeadAssignmentService, QuoteRequest, SubmittedQuote};
pub use pricing_catalog::PricingCatalog;
