//! # lead-desk
//!
//! Decision core of a quoting CRM for a vehicle-protection association.
//!
//! Two components carry the business rules:
//!
//! - **Seller selection**: which seller receives the next lead, by strict
//!   round-robin over assignment recency or by an alternative
//!   [`DistributionMethod`](domain::value_objects::DistributionMethod).
//! - **Tiered pricing**: which pricing rule covers a vehicle's FIPE value,
//!   and the fees derived from it.
//!
//! Both are pure functions in [`domain::services`]. The
//! [`LeadAssignmentService`](application::services::LeadAssignmentService)
//! wires them to storage behind the ports in
//! [`infrastructure::persistence`].
//!
//! # Example
//!
//! ```
//! use lead_desk::domain::entities::{PricingRule, Seller};
//! use lead_desk::domain::services::{PricingResolver, SelectionPolicy, select_next};
//! use lead_desk::domain::value_objects::{Money, SellerId, Timestamp, VehicleCategory};
//!
//! let now = Timestamp::from_secs(1_704_067_200).unwrap();
//! let sellers = vec![
//!     Seller::new(SellerId::new("s-1"), "Ana", now).with_last_assignment_at(now),
//!     Seller::new(SellerId::new("s-2"), "Bruno", now),
//! ];
//! let next = select_next(&sellers, &SelectionPolicy::default()).unwrap();
//! assert_eq!(next.id().as_str(), "s-2");
//!
//! let rules = vec![PricingRule::new(
//!     VehicleCategory::Standard,
//!     Money::new(0.0).unwrap(),
//!     Money::new(30_000.0).unwrap(),
//!     Money::new(200.0).unwrap(),
//! )
//! .unwrap()];
//! let pricing = PricingResolver::default()
//!     .resolve(&rules, VehicleCategory::Standard, Money::new(25_000.0).unwrap())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(pricing.discounted_enrollment_fee.to_string(), "320.00");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
