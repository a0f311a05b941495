//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`SellerId`]: String-based seller identifier
//! - [`PricingRuleId`], [`QuotationId`]: UUID-based identifiers
//!
//! ## Numeric Types
//!
//! - [`Money`]: Non-negative currency amount with cent precision
//! - [`DiscountRate`]: Enrollment discount percentage
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//!
//! ## Domain Enums
//!
//! - [`VehicleCategory`]: Pricing category
//! - [`SellerStatus`]: Active, inactive or on leave
//! - [`DistributionMethod`]: Lead distribution comparator

pub mod arithmetic;
pub mod discount_rate;
pub mod enums;
pub mod ids;
pub mod money;
pub mod timestamp;

pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic, round_cents};
pub use discount_rate::DiscountRate;
pub use enums::{DistributionMethod, ParseEnumError, SellerStatus, VehicleCategory};
pub use ids::{PricingRuleId, QuotationId, SellerId};
pub use money::Money;
pub use timestamp::Timestamp;
