//! # Identifiers
//!
//! Strongly-typed identifiers for sellers, pricing rules and quotations.
//!
//! # Examples
//!
//! ```
//! use lead_desk::domain::value_objects::{QuotationId, SellerId};
//!
//! let seller = SellerId::new("seller-ana");
//! assert_eq!(seller.as_str(), "seller-ana");
//!
//! let a = QuotationId::new_v4();
//! let b = QuotationId::new_v4();
//! assert_ne!(a, b);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Seller identifier, as issued by the roster store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(String);

impl SellerId {
    /// Creates a seller identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SellerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[inline]
            #[must_use]
            pub const fn get(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Pricing rule identifier.
    PricingRuleId
);

uuid_id!(
    /// Quotation identifier.
    QuotationId
);
