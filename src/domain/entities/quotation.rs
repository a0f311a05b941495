//! # Quotation Entity
//!
//! A submitted quote request with its derived pricing and owning seller.
//!
//! A quotation without pricing is an *unpriced lead*: the vehicle value fell
//! outside every configured range, and the request is kept for manual
//! follow-up instead of being rejected.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Money, QuotationId, SellerId, Timestamp, VehicleCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary fields derived from a pricing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationPricing {
    /// Monthly fee copied from the matched rule.
    pub monthly_fee: Money,
    /// One-time enrollment fee.
    pub enrollment_fee: Money,
    /// Enrollment fee after the configured discount.
    pub discounted_enrollment_fee: Money,
    /// Flat participation quota, if the tier defines one.
    pub participation_quota: Option<Money>,
}

/// Pricing state of a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    /// Pricing fields were derived from a rule.
    Priced,
    /// No rule matched; saved as a lead for manual pricing.
    Unpriced,
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priced => f.write_str("PRICED"),
            Self::Unpriced => f.write_str("UNPRICED"),
        }
    }
}

/// A quote request as persisted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    id: QuotationId,
    client_name: String,
    client_phone: String,
    category: VehicleCategory,
    fipe_value: Money,
    pricing: Option<QuotationPricing>,
    seller_id: Option<SellerId>,
    created_at: Timestamp,
}

impl Quotation {
    /// Creates a quotation with no pricing and no seller yet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the client name is blank.
    pub fn new(
        client_name: impl Into<String>,
        client_phone: impl Into<String>,
        category: VehicleCategory,
        fipe_value: Money,
        created_at: Timestamp,
    ) -> DomainResult<Self> {
        let client_name = client_name.into();
        if client_name.trim().is_empty() {
            return Err(DomainError::invalid_value("client name must not be blank"));
        }
        Ok(Self {
            id: QuotationId::new_v4(),
            client_name,
            client_phone: client_phone.into(),
            category,
            fipe_value,
            pricing: None,
            seller_id: None,
            created_at,
        })
    }

    /// Attaches derived pricing.
    #[must_use]
    pub fn with_pricing(mut self, pricing: QuotationPricing) -> Self {
        self.pricing = Some(pricing);
        self
    }

    /// Attaches the owning seller.
    #[must_use]
    pub fn with_seller(mut self, seller_id: SellerId) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    /// Returns the quotation ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuotationId {
        self.id
    }

    /// Returns the client name.
    #[inline]
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Returns the client phone.
    #[inline]
    #[must_use]
    pub fn client_phone(&self) -> &str {
        &self.client_phone
    }

    /// Returns the vehicle category.
    #[inline]
    #[must_use]
    pub fn category(&self) -> VehicleCategory {
        self.category
    }

    /// Returns the FIPE value used for pricing.
    #[inline]
    #[must_use]
    pub fn fipe_value(&self) -> Money {
        self.fipe_value
    }

    /// Returns the derived pricing, if any.
    #[inline]
    #[must_use]
    pub fn pricing(&self) -> Option<&QuotationPricing> {
        self.pricing.as_ref()
    }

    /// Returns the owning seller, if one was assigned.
    #[inline]
    #[must_use]
    pub fn seller_id(&self) -> Option<&SellerId> {
        self.seller_id.as_ref()
    }

    /// Returns when the quotation was submitted.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the pricing status.
    #[must_use]
    pub fn status(&self) -> QuotationStatus {
        if self.pricing.is_some() {
            QuotationStatus::Priced
        } else {
            QuotationStatus::Unpriced
        }
    }
}

impl fmt::Display for Quotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quotation({} {} {} {})",
            self.id,
            self.category,
            self.fipe_value,
            self.status()
        )
    }
}
