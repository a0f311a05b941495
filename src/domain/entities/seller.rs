//! # Seller Entity
//!
//! A member of the sales roster who can receive leads.
//!
//! # Examples
//!
//! ```
//! use lead_desk::domain::entities::Seller;
//! use lead_desk::domain::value_objects::{SellerId, SellerStatus, Timestamp};
//!
//! let created = Timestamp::from_secs(1_700_000_000).unwrap();
//! let mut seller = Seller::new(SellerId::new("s-1"), "Ana", created);
//! assert!(seller.is_eligible());
//! assert!(seller.last_assignment_at().is_none());
//!
//! seller.record_assignment(created.add_secs(60).unwrap()).unwrap();
//! assert_eq!(seller.assignment_count(), 1);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    ArithmeticError, CheckedArithmetic, SellerId, SellerStatus, Timestamp,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A seller in the distribution roster.
///
/// # Invariants
///
/// - `assignment_count` only grows, by exactly one per assignment
/// - `last_assignment_at` never moves backwards
/// - `conversion_rate` is within `[0, 100]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SellerRecord")]
pub struct Seller {
    id: SellerId,
    name: String,
    status: SellerStatus,
    last_assignment_at: Option<Timestamp>,
    created_at: Timestamp,
    pending_leads: u32,
    assignment_count: u64,
    participates_in_distribution: bool,
    queue_position: u32,
    conversion_rate: Decimal,
    avg_response_minutes: Option<u32>,
}

impl Seller {
    /// Creates an active, participating seller with no assignment history.
    #[must_use]
    pub fn new(id: SellerId, name: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id,
            name: name.into(),
            status: SellerStatus::Active,
            last_assignment_at: None,
            created_at,
            pending_leads: 0,
            assignment_count: 0,
            participates_in_distribution: true,
            queue_position: 0,
            conversion_rate: Decimal::ZERO,
            avg_response_minutes: None,
        }
    }

    /// Sets the roster status.
    #[must_use]
    pub fn with_status(mut self, status: SellerStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the last assignment time.
    #[must_use]
    pub fn with_last_assignment_at(mut self, at: Timestamp) -> Self {
        self.last_assignment_at = Some(at);
        self
    }

    /// Sets the number of leads awaiting contact.
    #[must_use]
    pub fn with_pending_leads(mut self, pending: u32) -> Self {
        self.pending_leads = pending;
        self
    }

    /// Sets the historical assignment count.
    #[must_use]
    pub fn with_assignment_count(mut self, count: u64) -> Self {
        self.assignment_count = count;
        self
    }

    /// Opts the seller in or out of automatic distribution.
    #[must_use]
    pub fn with_participation(mut self, participates: bool) -> Self {
        self.participates_in_distribution = participates;
        self
    }

    /// Sets the manual queue position.
    #[must_use]
    pub fn with_queue_position(mut self, position: u32) -> Self {
        self.queue_position = position;
        self
    }

    /// Sets the conversion rate percentage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the rate is outside `[0, 100]`.
    pub fn with_conversion_rate(mut self, rate_pct: Decimal) -> DomainResult<Self> {
        if rate_pct < Decimal::ZERO || rate_pct > Decimal::ONE_HUNDRED {
            return Err(DomainError::invalid_value(format!(
                "conversion rate {} outside 0..=100",
                rate_pct
            )));
        }
        self.conversion_rate = rate_pct;
        Ok(self)
    }

    /// Sets the average first-response time in minutes.
    #[must_use]
    pub fn with_avg_response_minutes(mut self, minutes: u32) -> Self {
        self.avg_response_minutes = Some(minutes);
        self
    }

    /// Returns the seller ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &SellerId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the roster status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> SellerStatus {
        self.status
    }

    /// Returns when the seller last received a lead, if ever.
    #[inline]
    #[must_use]
    pub fn last_assignment_at(&self) -> Option<Timestamp> {
        self.last_assignment_at
    }

    /// Returns when the seller joined the roster.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the number of leads awaiting contact.
    #[inline]
    #[must_use]
    pub fn pending_leads(&self) -> u32 {
        self.pending_leads
    }

    /// Returns the total number of leads received.
    #[inline]
    #[must_use]
    pub fn assignment_count(&self) -> u64 {
        self.assignment_count
    }

    /// Returns true if the seller opted in to automatic distribution.
    #[inline]
    #[must_use]
    pub fn participates_in_distribution(&self) -> bool {
        self.participates_in_distribution
    }

    /// Returns the manual queue position.
    #[inline]
    #[must_use]
    pub fn queue_position(&self) -> u32 {
        self.queue_position
    }

    /// Returns the conversion rate percentage.
    #[inline]
    #[must_use]
    pub fn conversion_rate(&self) -> Decimal {
        self.conversion_rate
    }

    /// Returns the average first-response time in minutes, if measured.
    #[inline]
    #[must_use]
    pub fn avg_response_minutes(&self) -> Option<u32> {
        self.avg_response_minutes
    }

    /// Returns true if the seller is active and participating.
    ///
    /// Load limits are a distribution policy concern and are checked by the
    /// selector, not here.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.status.is_active() && self.participates_in_distribution
    }

    /// Returns true if the seller has never received a lead.
    #[inline]
    #[must_use]
    pub fn is_never_assigned(&self) -> bool {
        self.last_assignment_at.is_none()
    }

    /// Records that the seller received a lead at `at`.
    ///
    /// Increments the assignment count and pending leads by one. The last
    /// assignment time only advances: an `at` earlier than the recorded time
    /// keeps the recorded time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if the counters overflow.
    pub fn record_assignment(&mut self, at: Timestamp) -> DomainResult<()> {
        let count = self.assignment_count.safe_add(1)?;
        let pending = self
            .pending_leads
            .checked_add(1)
            .ok_or(ArithmeticError::Overflow)?;

        self.assignment_count = count;
        self.pending_leads = pending;
        self.last_assignment_at = Some(match self.last_assignment_at {
            Some(prev) if prev.is_after(&at) => prev,
            _ => at,
        });
        Ok(())
    }

    /// Marks one pending lead as handled.
    pub fn resolve_pending_lead(&mut self) {
        self.pending_leads = self.pending_leads.saturating_sub(1);
    }

    /// Changes the roster status.
    pub fn set_status(&mut self, status: SellerStatus) {
        self.status = status;
    }

    /// Changes the manual queue position.
    pub fn set_queue_position(&mut self, position: u32) {
        self.queue_position = position;
    }
}

/// Wire shape of a [`Seller`], validated before it becomes one.
#[derive(Deserialize)]
struct SellerRecord {
    id: SellerId,
    name: String,
    status: SellerStatus,
    last_assignment_at: Option<Timestamp>,
    created_at: Timestamp,
    pending_leads: u32,
    assignment_count: u64,
    participates_in_distribution: bool,
    queue_position: u32,
    conversion_rate: Decimal,
    avg_response_minutes: Option<u32>,
}

impl TryFrom<SellerRecord> for Seller {
    type Error = DomainError;

    fn try_from(record: SellerRecord) -> DomainResult<Self> {
        Self {
            id: record.id,
            name: record.name,
            status: record.status,
            last_assignment_at: record.last_assignment_at,
            created_at: record.created_at,
            pending_leads: record.pending_leads,
            assignment_count: record.assignment_count,
            participates_in_distribution: record.participates_in_distribution,
            queue_position: record.queue_position,
            conversion_rate: Decimal::ZERO,
            avg_response_minutes: record.avg_response_minutes,
        }
        .with_conversion_rate(record.conversion_rate)
    }
}

impl fmt::Display for Seller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seller({} {} {})", self.id, self.name, self.status)
    }
}
