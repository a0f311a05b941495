//! # Lead Assignment Service
//!
//! Quote submission and seller distribution.
//!
//! A submitted quote is priced first. A vehicle outside every tier is still
//! saved, as an unpriced lead, so that no customer contact is lost. The lead
//! is then handed to the next seller:
//!
//! - **Recency mode** (default): [`select_next`] over the roster under the
//!   configured [`SelectionPolicy`].
//! - **Queue mode**: the head of the manually ordered [`SellerQueue`] that is
//!   eligible; the assigned seller rotates to the tail.
//!
//! Reading the roster, selecting, and writing back the assignment happen
//! under one lock, so concurrent submissions never observe the same
//! "next seller".

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::pricing_catalog::PricingCatalog;
use crate::config::Settings;
use crate::domain::entities::{Quotation, Seller};
use crate::domain::errors::DomainResult;
use crate::domain::services::{PricingResolver, SelectionPolicy, SellerQueue, rank, select_next};
use crate::domain::value_objects::{Money, SellerId, Timestamp, VehicleCategory};
use crate::infrastructure::persistence::{
    PricingRuleRepository, QuotationRepository, SellerRepository,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Incoming quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Client name.
    pub client_name: String,
    /// Client phone, free-form.
    pub client_phone: String,
    /// Vehicle category.
    pub category: VehicleCategory,
    /// FIPE table value of the vehicle.
    pub fipe_value: Money,
}

impl QuoteRequest {
    /// Creates a request with an empty phone number.
    #[must_use]
    pub fn new(client_name: impl Into<String>, category: VehicleCategory, fipe_value: Money) -> Self {
        Self {
            client_name: client_name.into(),
            client_phone: String::new(),
            category,
            fipe_value,
        }
    }

    /// Sets the client phone.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.client_phone = phone.into();
        self
    }
}

/// Result of handing a lead to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOutcome {
    /// The lead went to this seller.
    Assigned(SellerId),
    /// Nobody is eligible; the lead stays unowned.
    NoEligibleSeller,
}

impl AssignmentOutcome {
    /// Returns the assigned seller, if any.
    #[must_use]
    pub fn seller_id(&self) -> Option<&SellerId> {
        match self {
            Self::Assigned(id) => Some(id),
            Self::NoEligibleSeller => None,
        }
    }

    /// Returns true if a seller was assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }
}

/// A stored quotation together with how its lead was routed.
#[derive(Debug, Clone)]
pub struct SubmittedQuote {
    /// The persisted quotation.
    pub quotation: Quotation,
    /// Seller routing result.
    pub outcome: AssignmentOutcome,
}

/// Orchestrates pricing, seller selection and persistence.
pub struct LeadAssignmentService {
    sellers: Arc<dyn SellerRepository>,
    quotations: Arc<dyn QuotationRepository>,
    catalog: PricingCatalog,
    policy: SelectionPolicy,
    queue_mode: bool,
    assignment_lock: Mutex<()>,
}

impl LeadAssignmentService {
    /// Creates a service with the default policy and discount.
    #[must_use]
    pub fn new(
        sellers: Arc<dyn SellerRepository>,
        pricing_rules: Arc<dyn PricingRuleRepository>,
        quotations: Arc<dyn QuotationRepository>,
    ) -> Self {
        Self {
            sellers,
            quotations,
            catalog: PricingCatalog::new(pricing_rules, PricingResolver::default()),
            policy: SelectionPolicy::default(),
            queue_mode: false,
            assignment_lock: Mutex::new(()),
        }
    }

    /// Creates a service configured from validated settings.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Config` if the discount is out of range.
    pub fn from_settings(
        settings: &Settings,
        sellers: Arc<dyn SellerRepository>,
        pricing_rules: Arc<dyn PricingRuleRepository>,
        quotations: Arc<dyn QuotationRepository>,
    ) -> ApplicationResult<Self> {
        let resolver = PricingResolver::new(settings.discount_rate()?);
        Ok(Self::new(sellers, pricing_rules, quotations)
            .with_policy(settings.selection_policy())
            .with_resolver(resolver)
            .with_queue_mode(settings.distribution.queue_mode))
    }

    /// Sets the selection policy.
    #[must_use]
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the pricing resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: PricingResolver) -> Self {
        self.catalog = self.catalog.with_resolver(resolver);
        self
    }

    /// Enables or disables queue mode.
    #[must_use]
    pub fn with_queue_mode(mut self, queue_mode: bool) -> Self {
        self.queue_mode = queue_mode;
        self
    }

    /// Returns the selection policy.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Returns true if leads are assigned from the manual queue.
    #[inline]
    #[must_use]
    pub fn queue_mode(&self) -> bool {
        self.queue_mode
    }

    /// Returns the pricing catalog.
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &PricingCatalog {
        &self.catalog
    }

    /// Prices, assigns and stores a quote.
    ///
    /// Neither a missing pricing tier nor an empty roster fails the
    /// submission; both are reported on the returned quotation.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Validation` if the client name is blank
    /// - `ApplicationError::Repository` if storage fails
    pub async fn submit_quote(&self, request: QuoteRequest) -> ApplicationResult<SubmittedQuote> {
        if request.client_name.trim().is_empty() {
            return Err(ApplicationError::validation("client name is required"));
        }

        let created_at = Timestamp::now();
        let mut quotation = Quotation::new(
            request.client_name,
            request.client_phone,
            request.category,
            request.fipe_value,
            created_at,
        )?;

        match self
            .catalog
            .price(request.category, request.fipe_value)
            .await?
        {
            Some(pricing) => quotation = quotation.with_pricing(pricing),
            None => tracing::warn!(
                quotation_id = %quotation.id(),
                category = %request.category,
                fipe_value = %request.fipe_value,
                "no pricing tier covers vehicle, saving unpriced lead"
            ),
        }

        let _guard = self.assignment_lock.lock().await;
        let assignment = self.assign_locked(created_at).await?;
        let outcome = match &assignment {
            Some(assignment) => {
                quotation = quotation.with_seller(assignment.seller_id.clone());
                AssignmentOutcome::Assigned(assignment.seller_id.clone())
            }
            None => AssignmentOutcome::NoEligibleSeller,
        };

        if let Err(err) = self.quotations.save(&quotation).await {
            if let Some(assignment) = &assignment {
                self.revert(assignment).await;
            }
            return Err(err.into());
        }
        tracing::info!(
            quotation_id = %quotation.id(),
            status = ?quotation.status(),
            seller_id = ?outcome.seller_id().map(SellerId::as_str),
            "quote submitted"
        );

        Ok(SubmittedQuote { quotation, outcome })
    }

    /// Picks the next seller and records the assignment.
    ///
    /// The recorded time is `at`, or one millisecond after the latest
    /// assignment on the roster if the clock has not moved past it, so
    /// back-to-back assignments always rotate.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if the roster cannot be read or
    /// written.
    pub async fn assign_next(&self, at: Timestamp) -> ApplicationResult<AssignmentOutcome> {
        let _guard = self.assignment_lock.lock().await;
        Ok(match self.assign_locked(at).await? {
            Some(assignment) => AssignmentOutcome::Assigned(assignment.seller_id),
            None => AssignmentOutcome::NoEligibleSeller,
        })
    }

    /// Selects and writes back one assignment. Caller holds `assignment_lock`.
    async fn assign_locked(&self, at: Timestamp) -> ApplicationResult<Option<RecordedAssignment>> {
        let roster = self.sellers.get_all().await?;
        let mut queue = if self.queue_mode {
            Some(self.load_queue(&roster).await?)
        } else {
            None
        };

        let selected = match &queue {
            Some(queue) => queue.head(&roster, &self.policy),
            None => select_next(&roster, &self.policy),
        };
        let Some(seller) = selected else {
            tracing::warn!(
                roster = roster.len(),
                method = %self.policy.method,
                queue_mode = self.queue_mode,
                "no eligible seller for lead"
            );
            return Ok(None);
        };

        let at = after_latest_assignment(at, &roster)?;
        let assignment = RecordedAssignment {
            seller_id: seller.id().clone(),
            previous: seller.clone(),
            previous_queue: queue.clone(),
        };
        let updated = self
            .sellers
            .record_assignment(&assignment.seller_id, at)
            .await?;

        if let Some(queue) = queue.as_mut() {
            let rotated: ApplicationResult<()> = match queue.rotate_to_tail(&assignment.seller_id)
            {
                Ok(()) => self.sellers.save_queue(queue).await.map_err(Into::into),
                Err(err) => Err(err.into()),
            };
            if let Err(err) = rotated {
                self.revert(&assignment).await;
                return Err(err);
            }
        }

        tracing::info!(
            seller_id = %assignment.seller_id,
            assignment_count = updated.assignment_count(),
            pending_leads = updated.pending_leads(),
            "lead assigned"
        );
        Ok(Some(assignment))
    }

    /// Restores the seller and queue captured before an assignment whose
    /// lead could not be stored. Caller holds `assignment_lock`.
    async fn revert(&self, assignment: &RecordedAssignment) {
        let mut restored = self.sellers.save(&assignment.previous).await;
        if let Some(queue) = &assignment.previous_queue
            && restored.is_ok()
        {
            restored = self.sellers.save_queue(queue).await;
        }
        match restored {
            Ok(()) => tracing::warn!(
                seller_id = %assignment.seller_id,
                "assignment reverted after failed write"
            ),
            Err(err) => tracing::error!(
                seller_id = %assignment.seller_id,
                error = %err,
                "could not revert assignment"
            ),
        }
    }

    /// Returns the sellers in the order they would receive the next leads.
    ///
    /// Ineligible sellers are left out.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if the roster cannot be read.
    pub async fn preview_order(&self) -> ApplicationResult<Vec<SellerId>> {
        let roster = self.sellers.get_all().await?;
        if self.queue_mode {
            let queue = self.load_queue(&roster).await?;
            return Ok(queue
                .order()
                .iter()
                .filter(|id| {
                    roster
                        .iter()
                        .any(|s| s.id() == *id && self.policy.is_eligible(s))
                })
                .cloned()
                .collect());
        }
        Ok(rank(&roster, &self.policy)
            .into_iter()
            .map(|s| s.id().clone())
            .collect())
    }

    /// Returns the current manual queue, reconciled with the roster.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if storage fails.
    pub async fn queue(&self) -> ApplicationResult<SellerQueue> {
        let roster = self.sellers.get_all().await?;
        self.load_queue(&roster).await
    }

    /// Replaces the queue order with an administrative arrangement.
    ///
    /// Takes effect on the next assignment.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQueueOrder` unless `order` lists every
    /// queued seller exactly once.
    pub async fn reorder_queue(&self, order: Vec<SellerId>) -> ApplicationResult<SellerQueue> {
        self.update_queue(|queue, _| queue.reorder(order)).await
    }

    /// Moves one seller to `position` in the queue (0 is the head).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSeller` if the seller is not queued.
    pub async fn move_seller(
        &self,
        seller_id: &SellerId,
        position: usize,
    ) -> ApplicationResult<SellerQueue> {
        self.update_queue(|queue, _| queue.move_to(seller_id, position))
            .await
    }

    /// Re-seeds the queue alphabetically by seller name.
    ///
    /// Assignment history on the sellers is not touched.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if storage fails.
    pub async fn reset_queue_alphabetical(&self) -> ApplicationResult<SellerQueue> {
        self.update_queue(|queue, roster| {
            queue.reset_alphabetical(roster);
            Ok(())
        })
        .await
    }

    /// Marks one of a seller's pending leads as handled.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the seller does not exist.
    pub async fn release_lead(&self, seller_id: &SellerId) -> ApplicationResult<Seller> {
        let _guard = self.assignment_lock.lock().await;

        let mut seller = self
            .sellers
            .get(seller_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Seller", seller_id.as_str()))?;
        seller.resolve_pending_lead();
        self.sellers.save(&seller).await?;
        tracing::debug!(seller_id = %seller_id, pending_leads = seller.pending_leads(), "lead released");
        Ok(seller)
    }

    async fn update_queue<F>(&self, change: F) -> ApplicationResult<SellerQueue>
    where
        F: FnOnce(&mut SellerQueue, &[Seller]) -> DomainResult<()>,
    {
        let _guard = self.assignment_lock.lock().await;

        let roster = self.sellers.get_all().await?;
        let mut queue = self.load_queue(&roster).await?;
        change(&mut queue, &roster)?;
        self.sellers.save_queue(&queue).await?;

        tracing::info!(order = ?queue.order(), "distribution queue updated");
        Ok(queue)
    }

    async fn load_queue(&self, roster: &[Seller]) -> ApplicationResult<SellerQueue> {
        let mut queue = match self.sellers.get_queue().await? {
            Some(queue) => queue,
            None => SellerQueue::from_positions(roster),
        };
        queue.sync(roster);
        Ok(queue)
    }
}

impl fmt::Debug for LeadAssignmentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadAssignmentService")
            .field("policy", &self.policy)
            .field("queue_mode", &self.queue_mode)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

/// A written assignment plus the state needed to undo it.
struct RecordedAssignment {
    seller_id: SellerId,
    previous: Seller,
    previous_queue: Option<SellerQueue>,
}

fn after_latest_assignment(at: Timestamp, roster: &[Seller]) -> DomainResult<Timestamp> {
    match roster.iter().filter_map(Seller::last_assignment_at).max() {
        Some(latest) if latest >= at => Ok(latest.add_millis(1)?),
        _ => Ok(at),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::{PricingRule, QuotationStatus};
    use crate::domain::value_objects::{DistributionMethod, QuotationId, SellerStatus};
    use crate::infrastructure::persistence::in_memory::{
        InMemoryPricingRuleRepository, InMemoryQuotationRepository, InMemorySellerRepository,
    };
    use crate::infrastructure::persistence::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Quotation store whose writes always fail.
    #[derive(Debug)]
    struct UnavailableQuotations;

    #[async_trait]
    impl QuotationRepository for UnavailableQuotations {
        async fn save(&self, _quotation: &Quotation) -> RepositoryResult<()> {
            Err(RepositoryError::internal("db down"))
        }

        async fn get(&self, _id: &QuotationId) -> RepositoryResult<Option<Quotation>> {
            Ok(None)
        }

        async fn find_by_seller(&self, _seller_id: &SellerId) -> RepositoryResult<Vec<Quotation>> {
            Ok(Vec::new())
        }

        async fn find_unpriced(&self) -> RepositoryResult<Vec<Quotation>> {
            Ok(Vec::new())
        }

        async fn count(&self) -> RepositoryResult<u64> {
            Ok(0)
        }
    }

    struct Fixture {
        sellers: Arc<InMemorySellerRepository>,
        quotations: Arc<InMemoryQuotationRepository>,
        rules: Arc<InMemoryPricingRuleRepository>,
    }

    impl Fixture {
        async fn new(roster: Vec<Seller>) -> Self {
            let sellers = Arc::new(InMemorySellerRepository::new());
            for seller in &roster {
                sellers.save(seller).await.unwrap();
            }
            let rules = Arc::new(InMemoryPricingRuleRepository::with_rules([
                PricingRule::new(
                    VehicleCategory::Standard,
                    money(0.0),
                    money(30_000.0),
                    money(200.0),
                )
                .unwrap()
                .with_participation_quota(money(50.0)),
            ]));
            Self {
                sellers,
                quotations: Arc::new(InMemoryQuotationRepository::new()),
                rules,
            }
        }

        fn service(&self) -> LeadAssignmentService {
            LeadAssignmentService::new(
                self.sellers.clone(),
                self.rules.clone(),
                self.quotations.clone(),
            )
        }

        fn unavailable_service(&self) -> LeadAssignmentService {
            LeadAssignmentService::new(
                self.sellers.clone(),
                self.rules.clone(),
                Arc::new(UnavailableQuotations),
            )
        }
    }

    fn money(v: f64) -> Money {
        Money::new(v).unwrap()
    }

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_secs(1_700_000_000 + secs).unwrap()
    }

    fn seller(id: &str, created: i64) -> Seller {
        Seller::new(SellerId::new(id), id.to_uppercase(), ts(created))
    }

    fn request(value: f64) -> QuoteRequest {
        QuoteRequest::new("Maria", VehicleCategory::Standard, money(value)).with_phone("555-0100")
    }

    #[tokio::test]
    async fn submit_prices_and_assigns() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 10)]).await;
        let service = fx.service();

        let submitted = service.submit_quote(request(20_000.0)).await.unwrap();

        assert_eq!(
            submitted.outcome,
            AssignmentOutcome::Assigned(SellerId::new("ana"))
        );
        let quotation = &submitted.quotation;
        assert_eq!(quotation.status(), QuotationStatus::Priced);
        let pricing = quotation.pricing().unwrap();
        assert_eq!(pricing.enrollment_fee, money(400.0));
        assert_eq!(pricing.discounted_enrollment_fee, money(320.0));
        assert_eq!(pricing.participation_quota, Some(money(50.0)));
        assert_eq!(quotation.seller_id(), Some(&SellerId::new("ana")));
        assert_eq!(quotation.client_phone(), "555-0100");

        let stored = fx.quotations.get(&quotation.id()).await.unwrap().unwrap();
        assert_eq!(stored.seller_id(), Some(&SellerId::new("ana")));

        let ana = fx.sellers.get(&SellerId::new("ana")).await.unwrap().unwrap();
        assert_eq!(ana.assignment_count(), 1);
        assert_eq!(ana.pending_leads(), 1);
        assert!(ana.last_assignment_at().is_some());
    }

    #[tokio::test]
    async fn unpriceable_vehicle_is_saved_unpriced() {
        let fx = Fixture::new(vec![seller("ana", 0)]).await;
        let service = fx.service();

        let submitted = service.submit_quote(request(95_000.0)).await.unwrap();

        assert_eq!(submitted.quotation.status(), QuotationStatus::Unpriced);
        assert!(submitted.outcome.is_assigned());
        assert_eq!(fx.quotations.find_unpriced().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_roster_keeps_lead_unowned() {
        let fx = Fixture::new(vec![]).await;
        let service = fx.service();

        let submitted = service.submit_quote(request(20_000.0)).await.unwrap();

        assert_eq!(submitted.outcome, AssignmentOutcome::NoEligibleSeller);
        assert!(submitted.quotation.seller_id().is_none());
        assert_eq!(fx.quotations.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn blank_client_name_is_rejected() {
        let fx = Fixture::new(vec![seller("ana", 0)]).await;
        let service = fx.service();

        let blank = QuoteRequest::new("  ", VehicleCategory::Standard, money(1.0));
        let err = service.submit_quote(blank).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fx.quotations.count().await.unwrap(), 0);
        let ana = fx.sellers.get(&SellerId::new("ana")).await.unwrap().unwrap();
        assert_eq!(ana.assignment_count(), 0);
    }

    #[tokio::test]
    async fn failed_quote_write_leaves_roster_untouched() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 10)]).await;

        let err = fx
            .unavailable_service()
            .submit_quote(request(20_000.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Repository(_)));

        let ana = fx.sellers.get(&SellerId::new("ana")).await.unwrap().unwrap();
        assert_eq!(ana.assignment_count(), 0);
        assert_eq!(ana.pending_leads(), 0);
        assert!(ana.last_assignment_at().is_none());

        // The lead that was never stored does not use up ana's turn.
        let submitted = fx.service().submit_quote(request(20_000.0)).await.unwrap();
        assert_eq!(
            submitted.outcome,
            AssignmentOutcome::Assigned(SellerId::new("ana"))
        );
    }

    #[tokio::test]
    async fn failed_quote_write_restores_queue() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 1)]).await;
        fx.service()
            .with_queue_mode(true)
            .reorder_queue(vec![SellerId::new("bia"), SellerId::new("ana")])
            .await
            .unwrap();

        let failing = fx.unavailable_service().with_queue_mode(true);
        assert!(failing.submit_quote(request(20_000.0)).await.is_err());

        let queue = fx.sellers.get_queue().await.unwrap().unwrap();
        let ids: Vec<&str> = queue.order().iter().map(SellerId::as_str).collect();
        assert_eq!(ids, vec!["bia", "ana"]);
        let bia = fx.sellers.get(&SellerId::new("bia")).await.unwrap().unwrap();
        assert_eq!(bia.assignment_count(), 0);
        assert_eq!(bia.queue_position(), 0);
    }

    #[tokio::test]
    async fn rotates_through_roster() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 1), seller("caio", 2)]).await;
        let service = fx.service();

        let mut order = Vec::new();
        for _ in 0..6 {
            let outcome = service.assign_next(ts(100)).await.unwrap();
            order.push(outcome.seller_id().unwrap().as_str().to_string());
        }

        assert_eq!(order, vec!["ana", "bia", "caio", "ana", "bia", "caio"]);
    }

    #[tokio::test]
    async fn skips_inactive_and_opted_out() {
        let fx = Fixture::new(vec![
            seller("ana", 0).with_status(SellerStatus::OnLeave),
            seller("bia", 1).with_participation(false),
            seller("caio", 2),
        ])
        .await;
        let service = fx.service();

        for _ in 0..3 {
            let outcome = service.assign_next(ts(100)).await.unwrap();
            assert_eq!(outcome, AssignmentOutcome::Assigned(SellerId::new("caio")));
        }
    }

    #[tokio::test]
    async fn load_limit_excludes_busy_sellers() {
        let fx = Fixture::new(vec![
            seller("ana", 0).with_pending_leads(3),
            seller("bia", 1).with_pending_leads(1),
        ])
        .await;
        let service = fx
            .service()
            .with_policy(SelectionPolicy::new(DistributionMethod::LoadBalanced).with_load_limit(2));

        let first = service.assign_next(ts(100)).await.unwrap();
        assert_eq!(first, AssignmentOutcome::Assigned(SellerId::new("bia")));

        // bia now holds 2 pending leads and is also at the limit.
        let second = service.assign_next(ts(101)).await.unwrap();
        assert_eq!(second, AssignmentOutcome::NoEligibleSeller);

        service.release_lead(&SellerId::new("bia")).await.unwrap();
        let third = service.assign_next(ts(102)).await.unwrap();
        assert_eq!(third, AssignmentOutcome::Assigned(SellerId::new("bia")));
    }

    #[tokio::test]
    async fn release_unknown_seller() {
        let fx = Fixture::new(vec![]).await;
        let err = fx
            .service()
            .release_lead(&SellerId::new("ghost"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn queue_mode_follows_manual_order() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 1), seller("caio", 2)]).await;
        let service = fx.service().with_queue_mode(true);

        service
            .reorder_queue(vec![
                SellerId::new("caio"),
                SellerId::new("ana"),
                SellerId::new("bia"),
            ])
            .await
            .unwrap();

        let mut order = Vec::new();
        for _ in 0..4 {
            let outcome = service.assign_next(ts(100)).await.unwrap();
            order.push(outcome.seller_id().unwrap().as_str().to_string());
        }
        assert_eq!(order, vec!["caio", "ana", "bia", "caio"]);

        let queue = fx.sellers.get_queue().await.unwrap().unwrap();
        assert_eq!(queue.order().first(), Some(&SellerId::new("ana")));
    }

    #[tokio::test]
    async fn queue_mode_skips_ineligible_head() {
        let fx = Fixture::new(vec![
            seller("ana", 0).with_status(SellerStatus::Inactive),
            seller("bia", 1),
        ])
        .await;
        let service = fx.service().with_queue_mode(true);

        let outcome = service.assign_next(ts(100)).await.unwrap();
        assert_eq!(outcome, AssignmentOutcome::Assigned(SellerId::new("bia")));
    }

    #[tokio::test]
    async fn manual_move_overrides_rotation() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 1), seller("caio", 2)]).await;
        let service = fx.service().with_queue_mode(true);

        service.assign_next(ts(100)).await.unwrap();
        let queue = service.move_seller(&SellerId::new("ana"), 0).await.unwrap();
        assert_eq!(queue.order()[0], SellerId::new("ana"));

        let outcome = service.assign_next(ts(101)).await.unwrap();
        assert_eq!(outcome, AssignmentOutcome::Assigned(SellerId::new("ana")));
    }

    #[tokio::test]
    async fn invalid_reorder_is_rejected() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 1)]).await;
        let service = fx.service().with_queue_mode(true);

        let err = service
            .reorder_queue(vec![SellerId::new("ana")])
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .move_seller(&SellerId::new("ghost"), 0)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn alphabetical_reset_keeps_history() {
        let fx = Fixture::new(vec![
            Seller::new(SellerId::new("s-1"), "carla", ts(0)),
            Seller::new(SellerId::new("s-2"), "Ana", ts(1)),
            Seller::new(SellerId::new("s-3"), "bruno", ts(2)),
        ])
        .await;
        let service = fx.service().with_queue_mode(true);
        service.assign_next(ts(100)).await.unwrap();

        let queue = service.reset_queue_alphabetical().await.unwrap();

        let ids: Vec<&str> = queue.order().iter().map(SellerId::as_str).collect();
        assert_eq!(ids, vec!["s-2", "s-3", "s-1"]);
        let carla = fx.sellers.get(&SellerId::new("s-1")).await.unwrap().unwrap();
        assert_eq!(carla.assignment_count(), 1);
        assert_eq!(carla.queue_position(), 2);
    }

    #[tokio::test]
    async fn preview_matches_assignment_order() {
        let fx = Fixture::new(vec![
            seller("ana", 0).with_last_assignment_at(ts(50)),
            seller("bia", 1),
            seller("caio", 2).with_status(SellerStatus::Inactive),
        ])
        .await;
        let service = fx.service();

        let preview = service.preview_order().await.unwrap();
        assert_eq!(preview, vec![SellerId::new("bia"), SellerId::new("ana")]);

        let queued = fx.service().with_queue_mode(true);
        let preview = queued.preview_order().await.unwrap();
        assert_eq!(preview.len(), 2);
        assert!(!preview.contains(&SellerId::new("caio")));
    }

    #[tokio::test]
    async fn new_seller_joins_queue_tail() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 1)]).await;
        let service = fx.service().with_queue_mode(true);
        service.reset_queue_alphabetical().await.unwrap();

        fx.sellers.save(&seller("caio", 5)).await.unwrap();
        let queue = service.queue().await.unwrap();

        assert_eq!(queue.order().last(), Some(&SellerId::new("caio")));
    }

    #[tokio::test]
    async fn coarse_clock_still_rotates() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 1)]).await;
        let service = fx.service();

        // Same instant for every call.
        let a = service.assign_next(ts(100)).await.unwrap();
        let b = service.assign_next(ts(100)).await.unwrap();
        let c = service.assign_next(ts(100)).await.unwrap();

        assert_eq!(a.seller_id().unwrap().as_str(), "ana");
        assert_eq!(b.seller_id().unwrap().as_str(), "bia");
        assert_eq!(c.seller_id().unwrap().as_str(), "ana");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_submissions_are_fair() {
        let fx = Fixture::new(vec![seller("ana", 0), seller("bia", 1), seller("caio", 2)]).await;
        let service = Arc::new(fx.service());

        let mut handles = Vec::new();
        for _ in 0..30 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.submit_quote(request(10_000.0)).await
            }));
        }

        let mut per_seller: HashMap<String, usize> = HashMap::new();
        for handle in handles {
            let submitted = handle.await.unwrap().unwrap();
            let id = submitted.outcome.seller_id().unwrap().as_str().to_string();
            *per_seller.entry(id).or_default() += 1;
        }

        assert_eq!(per_seller.len(), 3);
        assert!(per_seller.values().all(|&n| n == 10));
        assert_eq!(fx.quotations.count().await.unwrap(), 30);
    }

    #[tokio::test]
    async fn from_settings_applies_configuration() {
        let fx = Fixture::new(vec![seller("ana", 0)]).await;
        let mut settings = Settings::default();
        settings.distribution.queue_mode = true;
        settings.distribution.method = DistributionMethod::Speed;
        settings.pricing.discount_rate_pct = rust_decimal::Decimal::from(50);

        let service = LeadAssignmentService::from_settings(
            &settings,
            fx.sellers.clone(),
            fx.rules.clone(),
            fx.quotations.clone(),
        )
        .unwrap();

        assert!(service.queue_mode());
        assert_eq!(service.policy().method, DistributionMethod::Speed);
        let submitted = service.submit_quote(request(20_000.0)).await.unwrap();
        assert_eq!(
            submitted.quotation.pricing().unwrap().discounted_enrollment_fee,
            money(200.0)
        );
    }
}
