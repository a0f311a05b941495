//! # Seller Selector
//!
//! Picks the seller who receives the next incoming lead.
//!
//! Selection is a pure function over the roster: it filters eligible sellers
//! and returns the minimum under a composite ordering. The caller records the
//! assignment afterwards (see [`Seller::record_assignment`]).
//!
//! # Ordering
//!
//! ```text
//! method comparator        (Sequential: none)
//!   → last assignment      (never assigned first, then oldest first)
//!   → created at           (earliest first)
//!   → seller id            (total order)
//! ```
//!
//! # Examples
//!
//! ```
//! use lead_desk::domain::entities::Seller;
//! use lead_desk::domain::services::seller_selector::{SelectionPolicy, select_next};
//! use lead_desk::domain::value_objects::{SellerId, Timestamp};
//!
//! let t0 = Timestamp::from_secs(1_700_000_000).unwrap();
//! let sellers = vec![
//!     Seller::new(SellerId::new("ana"), "Ana", t0).with_last_assignment_at(t0.add_secs(10).unwrap()),
//!     Seller::new(SellerId::new("bia"), "Bia", t0.add_secs(5).unwrap()),
//! ];
//!
//! let next = select_next(&sellers, &SelectionPolicy::default()).unwrap();
//! assert_eq!(next.id().as_str(), "bia");
//! ```

use crate::domain::entities::Seller;
use crate::domain::value_objects::DistributionMethod;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Distribution settings applied during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Comparator applied before the recency ordering.
    pub method: DistributionMethod,
    /// Maximum pending leads a seller may hold.
    pub max_pending_leads: Option<u32>,
    /// Exclude sellers at or above `max_pending_leads`.
    pub skip_overloaded: bool,
}

impl SelectionPolicy {
    /// Creates a policy with the given method and no load limit.
    #[must_use]
    pub fn new(method: DistributionMethod) -> Self {
        Self {
            method,
            max_pending_leads: None,
            skip_overloaded: false,
        }
    }

    /// Excludes sellers holding `max_pending_leads` or more pending leads.
    #[must_use]
    pub fn with_load_limit(mut self, max_pending_leads: u32) -> Self {
        self.max_pending_leads = Some(max_pending_leads);
        self.skip_overloaded = true;
        self
    }

    /// Returns true if the seller is at or above the load limit.
    ///
    /// Always false unless `skip_overloaded` is set with a limit.
    #[must_use]
    pub fn is_overloaded(&self, seller: &Seller) -> bool {
        match (self.skip_overloaded, self.max_pending_leads) {
            (true, Some(max)) => seller.pending_leads() >= max,
            _ => false,
        }
    }

    /// Returns true if the seller may receive a lead under this policy.
    #[must_use]
    pub fn is_eligible(&self, seller: &Seller) -> bool {
        seller.is_eligible() && !self.is_overloaded(seller)
    }
}

/// Selects the next seller, or `None` when nobody is eligible.
///
/// Never mutates the roster.
#[must_use]
pub fn select_next<'a>(sellers: &'a [Seller], policy: &SelectionPolicy) -> Option<&'a Seller> {
    let selected = sellers
        .iter()
        .filter(|s| policy.is_eligible(s))
        .min_by(|a, b| compare(policy.method, a, b));

    match selected {
        Some(seller) => tracing::debug!(
            seller_id = %seller.id(),
            method = %policy.method,
            "selected next seller"
        ),
        None => tracing::debug!(
            roster_size = sellers.len(),
            method = %policy.method,
            "no eligible seller"
        ),
    }
    selected
}

/// Returns every eligible seller in selection order (next seller first).
#[must_use]
pub fn rank<'a>(sellers: &'a [Seller], policy: &SelectionPolicy) -> Vec<&'a Seller> {
    let mut eligible: Vec<&Seller> = sellers.iter().filter(|s| policy.is_eligible(s)).collect();
    eligible.sort_by(|a, b| compare(policy.method, a, b));
    eligible
}

/// Full ordering for `method`: method comparator, then recency.
#[must_use]
pub fn compare(method: DistributionMethod, a: &Seller, b: &Seller) -> Ordering {
    compare_by_method(method, a, b).then_with(|| compare_recency(a, b))
}

/// Round-robin recency ordering.
///
/// Never-assigned sellers come first, then the oldest last assignment.
/// Ties (both never assigned, or equal times) go to the earliest created
/// seller, then to the smaller ID.
#[must_use]
pub fn compare_recency(a: &Seller, b: &Seller) -> Ordering {
    let by_last = match (a.last_assignment_at(), b.last_assignment_at()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    };
    by_last
        .then_with(|| a.created_at().cmp(&b.created_at()))
        .then_with(|| a.id().cmp(b.id()))
}

fn compare_by_method(method: DistributionMethod, a: &Seller, b: &Seller) -> Ordering {
    match method {
        DistributionMethod::Sequential => Ordering::Equal,
        DistributionMethod::LoadBalanced => a.pending_leads().cmp(&b.pending_leads()),
        // higher conversion first
        DistributionMethod::Performance => b.conversion_rate().cmp(&a.conversion_rate()),
        // unmeasured response times sort last
        DistributionMethod::Speed => match (a.avg_response_minutes(), b.avg_response_minutes()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{SellerId, SellerStatus, Timestamp};
    use rust_decimal::Decimal;

    fn ts(offset: i64) -> Timestamp {
        Timestamp::from_secs(1_700_000_000 + offset).unwrap()
    }

    fn seller(id: &str, created: i64) -> Seller {
        Seller::new(SellerId::new(id), id.to_uppercase(), ts(created))
    }

    fn ids(ranked: &[&Seller]) -> Vec<String> {
        ranked.iter().map(|s| s.id().to_string()).collect()
    }

    mod sequential {
        use super::*;

        #[test]
        fn never_assigned_has_priority() {
            let sellers = vec![
                seller("a", 0).with_last_assignment_at(ts(10)),
                seller("b", 500),
                seller("c", 1).with_last_assignment_at(ts(5)),
            ];
            let next = select_next(&sellers, &SelectionPolicy::default()).unwrap();
            assert_eq!(next.id().as_str(), "b");
        }

        #[test]
        fn oldest_assignment_wins() {
            let sellers = vec![
                seller("a", 0).with_last_assignment_at(ts(300)),
                seller("b", 0).with_last_assignment_at(ts(100)),
                seller("c", 0).with_last_assignment_at(ts(200)),
            ];
            let ranked = rank(&sellers, &SelectionPolicy::default());
            assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
        }

        #[test]
        fn equal_timestamps_tie_break_on_created_at() {
            let sellers = vec![
                seller("late", 50).with_last_assignment_at(ts(100)),
                seller("early", 10).with_last_assignment_at(ts(100)),
            ];
            let next = select_next(&sellers, &SelectionPolicy::default()).unwrap();
            assert_eq!(next.id().as_str(), "early");
        }

        #[test]
        fn both_never_assigned_tie_break_on_created_at() {
            let sellers = vec![seller("late", 50), seller("early", 10)];
            let next = select_next(&sellers, &SelectionPolicy::default()).unwrap();
            assert_eq!(next.id().as_str(), "early");
        }

        #[test]
        fn identical_history_falls_back_to_id() {
            let sellers = vec![seller("b", 0), seller("a", 0)];
            let next = select_next(&sellers, &SelectionPolicy::default()).unwrap();
            assert_eq!(next.id().as_str(), "a");
        }
    }

    mod eligibility {
        use super::*;

        #[test]
        fn inactive_never_selected_even_if_oldest() {
            let sellers = vec![
                seller("old", 0).with_status(SellerStatus::Inactive),
                seller("leave", 1).with_status(SellerStatus::OnLeave),
                seller("new", 100).with_last_assignment_at(ts(1_000)),
            ];
            let next = select_next(&sellers, &SelectionPolicy::default()).unwrap();
            assert_eq!(next.id().as_str(), "new");
        }

        #[test]
        fn opted_out_never_selected() {
            let sellers = vec![seller("out", 0).with_participation(false)];
            assert!(select_next(&sellers, &SelectionPolicy::default()).is_none());
        }

        #[test]
        fn empty_roster_returns_none() {
            assert!(select_next(&[], &SelectionPolicy::default()).is_none());
            assert!(rank(&[], &SelectionPolicy::default()).is_empty());
        }

        #[test]
        fn all_inactive_returns_none() {
            let sellers = vec![
                seller("a", 0).with_status(SellerStatus::Inactive),
                seller("b", 0).with_status(SellerStatus::OnLeave),
            ];
            assert!(select_next(&sellers, &SelectionPolicy::default()).is_none());
        }

        #[test]
        fn overloaded_skipped_when_limit_set() {
            let sellers = vec![
                seller("busy", 0).with_pending_leads(5),
                seller("free", 10)
                    .with_pending_leads(4)
                    .with_last_assignment_at(ts(500)),
            ];
            let policy = SelectionPolicy::default().with_load_limit(5);
            let next = select_next(&sellers, &policy).unwrap();
            assert_eq!(next.id().as_str(), "free");
        }

        #[test]
        fn load_limit_ignored_without_skip_flag() {
            let sellers = vec![seller("busy", 0).with_pending_leads(50)];
            let policy = SelectionPolicy {
                max_pending_leads: Some(5),
                ..SelectionPolicy::default()
            };
            assert!(select_next(&sellers, &policy).is_some());
        }

        #[test]
        fn everyone_overloaded_returns_none() {
            let sellers = vec![seller("a", 0).with_pending_leads(3)];
            let policy = SelectionPolicy::default().with_load_limit(3);
            assert!(select_next(&sellers, &policy).is_none());
        }
    }

    mod methods {
        use super::*;

        #[test]
        fn load_balanced_prefers_fewer_pending() {
            let sellers = vec![
                seller("a", 0).with_pending_leads(3),
                seller("b", 0)
                    .with_pending_leads(1)
                    .with_last_assignment_at(ts(900)),
                seller("c", 0).with_pending_leads(1).with_last_assignment_at(ts(100)),
            ];
            let policy = SelectionPolicy::new(DistributionMethod::LoadBalanced);
            assert_eq!(ids(&rank(&sellers, &policy)), vec!["c", "b", "a"]);
        }

        #[test]
        fn performance_prefers_higher_conversion() {
            let sellers = vec![
                seller("a", 0).with_conversion_rate(Decimal::new(30, 0)).unwrap(),
                seller("b", 0)
                    .with_conversion_rate(Decimal::new(55, 0))
                    .unwrap()
                    .with_last_assignment_at(ts(10)),
            ];
            let policy = SelectionPolicy::new(DistributionMethod::Performance);
            assert_eq!(select_next(&sellers, &policy).unwrap().id().as_str(), "b");
        }

        #[test]
        fn speed_prefers_faster_and_puts_unmeasured_last() {
            let sellers = vec![
                seller("unknown", 0),
                seller("slow", 0).with_avg_response_minutes(45),
                seller("fast", 0).with_avg_response_minutes(5),
            ];
            let policy = SelectionPolicy::new(DistributionMethod::Speed);
            assert_eq!(ids(&rank(&sellers, &policy)), vec!["fast", "slow", "unknown"]);
        }

        #[test]
        fn method_ties_fall_back_to_recency() {
            let sellers = vec![
                seller("a", 0).with_avg_response_minutes(5).with_last_assignment_at(ts(50)),
                seller("b", 0).with_avg_response_minutes(5),
            ];
            let policy = SelectionPolicy::new(DistributionMethod::Speed);
            assert_eq!(select_next(&sellers, &policy).unwrap().id().as_str(), "b");
        }
    }

    #[test]
    fn selection_does_not_mutate_roster() {
        let sellers = vec![seller("a", 0), seller("b", 1)];
        let before = sellers.clone();
        let _ = select_next(&sellers, &SelectionPolicy::default());
        let _ = rank(&sellers, &SelectionPolicy::default());
        assert_eq!(sellers, before);
    }

    #[test]
    fn round_robin_visits_each_seller_once_per_cycle() {
        let mut sellers = vec![seller("a", 0), seller("b", 1), seller("c", 2)];
        let policy = SelectionPolicy::default();

        for cycle in 0..9 {
            let idx = {
                let next = select_next(&sellers, &policy).unwrap();
                sellers.iter().position(|s| s.id() == next.id()).unwrap()
            };
            sellers[idx].record_assignment(ts(1_000 + cycle)).unwrap();
        }

        for s in &sellers {
            assert_eq!(s.assignment_count(), 3, "{}", s.id());
        }
    }
}
