//! Catalog view session: pagination accumulation and display ordering.
//!
//! A session owns everything scoped to "one catalog view against one
//! category filter": the accumulated record list across load-more fetches,
//! the reconciled (deduplicated, ordered) output, and the random-order
//! memo. Changing the filter resets all of it and invalidates any fetch
//! still in flight, whose response is then discarded on arrival.
//!
//! Fetch I/O lives elsewhere ([`crate::backend`]); the session hands out a
//! [`FetchTicket`] describing what to fetch and validates the ticket when
//! the result comes back. This keeps the accumulation logic synchronous
//! and independently testable, and makes the in-flight guard explicit:
//! [`CatalogSession::begin_fetch`] refuses to issue a second ticket while
//! one is outstanding, because merging overlapping offsets out of order is
//! not safe.

use std::cmp::Ordering;
use std::collections::HashMap;

use card_compass_core::{ProductId, ProductRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::backend::ProductPage;

use super::dedupe::dedupe;

/// Session-scoped map from product id to its memoized random tiebreak.
///
/// Assigned the first time an id survives reconciliation and reused on
/// every later pass, so "load more" never re-shuffles already-visible
/// items. Explicit state passed into [`display_order`], never a module
/// global.
#[derive(Debug, Default)]
pub struct OrderMemo {
    values: HashMap<ProductId, f64>,
}

impl OrderMemo {
    /// Create an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids with an assigned order value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no order values have been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop all assignments (filter reset).
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// The memoized value for an id, assigning a fresh random one on first
    /// sight.
    fn get_or_assign(&mut self, id: &ProductId, rng: &mut impl Rng) -> f64 {
        if let Some(value) = self.values.get(id) {
            return *value;
        }
        let value = rng.random::<f64>();
        self.values.insert(id.clone(), value);
        value
    }
}

/// Order a reconciled record list for display.
///
/// In unfiltered ("all categories") mode, sorts by each record's memoized
/// random value, assigning values on first appearance. When a category
/// filter is active the randomization is skipped entirely and backend
/// (first-seen) order is preserved.
pub fn display_order(
    records: &mut [ProductRecord],
    memo: &mut OrderMemo,
    rng: &mut impl Rng,
    category_filtered: bool,
) {
    if category_filtered {
        return;
    }
    for record in records.iter() {
        memo.get_or_assign(&record.id, rng);
    }
    // Stable sort: records whose values somehow tie keep first-seen order.
    records.sort_by(|a, b| {
        let va = memo.values.get(&a.id).copied().unwrap_or_default();
        let vb = memo.values.get(&b.id).copied().unwrap_or_default();
        va.partial_cmp(&vb).unwrap_or(Ordering::Equal)
    });
}

/// Description of one sanctioned fetch against the backend listing.
///
/// Issued by [`CatalogSession::begin_fetch`] and consumed by
/// [`CatalogSession::complete_fetch`] or [`CatalogSession::fail_fetch`].
/// Carries the filter generation it was issued under so a response that
/// outlives a filter change is recognized as stale.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    offset: u64,
    limit: u32,
    category: Option<String>,
}

impl FetchTicket {
    /// Offset to request from the backend.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Page size to request.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Category filter to request, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Accumulation state for one catalog view.
#[derive(Debug)]
pub struct CatalogSession {
    category: Option<String>,
    accumulated: Vec<ProductRecord>,
    reconciled: Vec<ProductRecord>,
    memo: OrderMemo,
    rng: StdRng,
    page_size: u32,
    /// Bumped on every filter change; tickets from older generations are
    /// discarded on arrival.
    generation: u64,
    in_flight: bool,
    reported_total: Option<u64>,
    /// Set when a fetch came back short (or empty): no more pages.
    exhausted: bool,
}

impl CatalogSession {
    /// Create a session with an OS-seeded order RNG.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self::with_rng(page_size, StdRng::from_os_rng())
    }

    /// Create a session with a caller-supplied RNG (deterministic tests).
    #[must_use]
    pub fn with_rng(page_size: u32, rng: StdRng) -> Self {
        Self {
            category: None,
            accumulated: Vec::new(),
            reconciled: Vec::new(),
            memo: OrderMemo::new(),
            rng,
            page_size,
            generation: 0,
            in_flight: false,
            reported_total: None,
            exhausted: false,
        }
    }

    /// The reconciled, display-ordered record list.
    #[must_use]
    pub fn products(&self) -> &[ProductRecord] {
        &self.reconciled
    }

    /// Active category filter, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Whether a fetch ticket is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Raw accumulated record count (pre-dedup), the running best estimate
    /// of how much of the catalog has been fetched.
    #[must_use]
    pub fn accumulated_len(&self) -> usize {
        self.accumulated.len()
    }

    /// Records the backend still holds for this filter, when knowable.
    ///
    /// `Some(n)` when the backend reported a total or a short page proved
    /// the feed exhausted; `None` while the remainder is unknown.
    #[must_use]
    pub fn remaining(&self) -> Option<u64> {
        let fetched = u64::try_from(self.accumulated.len()).unwrap_or(u64::MAX);
        match self.reported_total {
            Some(total) => Some(total.saturating_sub(fetched)),
            None if self.exhausted => Some(0),
            None => None,
        }
    }

    /// Switch the active category filter.
    ///
    /// A changed filter discards the accumulated list, the reconciled
    /// output, and the order memo, and invalidates any outstanding ticket.
    /// Setting the same filter again is a no-op.
    pub fn set_category(&mut self, category: Option<String>) {
        if self.category == category {
            return;
        }
        debug!(
            from = self.category.as_deref().unwrap_or("all"),
            to = category.as_deref().unwrap_or("all"),
            "catalog filter changed, resetting accumulation"
        );
        self.category = category;
        self.accumulated.clear();
        self.reconciled.clear();
        self.memo.clear();
        self.reported_total = None;
        self.exhausted = false;
        self.generation += 1;
        self.in_flight = false;
    }

    /// Start a load-more fetch, if none is outstanding.
    ///
    /// Returns `None` while a previous ticket for this filter is still in
    /// flight; callers must drop the request rather than issue a second
    /// overlapping fetch.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight {
            debug!("load-more refused: fetch already in flight");
            return None;
        }
        self.in_flight = true;
        Some(FetchTicket {
            generation: self.generation,
            offset: u64::try_from(self.accumulated.len()).unwrap_or(u64::MAX),
            limit: self.page_size,
            category: self.category.clone(),
        })
    }

    /// Merge a completed fetch.
    ///
    /// Returns `false` when the ticket predates a filter change; the page
    /// is discarded and nothing else happens. Otherwise appends the page to
    /// the accumulated list (an empty page only updates count tracking) and
    /// re-runs dedup + ordering over the full accumulated set.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, page: ProductPage) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket_offset = ticket.offset,
                "discarding stale fetch response after filter change"
            );
            return false;
        }
        self.in_flight = false;

        if let Some(total) = page.total {
            self.reported_total = Some(total);
        }
        if page.products.len() < ticket.limit as usize {
            self.exhausted = true;
        }
        if page.products.is_empty() {
            return true;
        }

        self.accumulated.extend(page.products);
        self.reconcile();
        true
    }

    /// Record a failed fetch: the previously reconciled list stays visible
    /// and loading returns to idle.
    pub fn fail_fetch(&mut self, ticket: FetchTicket) {
        if ticket.generation == self.generation {
            self.in_flight = false;
        }
    }

    fn reconcile(&mut self) {
        let mut unique = dedupe(&self.accumulated);
        display_order(
            &mut unique,
            &mut self.memo,
            &mut self.rng,
            self.category.is_some(),
        );
        self.reconciled = unique;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use card_compass_core::ProductSource;

    fn record(id: &str, name: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            name: name.to_string(),
            category: String::new(),
            image_url: None,
            description: None,
            best_price: None,
            source: ProductSource::Unknown,
            in_stock: false,
            is_preorder: false,
            asin: None,
            upc: None,
            rating: None,
            review_count: None,
            affiliate_url: None,
        }
    }

    fn page(records: Vec<ProductRecord>, total: Option<u64>) -> ProductPage {
        ProductPage {
            products: records,
            total,
        }
    }

    fn session() -> CatalogSession {
        // Fixed seed keeps ordering assertions reproducible.
        CatalogSession::with_rng(2, StdRng::seed_from_u64(7))
    }

    fn ids(records: &[ProductRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_overlapping_pages_accumulate_deduplicated() {
        let mut s = session();
        s.set_category(Some("boxes".to_string()));

        let t = s.begin_fetch().unwrap();
        assert!(s.complete_fetch(t, page(vec![record("a", "Alpha"), record("b", "Beta")], None)));

        let t = s.begin_fetch().unwrap();
        assert!(s.complete_fetch(t, page(vec![record("b", "Beta"), record("c", "Gamma")], None)));

        // Filtered mode preserves first-seen order.
        assert_eq!(ids(s.products()), vec!["a", "b", "c"]);
        assert_eq!(s.accumulated_len(), 4);
    }

    #[test]
    fn test_in_flight_guard_refuses_second_fetch() {
        let mut s = session();
        let first = s.begin_fetch().unwrap();
        assert!(s.is_loading());
        assert!(s.begin_fetch().is_none());

        s.complete_fetch(first, page(vec![record("a", "Alpha")], None));
        assert!(!s.is_loading());
        assert!(s.begin_fetch().is_some());
    }

    #[test]
    fn test_filter_change_resets_and_discards_stale_response() {
        let mut s = session();
        let t = s.begin_fetch().unwrap();
        s.complete_fetch(t, page(vec![record("a", "Alpha")], Some(10)));
        assert!(!s.memo.is_empty());

        let stale = s.begin_fetch().unwrap();
        s.set_category(Some("sleeves".to_string()));

        // Old-filter records and memo are gone, offset restarts at 0.
        assert!(s.products().is_empty());
        assert!(s.memo.is_empty());
        assert_eq!(s.remaining(), None);
        let fresh = s.begin_fetch().unwrap();
        assert_eq!(fresh.offset(), 0);
        assert_eq!(fresh.category(), Some("sleeves"));

        // The pre-reset response arrives late and must not merge.
        assert!(!s.complete_fetch(stale, page(vec![record("z", "Zombie")], None)));
        assert!(s.products().is_empty());
        // The fresh ticket is still the live one.
        assert!(s.complete_fetch(fresh, page(vec![record("b", "Beta")], None)));
        assert_eq!(ids(s.products()), vec!["b"]);
    }

    #[test]
    fn test_failed_fetch_preserves_catalog() {
        let mut s = session();
        s.set_category(Some("boxes".to_string()));
        let t = s.begin_fetch().unwrap();
        s.complete_fetch(t, page(vec![record("a", "Alpha")], None));

        let t = s.begin_fetch().unwrap();
        s.fail_fetch(t);
        assert!(!s.is_loading());
        assert_eq!(ids(s.products()), vec!["a"]);
    }

    #[test]
    fn test_empty_page_updates_tracking_only() {
        let mut s = session();
        let t = s.begin_fetch().unwrap();
        s.complete_fetch(t, page(vec![record("a", "Alpha"), record("b", "Beta")], None));
        assert_eq!(s.remaining(), None);

        let before = ids(s.products())
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let t = s.begin_fetch().unwrap();
        assert!(s.complete_fetch(t, page(vec![], None)));
        assert_eq!(ids(s.products()), before);
        // Short (empty) page proves exhaustion.
        assert_eq!(s.remaining(), Some(0));
    }

    #[test]
    fn test_remaining_from_reported_total() {
        let mut s = session();
        let t = s.begin_fetch().unwrap();
        s.complete_fetch(t, page(vec![record("a", "Alpha"), record("b", "Beta")], Some(5)));
        assert_eq!(s.remaining(), Some(3));
    }

    #[test]
    fn test_unfiltered_random_order_stable_across_load_more() {
        let mut s = session();
        let t = s.begin_fetch().unwrap();
        s.complete_fetch(t, page(vec![record("a", "Alpha"), record("b", "Beta")], None));
        let first_pass = ids(s.products())
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        // The same records come back again alongside new ones.
        let t = s.begin_fetch().unwrap();
        s.complete_fetch(
            t,
            page(
                vec![record("b", "Beta"), record("c", "Gamma"), record("a", "Alpha")],
                None,
            ),
        );
        let second_pass = ids(s.products());

        // Relative order of a and b is unchanged from their first appearance.
        let pos = |id: &str, list: &[&str]| list.iter().position(|x| *x == id).unwrap();
        let a_before_b_first =
            first_pass.iter().position(|x| x == "a").unwrap()
                < first_pass.iter().position(|x| x == "b").unwrap();
        let a_before_b_second = pos("a", &second_pass) < pos("b", &second_pass);
        assert_eq!(a_before_b_first, a_before_b_second);
        assert_eq!(second_pass.len(), 3);
    }

    #[test]
    fn test_display_order_skipped_when_filtered() {
        let mut memo = OrderMemo::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut records = vec![record("a", "Alpha"), record("b", "Beta")];
        display_order(&mut records, &mut memo, &mut rng, true);
        assert_eq!(ids(&records), vec!["a", "b"]);
        assert!(memo.is_empty());
    }

    #[test]
    fn test_display_order_memo_reused() {
        let mut memo = OrderMemo::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut records = vec![record("a", "Alpha"), record("b", "Beta")];
        display_order(&mut records, &mut memo, &mut rng, false);
        let first = ids(&records).into_iter().map(String::from).collect::<Vec<_>>();

        // Reconciliation reruns from scratch; memo must pin the order.
        let mut records = vec![record("b", "Beta"), record("a", "Alpha")];
        display_order(&mut records, &mut memo, &mut rng, false);
        assert_eq!(ids(&records), first.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(memo.len(), 2);
    }
}
