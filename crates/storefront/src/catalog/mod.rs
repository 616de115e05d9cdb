//! Catalog reconciliation: dedup and ordering of multi-source product feeds.
//!
//! The backend's product listing mixes vendor (Shopify) and affiliate
//! records that can describe the same physical product under different
//! identifiers. This module merges repeated paginated fetches into one
//! deduplicated, stably ordered list without a second backend round-trip:
//!
//! - [`identity`] - normalized identity keys (ASIN > UPC > name > id)
//! - [`score`] - "better record wins" preference comparison
//! - [`dedupe`] - the fold that keeps one record per identity key
//! - [`session`] - pagination accumulation, filter resets, in-flight
//!   guarding, and the memoized random display order
//! - [`view`] - client-side search and sort over the reconciled list

pub mod dedupe;
pub mod identity;
pub mod score;
pub mod session;
pub mod view;

pub use dedupe::dedupe;
pub use identity::{IdentityKey, normalize_key};
pub use score::preference_score;
pub use session::{CatalogSession, FetchTicket, OrderMemo, display_order};
pub use view::{SortOption, search, sort_records};
