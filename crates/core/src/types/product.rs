//! Product records as returned by the marketplace backend.
//!
//! A `ProductRecord` is one listing row from `GET /api/products`. The same
//! physical product can appear more than once across sources (a vendor
//! storefront and an affiliate marketplace), under different `id`s; the
//! storefront's catalog reconciler collapses those using the `asin`/`upc`/
//! name signals carried here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// Origin of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductSource {
    /// Third-party marketplace listing (Amazon, eBay) with an affiliate link.
    Affiliate,
    /// Directly connected vendor storefront (Shopify).
    Shopify,
    /// Origin not reported by the backend.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ProductSource {
    /// Whether this listing originates from an affiliate marketplace.
    #[must_use]
    pub const fn is_affiliate(self) -> bool {
        matches!(self, Self::Affiliate)
    }
}

/// One product listing from the backend feed.
///
/// All optional fields are tolerated as absent; in particular a missing
/// `best_price` means "price unknown", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Source-assigned identifier. Not guaranteed unique across sources.
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Best known price across tracked sources, if any.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub best_price: Option<Decimal>,
    #[serde(default)]
    pub source: ProductSource,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub is_preorder: bool,
    /// Amazon catalog identifier, when the listing was matched to one.
    #[serde(default)]
    pub asin: Option<String>,
    /// Universal product code, when known.
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u64>,
    /// Outbound affiliate link for listings purchasable off-site.
    #[serde(default)]
    pub affiliate_url: Option<String>,
}
