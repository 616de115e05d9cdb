//! Wire types for the marketplace backend REST API.
//!
//! These mirror the backend's JSON shapes exactly; the storefront maps into
//! them at the edges and otherwise passes them through untouched. Money
//! fields travel as JSON numbers, hence the `rust_decimal::serde::float`
//! annotations.

use card_compass_core::{CustomerId, ListingId, ProductId, ProductRecord, StoreId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Product listing
// =============================================================================

/// One page of `GET /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    /// Total matching products, when the backend reports it. Absence is
    /// tolerated; the running accumulated count becomes the best estimate.
    #[serde(default)]
    pub total: Option<u64>,
}

// =============================================================================
// Cart optimization
// =============================================================================

/// Shipping destination for optimization and checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for ShippingAddress {
    fn default() -> Self {
        Self {
            name: String::new(),
            street: String::new(),
            city: String::new(),
            province: "ON".to_string(),
            postal_code: String::new(),
            country: "CA".to_string(),
        }
    }
}

/// One cart line as submitted to `POST /api/cart/optimize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizeRequestItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Request body for `POST /api/cart/optimize`.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeRequest {
    pub items: Vec<OptimizeRequestItem>,
    pub shipping_address: ShippingAddress,
}

/// One optimized line as chosen by the backend's shipping optimizer.
///
/// Echoed back verbatim in the checkout submission; the storefront never
/// recomputes any of these figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedItem {
    pub product_id: ProductId,
    pub listing_id: ListingId,
    pub source: String,
    pub source_name: String,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub product_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_preorder: Option<bool>,
}

/// Response body of `POST /api/cart/optimize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResponse {
    /// Fulfillment strategy label (e.g., `bundle:<store>` or `split`).
    pub strategy: String,
    pub items: Vec<OptimizedItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_product_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_shipping_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub savings: Decimal,
    pub currency: String,
}

// =============================================================================
// Checkout
// =============================================================================

/// Request body for `POST /api/checkout`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub items: Vec<OptimizedItem>,
    pub customer_email: String,
    pub shipping_address: ShippingAddress,
    pub user_id: Option<CustomerId>,
    pub save_payment_method: bool,
}

/// Hosted checkout session for vendor-fulfilled items.
#[derive(Debug, Clone, Deserialize)]
pub struct HostedCheckout {
    #[serde(default)]
    pub session_id: Option<String>,
    pub url: String,
}

/// Off-site purchase redirect for an affiliate-fulfilled item.
#[derive(Debug, Clone, Deserialize)]
pub struct AffiliateRedirect {
    pub product_id: ProductId,
    #[serde(default)]
    pub affiliate_name: Option<String>,
    pub url: String,
}

/// Response body of `POST /api/checkout`.
///
/// Either or both fulfillment paths can be present: a hosted checkout URL
/// for vendor items and redirects for affiliate items.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub shopify_checkout: Option<HostedCheckout>,
    #[serde(default)]
    pub affiliate_redirects: Vec<AffiliateRedirect>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_page_tolerates_missing_total() {
        let page: ProductPage =
            serde_json::from_str(r#"{"products": [{"id": "p1", "name": "Box"}]}"#).unwrap();
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.total, None);
    }

    #[test]
    fn test_optimization_response_parses_backend_numbers() {
        let json = r#"{
            "strategy": "bundle:vendor-1",
            "items": [{
                "product_id": "p1",
                "listing_id": "l1",
                "source": "shopify",
                "source_name": "Vendor One",
                "store_id": "s1",
                "quantity": 2,
                "unit_price": 10.5,
                "product_total": 21.0,
                "shipping_total": 4.99,
                "total_price": 25.99
            }],
            "total_product_price": 21.0,
            "total_shipping_cost": 4.99,
            "total_price": 25.99,
            "savings": 3.5,
            "currency": "CAD"
        }"#;
        let response: OptimizationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.savings, Decimal::new(35, 1));
        let item = response.items.first().unwrap();
        assert_eq!(item.unit_price, Decimal::new(105, 1));
        assert_eq!(item.is_preorder, None);
    }

    #[test]
    fn test_checkout_response_both_paths_optional() {
        let response: CheckoutResponse = serde_json::from_str("{}").unwrap();
        assert!(response.shopify_checkout.is_none());
        assert!(response.affiliate_redirects.is_empty());

        let response: CheckoutResponse = serde_json::from_str(
            r#"{
                "shopify_checkout": {"session_id": "cs_123", "url": "https://pay.example/cs_123"},
                "affiliate_redirects": [{"product_id": "p1", "affiliate_name": "Amazon", "url": "https://amzn.example/x"}]
            }"#,
        )
        .unwrap();
        assert_eq!(
            response.shopify_checkout.unwrap().url,
            "https://pay.example/cs_123"
        );
        assert_eq!(response.affiliate_redirects.len(), 1);
    }
}
