//! Integration tests for Card Compass.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p card-compass-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart round-trips through real file storage
//! - `catalog_session` - Multi-page reconciliation across the public API
//!
//! Everything here runs against the public crate APIs only, with no live
//! backend; fetch results are simulated through the session's ticket
//! interface.

#![cfg_attr(not(test), forbid(unsafe_code))]

use card_compass_core::{CartLineItem, ProductId, ProductRecord, ProductSource};
use rust_decimal::Decimal;

/// Build a minimal product record for session tests.
#[must_use]
pub fn product(id: &str, name: &str, category: &str) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
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

/// Build a cart line with a price in cents.
#[must_use]
pub fn cart_line(id: &str, price_cents: i64, quantity: u32) -> CartLineItem {
    CartLineItem {
        product_id: ProductId::new(id),
        name: format!("Product {id}"),
        unit_price: Decimal::new(price_cents, 2),
        quantity,
        image_url: None,
    }
}
