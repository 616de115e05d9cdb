//! Persisted shopping cart.
//!
//! Single source of truth for the user's in-progress order selection: an
//! ordered collection of line items, at most one per product id, with
//! insertion order as display order. Every mutation writes the whole
//! collection through the injected [`CartStorage`] adapter; storage
//! failures degrade the cart to in-memory-only for the session instead of
//! surfacing errors to callers.

mod storage;

pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};

use card_compass_core::{CartLineItem, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Fixed storage key for the persisted cart record.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Current persisted payload schema version.
const CART_PAYLOAD_VERSION: u32 = 1;

/// Cart operation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity must be at least 1; the store rejects rather than trusting
    /// callers to clamp.
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(u32),
}

/// Versioned on-disk cart payload.
///
/// The version field exists so a future schema change can migrate or
/// discard old carts explicitly instead of failing to parse them.
#[derive(Debug, Serialize, Deserialize)]
struct CartPayload {
    version: u32,
    items: Vec<CartLineItem>,
    saved_at: DateTime<Utc>,
}

/// The persisted shopping cart.
pub struct CartStore {
    items: Vec<CartLineItem>,
    storage: Box<dyn CartStorage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a cart hydrated from the given storage adapter.
    ///
    /// A missing, unreadable, unparsable, or unknown-version payload yields
    /// an empty cart; hydration never fails.
    #[must_use]
    pub fn new(storage: Box<dyn CartStorage>) -> Self {
        let items = hydrate(storage.as_ref());
        Self { items, storage }
    }

    /// Line items in insertion (display) order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `unit_price * quantity` over all lines, recomputed on demand
    /// at full decimal precision. Display layers own currency rounding.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Add a line item.
    ///
    /// If a line with the same product id already exists its quantity is
    /// incremented by `item.quantity`; otherwise the line is appended,
    /// preserving insertion order. Price and name are accepted as given:
    /// authoritative pricing is re-derived server-side at optimization and
    /// checkout time, never from these display values.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero quantity.
    pub fn add_item(&mut self, item: CartLineItem) -> Result<(), CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity(item.quantity));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == item.product_id)
        {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }

        self.persist();
        Ok(())
    }

    /// Remove the line for `product_id`. No-op (not an error) when absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|line| &line.product_id != product_id);
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Overwrite the quantity of the line for `product_id`. No-op when the
    /// product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero quantity; use
    /// [`Self::remove_item`] to drop a line.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| &line.product_id == product_id)
        {
            line.quantity = quantity;
            self.persist();
        }
        Ok(())
    }

    /// Empty the cart. Used after successful order submission.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Write the full collection through the storage adapter. Failures are
    /// logged and swallowed; the in-memory cart stays authoritative for the
    /// session.
    fn persist(&self) {
        let payload = CartPayload {
            version: CART_PAYLOAD_VERSION,
            items: self.items.clone(),
            saved_at: Utc::now(),
        };

        let serialized = match serde_json::to_string(&payload) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize cart payload: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.save(CART_STORAGE_KEY, &serialized) {
            warn!("Cart persistence failed, continuing in memory: {e}");
        }
    }
}

/// Load saved line items, defaulting to empty on any failure.
fn hydrate(storage: &dyn CartStorage) -> Vec<CartLineItem> {
    let raw = match storage.load(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Cart storage unreadable, starting empty: {e}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<CartPayload>(&raw) {
        Ok(payload) if payload.version == CART_PAYLOAD_VERSION => payload.items,
        Ok(payload) => {
            warn!(
                version = payload.version,
                "Unknown cart payload version, starting empty"
            );
            Vec::new()
        }
        Err(e) => {
            warn!("Corrupt cart payload, starting empty: {e}");
            Vec::new()
        }
    }
}
