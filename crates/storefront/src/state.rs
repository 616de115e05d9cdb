//! Application state shared across surfaces.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::BackendClient;
use crate::cart::{CartStore, JsonFileStorage};
use crate::catalog::CatalogSession;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};

/// Application state shared across all surfaces.
///
/// Cheaply cloneable via `Arc`. The cart and catalog session sit behind
/// mutexes because surfaces hand state around freely, but all mutations
/// originate from discrete user input on one logical thread; lock
/// contention is not a real concern and guards are never held across
/// awaits.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: BackendClient,
    cart: Mutex<CartStore>,
    catalog: Mutex<CatalogSession>,
}

impl AppState {
    /// Create the application state from configuration.
    ///
    /// Hydrates the cart from the configured directory and builds the
    /// backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let backend = BackendClient::new(&config)?;
        let cart = CartStore::new(Box::new(JsonFileStorage::new(config.cart_dir.clone())));
        let catalog = CatalogSession::new(config.page_size);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                cart: Mutex::new(cart),
                catalog: Mutex::new(catalog),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Lock the cart store.
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the catalog session.
    pub fn catalog(&self) -> MutexGuard<'_, CatalogSession> {
        self.inner
            .catalog
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the catalog's category filter, resetting accumulation when it
    /// changes.
    pub fn set_category(&self, category: Option<String>) {
        self.catalog().set_category(category);
    }

    /// Fetch and merge the next catalog page for the active filter.
    ///
    /// Returns `Ok(false)` when a fetch was already in flight (the request
    /// is dropped, per the overlapping-load-more contract). A fetch failure
    /// leaves the reconciled list untouched and loading back at idle.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fetch fails.
    pub async fn load_more(&self) -> Result<bool> {
        let Some(ticket) = self.catalog().begin_fetch() else {
            return Ok(false);
        };

        let fetched = self
            .backend()
            .get_products(ticket.category(), ticket.limit(), ticket.offset())
            .await;

        match fetched {
            Ok(page) => Ok(self.catalog().complete_fetch(ticket, page)),
            Err(e) => {
                self.catalog().fail_fetch(ticket);
                Err(AppError::Backend(e))
            }
        }
    }
}
