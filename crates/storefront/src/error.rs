//! Unified error handling.
//!
//! Provides a unified `AppError` type aggregating the module-level errors.
//! Library code returns the specific module error; binaries and the shared
//! [`crate::state::AppState`] surface work in terms of `AppError`.

use thiserror::Error;

use crate::backend::BackendError;
use crate::cart::CartError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Cart operation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Precondition not met (empty cart at checkout, missing address).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("cart is empty".to_string());
        assert_eq!(err.to_string(), "Bad request: cart is empty");

        let err = AppError::Cart(CartError::InvalidQuantity(0));
        assert_eq!(err.to_string(), "Cart error: quantity must be at least 1 (got 0)");
    }
}
