//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CARD_COMPASS_API_URL` - Base URL of the marketplace backend API
//!
//! ## Optional
//! - `CARD_COMPASS_API_TOKEN` - Bearer token for authenticated backend calls
//! - `CARD_COMPASS_CART_DIR` - Directory for the persisted cart (default: `.card-compass`)
//! - `CARD_COMPASS_PAGE_SIZE` - Products fetched per page (default: 24)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_PAGE_SIZE: u32 = 24;
const DEFAULT_CART_DIR: &str = ".card-compass";

const MIN_TOKEN_LENGTH: usize = 16;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the marketplace backend API.
    pub api_base_url: Url,
    /// Bearer token for authenticated backend calls, if any.
    pub api_token: Option<SecretString>,
    /// Directory holding the persisted cart file.
    pub cart_dir: PathBuf,
    /// Number of products fetched per catalog page.
    pub page_size: u32,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("cart_dir", &self.cart_dir)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the API token fails placeholder validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("CARD_COMPASS_API_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CARD_COMPASS_API_URL".to_string(), e.to_string())
            })?;

        let api_token = get_optional_env("CARD_COMPASS_API_TOKEN")
            .map(|token| {
                validate_token_strength(&token, "CARD_COMPASS_API_TOKEN")?;
                Ok(SecretString::from(token))
            })
            .transpose()?;

        let cart_dir =
            PathBuf::from(get_env_or_default("CARD_COMPASS_CART_DIR", DEFAULT_CART_DIR));

        let page_size = get_env_or_default("CARD_COMPASS_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CARD_COMPASS_PAGE_SIZE".to_string(), e.to_string())
            })?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CARD_COMPASS_PAGE_SIZE".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            api_token,
            cart_dir,
            page_size,
        })
    }

    /// Build a config suitable for tests, pointing at the given base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not a valid URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: base_url.parse::<Url>().map_err(|e| {
                ConfigError::InvalidEnvVar("base_url".to_string(), e.to_string())
            })?,
            api_token: None,
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Expose the API token for header construction, if configured.
    #[must_use]
    pub fn api_token_value(&self) -> Option<&str> {
        self.api_token.as_ref().map(ExposeSecret::expose_secret)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a token is not a placeholder and has a plausible length.
fn validate_token_strength(token: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    if token.len() < MIN_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_TOKEN_LENGTH} characters (got {})",
                token.len()
            ),
        ));
    }

    Ok(())
}
