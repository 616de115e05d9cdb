//! Marketplace backend API client.
//!
//! Plain REST over JSON with `reqwest`. Product pages are cached in-memory
//! (`moka`, 60 second TTL) so flipping between category filters does not
//! refetch pages the session just saw; cart optimization and checkout are
//! never cached.

mod types;

pub use types::{
    AffiliateRedirect, CheckoutRequest, CheckoutResponse, HostedCheckout, OptimizationResponse,
    OptimizeRequest, OptimizeRequestItem, ProductPage, ShippingAddress,
};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::StorefrontConfig;

/// Product page cache TTL.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Errors that can occur when calling the backend API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or build a request.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the marketplace backend REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: url::Url,
    product_cache: Cache<String, ProductPage>,
}

impl BackendClient {
    /// Create a new backend API client.
    ///
    /// The bearer token, when configured, is attached to every request as a
    /// default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the configured
    /// token is not a valid header value.
    pub fn new(config: &StorefrontConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        if let Some(token) = config.api_token_value() {
            let auth_value = format!("Bearer {token}");
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| BackendError::Parse(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert("Authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let product_cache = Cache::builder()
            .max_capacity(128)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.api_base_url.clone(),
                product_cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, BackendError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| BackendError::Parse(format!("Invalid endpoint {path}: {e}")))
    }

    /// Fetch one page of the product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend responds with a
    /// non-success status, or the payload does not parse.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        category: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> Result<ProductPage, BackendError> {
        let cache_key = format!("products:{}:{limit}:{offset}", category.unwrap_or(""));

        // Check cache
        if let Some(page) = self.inner.product_cache.get(&cache_key).await {
            debug!("Cache hit for product page");
            return Ok(page);
        }

        let mut endpoint = self.endpoint("/api/products")?;
        {
            let mut pairs = endpoint.query_pairs_mut();
            if let Some(category) = category {
                pairs.append_pair("category", category);
            }
            pairs.append_pair("limit", &limit.to_string());
            pairs.append_pair("offset", &offset.to_string());
        }

        let response = self.inner.client.get(endpoint).send().await?;
        let page: ProductPage = parse_response(response).await?;

        // Cache the result
        self.inner
            .product_cache
            .insert(cache_key, page.clone())
            .await;

        Ok(page)
    }

    /// Run the backend's cart/shipping optimizer over the given lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a
    /// success payload.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn optimize_cart(
        &self,
        request: &OptimizeRequest,
    ) -> Result<OptimizationResponse, BackendError> {
        let endpoint = self.endpoint("/api/cart/optimize")?;
        let response = self.inner.client.post(endpoint).json(request).send().await?;
        parse_response(response).await
    }

    /// Submit an optimized cart for checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a
    /// success payload.
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn submit_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResponse, BackendError> {
        let endpoint = self.endpoint("/api/checkout")?;
        let response = self.inner.client.post(endpoint).json(request).send().await?;
        parse_response(response).await
    }
}

/// Check status, then parse the JSON body.
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: message.chars().take(200).collect(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        BackendError::Parse(e.to_string())
    })
}
