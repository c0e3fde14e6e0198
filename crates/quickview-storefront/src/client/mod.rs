//! HTTP client for the storefront's AJAX endpoints.

mod cart;
mod origin;

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use quickview_core::Product;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::StorefrontError;
use crate::retry::retry_with_backoff;

pub use origin::extract_store_origin;
#[cfg(test)]
use origin::extract_domain;

/// Characters escaped when a handle is placed in a URL path. Handles are
/// normally `[a-z0-9-]`; anything else is percent-encoded.
const HANDLE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// HTTP client for `/products/{handle}.js`, `/cart.js` and `/cart/add.js`.
///
/// Non-2xx responses become typed errors. Reads are retried on transient
/// errors with exponential backoff; the cart write is sent once. The client
/// keeps a cookie store so the cart session survives between calls.
pub struct StorefrontClient {
    client: Client,
    /// Store origin with a trailing slash, e.g. `https://shop.example.com/`.
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl StorefrontClient {
    /// Creates a client for the store at `store_url`.
    ///
    /// Any path on `store_url` is dropped; only the origin is used.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidStoreUrl`] if no origin can be parsed.
    /// - [`StorefrontError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        store_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, StorefrontError> {
        let origin = extract_store_origin(store_url);
        let base_url =
            Url::parse(&format!("{origin}/")).map_err(|e| StorefrontError::InvalidStoreUrl {
                store_url: store_url.to_owned(),
                reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// The store origin every request is sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches a product by handle from `/products/{handle}.js`.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidHandle`]: empty handle or one containing `/`.
    /// - [`StorefrontError::NotFound`]: no product with that handle.
    /// - [`StorefrontError::Deserialize`]: the body is not a product (e.g. an
    ///   HTML password page).
    /// - [`StorefrontError::Http`], [`StorefrontError::RateLimited`],
    ///   [`StorefrontError::UnexpectedStatus`]: after retries are exhausted.
    pub async fn fetch_product(&self, handle: &str) -> Result<Product, StorefrontError> {
        let url = self.product_url(handle)?;
        tracing::debug!(handle, url = %url, "fetching product");
        self.get_json(url, &format!("product \"{handle}\"")).await
    }

    /// Builds the product URL for `handle`.
    fn product_url(&self, handle: &str) -> Result<Url, StorefrontError> {
        let trimmed = handle.trim();
        if trimmed.is_empty() {
            return Err(StorefrontError::InvalidHandle {
                handle: handle.to_owned(),
                reason: "handle is empty".to_owned(),
            });
        }
        if trimmed.contains('/') {
            return Err(StorefrontError::InvalidHandle {
                handle: handle.to_owned(),
                reason: "handle must not contain '/'".to_owned(),
            });
        }

        let encoded = utf8_percent_encode(trimmed, HANDLE_ENCODE_SET);
        self.endpoint(&format!("products/{encoded}.js"))
    }

    fn endpoint(&self, path: &str) -> Result<Url, StorefrontError> {
        self.base_url
            .join(path)
            .map_err(|e| StorefrontError::InvalidStoreUrl {
                store_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    /// GETs `url` with retries and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, StorefrontError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .header("X-Requested-With", "XMLHttpRequest")
                    .send()
                    .await?;
                let response = check_status(response, &url).await?;
                decode_json(response, context).await
            }
        })
        .await
    }
}

/// Maps non-2xx responses to typed errors.
///
/// A 422 from the cart carries a JSON `description` explaining the refusal;
/// it becomes [`StorefrontError::CartRejected`].
async fn check_status(response: Response, url: &Url) -> Result<Response, StorefrontError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(StorefrontError::RateLimited {
            domain: origin::extract_domain(url.as_str()),
            retry_after_secs,
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(StorefrontError::NotFound {
            url: url.to_string(),
        });
    }

    if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
        let body = response.text().await.unwrap_or_default();
        let description = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("description")
                    .or_else(|| v.get("message"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| "cart rejected the request".to_owned());
        return Err(StorefrontError::CartRejected {
            status: status.as_u16(),
            description,
        });
    }

    Err(StorefrontError::UnexpectedStatus {
        status: status.as_u16(),
        url: url.to_string(),
    })
}

async fn decode_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, StorefrontError> {
    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| StorefrontError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
