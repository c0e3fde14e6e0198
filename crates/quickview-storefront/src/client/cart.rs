//! Cart endpoints for `StorefrontClient`.

use quickview_core::{AddedItem, Cart, CartEncoding};
use serde::Deserialize;
use serde_json::json;

use crate::error::StorefrontError;

use super::{check_status, decode_json, StorefrontClient};

/// Response shape of `/cart/add.js` when lines are posted as a JSON `items` array.
#[derive(Debug, Deserialize)]
struct AddedItems {
    items: Vec<AddedItem>,
}

impl StorefrontClient {
    /// Reads the current cart from `/cart.js`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_product`], minus the handle validation.
    pub async fn fetch_cart(&self) -> Result<Cart, StorefrontError> {
        let url = self.endpoint("cart.js")?;
        self.get_json(url, "cart").await
    }

    /// Adds `quantity` units of `variant_id` to the cart via `/cart/add.js`.
    ///
    /// Sent exactly once: a POST that timed out may still have been applied,
    /// so it is never retried.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::CartRejected`]: HTTP 422 (sold out, limit reached).
    /// - [`StorefrontError::EmptyAddResponse`]: JSON-encoded add answered with
    ///   an empty `items` array.
    /// - [`StorefrontError::Http`], [`StorefrontError::NotFound`],
    ///   [`StorefrontError::RateLimited`], [`StorefrontError::UnexpectedStatus`],
    ///   [`StorefrontError::Deserialize`].
    pub async fn add_to_cart(
        &self,
        variant_id: i64,
        quantity: u32,
        encoding: CartEncoding,
    ) -> Result<AddedItem, StorefrontError> {
        let url = self.endpoint("cart/add.js")?;
        tracing::debug!(variant_id, quantity, %encoding, "adding to cart");

        let request = self
            .client
            .post(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header("X-Requested-With", "XMLHttpRequest");
        let request = match encoding {
            CartEncoding::Form => request.form(&[
                ("id", variant_id.to_string()),
                ("quantity", quantity.to_string()),
            ]),
            CartEncoding::Json => request.json(&json!({
                "items": [{ "id": variant_id, "quantity": quantity }]
            })),
        };

        let response = check_status(request.send().await?, &url).await?;
        let context = format!("cart add of variant {variant_id}");
        match encoding {
            CartEncoding::Form => decode_json::<AddedItem>(response, &context).await,
            CartEncoding::Json => decode_json::<AddedItems>(response, &context)
                .await?
                .items
                .into_iter()
                .next()
                .ok_or_else(|| StorefrontError::EmptyAddResponse {
                    url: url.to_string(),
                }),
        }
    }
}
