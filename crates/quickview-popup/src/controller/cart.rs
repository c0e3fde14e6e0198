//! Add-to-cart submission and the cart notification.

use std::sync::Arc;

use quickview_core::AddedItem;

use crate::error::QuickViewError;
use crate::storefront::Storefront;
use crate::surface::Surface;

use super::{lock_state, QuickView};

/// Result of a successful [`QuickView::submit`] call.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The cart accepted one unit of the resolved variant.
    Added(AddedItem),
    /// No variant has been resolved; nothing was sent.
    NoVariant,
}

impl<S: Surface, C: Storefront> QuickView<S, C> {
    /// Adds one unit of the resolved variant to the cart and closes the popup.
    ///
    /// With cart notifications enabled, the notification is shown and the
    /// cart counter refreshed afterwards. A failed counter refresh is only
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`QuickViewError::AddToCart`] when the cart request fails;
    /// the popup stays open and the surface is left untouched.
    pub async fn submit(&self) -> Result<SubmitOutcome, QuickViewError> {
        let (variant_id, product_title) = {
            let state = self.lock();
            (
                state.resolved_variant_id,
                state.product.as_ref().map(|p| p.title.clone()),
            )
        };
        let Some(variant_id) = variant_id else {
            tracing::debug!("submit without a resolved variant ignored");
            return Ok(SubmitOutcome::NoVariant);
        };

        tracing::info!(variant_id, "adding to cart");
        let item = match self
            .storefront
            .add_to_cart(variant_id, 1, self.options.cart_encoding)
            .await
        {
            Ok(item) => item,
            Err(source) => {
                tracing::error!(variant_id, error = %source, "error adding to cart");
                return Err(QuickViewError::AddToCart { variant_id, source });
            }
        };
        tracing::info!(variant_id, quantity = item.quantity, "added to cart");

        self.close();

        if self.options.cart_notifications {
            let title = product_title.unwrap_or_else(|| item.title.clone());
            self.notify(&title);
            self.refresh_cart_count().await;
        }

        Ok(SubmitOutcome::Added(item))
    }

    /// Re-reads the cart and updates the counter on the surface.
    pub async fn refresh_cart_count(&self) {
        match self.storefront.fetch_cart().await {
            Ok(cart) => {
                tracing::debug!(item_count = cart.item_count, "cart count refreshed");
                self.lock().surface.set_cart_count(cart.item_count);
            }
            Err(e) => {
                tracing::warn!(error = %e, "error refreshing cart count");
            }
        }
    }

    /// Shows the cart notification for `title`, replacing any notification
    /// still on screen.
    ///
    /// The panel stays up for [`crate::QuickViewOptions::notification_visible`],
    /// then fades out and is hidden after
    /// [`crate::QuickViewOptions::notification_fade`]. Must be called from
    /// within a Tokio runtime.
    pub fn notify(&self, title: &str) {
        let text = self.options.notification_title(title);

        let mut state = self.lock();
        if let Some(timer) = state.notification_timer.take() {
            timer.abort();
        }
        state.notification_generation += 1;
        let generation = state.notification_generation;
        state.surface.show_notification(&text);

        let shared = Arc::clone(&self.state);
        let visible = self.options.notification_visible;
        let fade = self.options.notification_fade;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(visible).await;
            {
                let mut state = lock_state(&shared);
                if state.notification_generation != generation {
                    return;
                }
                state.surface.fade_out_notification();
            }
            tokio::time::sleep(fade).await;
            let mut state = lock_state(&shared);
            if state.notification_generation == generation {
                state.surface.hide_notification();
                state.notification_timer = None;
            }
        });
        state.notification_timer = Some(timer.abort_handle());
    }
}
