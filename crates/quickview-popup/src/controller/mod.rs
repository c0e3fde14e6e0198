//! The quick view popup controller.
//!
//! One [`QuickView`] instance exists per page. It is created once, reused
//! for every opening, and owns all state the popup needs:
//!
//! - visibility and the pending close transition,
//! - the current product (kept after closing, replaced by the next load),
//! - option sets, the shopper's selection and the last resolved variant,
//! - the pending cart notification schedule.
//!
//! State sits behind a `std::sync::Mutex` that is never held across an
//! `.await`. Timers are spawned Tokio tasks; each carries a generation
//! number so a timer that lost the race against `open` or a newer
//! notification does nothing when it fires.

mod cart;
mod selector;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quickview_core::{
    format_money, resize_image_url, sanitize_description, OptionSet, Product, Selection,
};
use tokio::task::AbortHandle;

use crate::error::QuickViewError;
use crate::options::QuickViewOptions;
use crate::storefront::Storefront;
use crate::surface::{PointerTarget, Surface};
use crate::trigger::Trigger;

pub use cart::SubmitOutcome;

/// Title text while a product request is in flight.
const LOADING_TEXT: &str = "Loading...";
/// Title text when a product request fails.
const LOAD_ERROR_TEXT: &str = "Error loading product";

/// Popup visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    /// Held only while [`QuickView::open`] applies its presentational steps.
    Opening,
    Open,
    /// The close transition is running; the modal is still displayed.
    Closing,
}

/// Result of a successful [`QuickView::load`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The product was rendered and the popup opened.
    Shown,
    /// A newer load started while this one was in flight; the response was
    /// discarded.
    Superseded,
    /// The trigger was not a quick view trigger or had no handle.
    Ignored,
}

struct PopupState<S> {
    surface: S,
    visibility: Visibility,
    product: Option<Product>,
    option_sets: Vec<OptionSet>,
    selection: Selection,
    resolved_variant_id: Option<i64>,
    load_seq: u64,
    close_generation: u64,
    close_timer: Option<AbortHandle>,
    notification_generation: u64,
    notification_timer: Option<AbortHandle>,
}

/// Quick view popup controller.
///
/// Cloning is cheap and yields a handle to the same popup.
pub struct QuickView<S, C> {
    storefront: Arc<C>,
    options: Arc<QuickViewOptions>,
    state: Arc<Mutex<PopupState<S>>>,
}

impl<S, C> Clone for QuickView<S, C> {
    fn clone(&self) -> Self {
        Self {
            storefront: Arc::clone(&self.storefront),
            options: Arc::clone(&self.options),
            state: Arc::clone(&self.state),
        }
    }
}

fn lock_state<S>(state: &Mutex<PopupState<S>>) -> MutexGuard<'_, PopupState<S>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: Surface, C: Storefront> QuickView<S, C> {
    /// Creates a closed, empty popup drawing into `surface`.
    pub fn new(surface: S, storefront: C, options: QuickViewOptions) -> Self {
        Self {
            storefront: Arc::new(storefront),
            options: Arc::new(options),
            state: Arc::new(Mutex::new(PopupState {
                surface,
                visibility: Visibility::Closed,
                product: None,
                option_sets: Vec::new(),
                selection: Selection::new(),
                resolved_variant_id: None,
                load_seq: 0,
                close_generation: 0,
                close_timer: None,
                notification_generation: 0,
                notification_timer: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PopupState<S>> {
        lock_state(&self.state)
    }

    #[must_use]
    pub fn options(&self) -> &QuickViewOptions {
        &self.options
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.lock().visibility
    }

    /// A copy of the product currently held by the popup.
    #[must_use]
    pub fn current_product(&self) -> Option<Product> {
        self.lock().product.clone()
    }

    #[must_use]
    pub fn option_sets(&self) -> Vec<OptionSet> {
        self.lock().option_sets.clone()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.lock().selection.clone()
    }

    /// The variant the add-to-cart form would submit.
    #[must_use]
    pub fn resolved_variant_id(&self) -> Option<i64> {
        self.lock().resolved_variant_id
    }

    /// Runs `f` against the surface under the state lock.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock().surface)
    }

    // -----------------------------------------------------------------------
    // Visibility
    // -----------------------------------------------------------------------

    /// Shows the popup, focuses the close control and locks page scroll.
    ///
    /// No-op when already open. Cancels a running close transition.
    pub fn open(&self) {
        self.lock().open();
    }

    /// Starts the close transition; the modal is hidden and page scroll
    /// restored once [`QuickViewOptions::close_delay`] has passed.
    ///
    /// No-op when already closed or closing. Must be called from within a
    /// Tokio runtime.
    pub fn close(&self) {
        let mut state = self.lock();
        if !matches!(state.visibility, Visibility::Open | Visibility::Opening) {
            return;
        }

        state.surface.set_active(false);
        state.visibility = Visibility::Closing;
        state.close_generation += 1;
        let generation = state.close_generation;
        tracing::debug!(generation, "popup closing");

        let shared = Arc::clone(&self.state);
        let delay = self.options.close_delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock_state(&shared);
            if state.visibility == Visibility::Closing && state.close_generation == generation {
                state.surface.hide_modal();
                state.surface.set_scroll_locked(false);
                state.visibility = Visibility::Closed;
                state.close_timer = None;
                tracing::debug!("popup closed");
            }
        });
        state.close_timer = Some(timer.abort_handle());
    }

    /// Handles a key press anywhere on the page. Returns `true` when the key
    /// was consumed (`Escape` while the popup is open).
    pub fn handle_key(&self, key: &str) -> bool {
        if key == "Escape" && self.visibility() == Visibility::Open {
            self.close();
            return true;
        }
        false
    }

    /// Handles a pointer action inside the modal. Returns `true` when it
    /// dismissed the popup.
    pub fn handle_pointer(&self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Backdrop | PointerTarget::CloseControl => {
                let was_open = self.visibility() == Visibility::Open;
                self.close();
                was_open
            }
            PointerTarget::Content => false,
        }
    }

    // -----------------------------------------------------------------------
    // Product loading
    // -----------------------------------------------------------------------

    /// Loads the product behind a clicked trigger.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub async fn activate(&self, trigger: &Trigger) -> Result<LoadOutcome, QuickViewError> {
        if !trigger.is_quick_view() {
            return Ok(LoadOutcome::Ignored);
        }
        let Some(handle) = trigger.product_handle() else {
            tracing::debug!("quick view trigger without product handle ignored");
            return Ok(LoadOutcome::Ignored);
        };
        self.load(handle).await
    }

    /// Fetches `handle`, renders it and opens the popup.
    ///
    /// While the request is in flight the display fields are cleared and
    /// the title reads `"Loading..."`. The previous product, selection and
    /// resolved variant are dropped as soon as the load starts.
    ///
    /// # Errors
    ///
    /// Returns [`QuickViewError::Load`] when the request fails or the body
    /// is not a product. The title then reads `"Error loading product"` and
    /// the popup is not opened.
    pub async fn load(&self, handle: &str) -> Result<LoadOutcome, QuickViewError> {
        let seq = {
            let mut state = self.lock();
            state.load_seq += 1;
            state.reset_for_load();
            state.load_seq
        };
        tracing::debug!(handle, seq, "loading product");

        let result = self.storefront.fetch_product(handle).await;

        let mut state = self.lock();
        if state.load_seq != seq {
            tracing::debug!(
                handle,
                seq,
                latest = state.load_seq,
                "discarding stale product response"
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(product) => {
                state.render_product(product, &self.options);
                state.open();
                Ok(LoadOutcome::Shown)
            }
            Err(source) => {
                tracing::warn!(handle, error = %source, "error loading product");
                state.surface.set_title(LOAD_ERROR_TEXT);
                Err(QuickViewError::Load {
                    handle: handle.to_owned(),
                    source,
                })
            }
        }
    }
}

impl<S: Surface> PopupState<S> {
    fn open(&mut self) {
        let was_closed = match self.visibility {
            Visibility::Open | Visibility::Opening => return,
            Visibility::Closing => {
                if let Some(timer) = self.close_timer.take() {
                    timer.abort();
                }
                // Invalidate a timer that already fired but is waiting on the lock.
                self.close_generation += 1;
                false
            }
            Visibility::Closed => true,
        };

        self.visibility = Visibility::Opening;
        if was_closed {
            self.surface.show_modal();
            self.surface.set_scroll_locked(true);
        }
        self.surface.set_active(true);
        self.surface.focus_close_control();
        self.visibility = Visibility::Open;
        tracing::debug!(reopened = !was_closed, "popup open");
    }

    fn reset_for_load(&mut self) {
        self.product = None;
        self.option_sets.clear();
        self.selection = Selection::new();
        self.resolved_variant_id = None;

        self.surface.clear_image();
        self.surface.set_title(LOADING_TEXT);
        self.surface.set_price("");
        self.surface.clear_description();
        self.surface.clear_selectors();
    }

    fn render_product(&mut self, product: Product, options: &QuickViewOptions) {
        self.surface.set_title(&product.title);
        self.surface
            .set_price(&format_money(product.price, &options.money_format));

        if let Some(src) = product.first_image() {
            self.surface
                .set_image(&resize_image_url(src, &options.image_size), &product.title);
        }

        if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
            self.surface
                .set_description_html(&sanitize_description(description));
        }

        let has_variants = !product.variants.is_empty();
        self.product = Some(product);
        if has_variants {
            self.build_selectors();
            self.apply_selection(options);
        }
    }
}
