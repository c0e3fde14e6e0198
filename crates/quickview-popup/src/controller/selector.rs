//! Variant selection for the open product.

use quickview_core::{
    build_option_sets, format_money, resize_image_url, resolve_variant, Resolution, Selection,
};

use crate::options::QuickViewOptions;
use crate::storefront::Storefront;
use crate::surface::Surface;

use super::{PopupState, QuickView};

impl<S: Surface, C: Storefront> QuickView<S, C> {
    /// Records the shopper picking `value` for option `name` and re-resolves
    /// the variant.
    ///
    /// `name` must belong to a rendered selector (compared
    /// case-insensitively). Any other name returns [`Resolution::NotFound`]
    /// and leaves the selection untouched.
    pub fn select_option(&self, name: &str, value: &str) -> Resolution {
        let mut state = self.lock();
        if state.product.is_none() {
            return Resolution::NotFound;
        }
        if !state
            .option_sets
            .iter()
            .any(|set| set.name.eq_ignore_ascii_case(name))
        {
            tracing::warn!(option = name, value, "no selector for option, pick ignored");
            return Resolution::NotFound;
        }
        state.selection.set(name, value);
        state.apply_selection(&self.options)
    }

    /// Resolves the current selection against the product's variants.
    ///
    /// On [`Resolution::Found`] the price, image and hidden variant id field
    /// are updated. Otherwise nothing changes and the previously resolved
    /// variant stays in effect.
    pub fn resolve_selection(&self) -> Resolution {
        self.lock().apply_selection(&self.options)
    }
}

impl<S: Surface> PopupState<S> {
    /// Derives option sets for the current product, renders them and
    /// resets the selection to each option's first value.
    pub(super) fn build_selectors(&mut self) {
        let Some(product) = &self.product else {
            return;
        };
        let option_sets = build_option_sets(product);

        self.surface.clear_selectors();
        self.surface.render_selectors(&option_sets);
        self.selection = Selection::from_defaults(&option_sets);
        self.option_sets = option_sets;
    }

    pub(super) fn apply_selection(&mut self, options: &QuickViewOptions) -> Resolution {
        let Some(product) = &self.product else {
            return Resolution::NotFound;
        };

        let resolution = resolve_variant(product, &self.selection);
        match &resolution {
            Resolution::Found(variant) => {
                self.surface
                    .set_price(&format_money(variant.price, &options.money_format));
                if let Some(image) = &variant.featured_image {
                    self.surface.set_image(
                        &resize_image_url(&image.src, &options.image_size),
                        &product.title,
                    );
                }

                let id = variant.id.to_string();
                if self.surface.has_variant_id_field() {
                    self.surface.set_variant_id_field(&id);
                } else {
                    self.surface.create_variant_id_field(&id);
                }
                self.resolved_variant_id = Some(variant.id);
                tracing::debug!(variant_id = variant.id, "variant resolved");
            }
            Resolution::NotFound => {
                tracing::warn!(
                    product = %product.title,
                    selection = ?self.selection,
                    retained = ?self.resolved_variant_id,
                    "no variant matches selection, keeping previous variant"
                );
            }
            Resolution::Ambiguous(count) => {
                tracing::warn!(
                    product = %product.title,
                    selection = ?self.selection,
                    matches = count,
                    retained = ?self.resolved_variant_id,
                    "selection matches several variants, keeping previous variant"
                );
            }
        }
        resolution
    }
}
