//! The rendering surface the controller draws into.

use quickview_core::OptionSet;

/// Where a pointer action inside the popup landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed area around the content, i.e. the modal container itself.
    Backdrop,
    /// Anywhere inside the content panel.
    Content,
    /// The close button.
    CloseControl,
}

/// Host-provided view of the popup.
///
/// The controller never reads display state back except for
/// [`Surface::has_variant_id_field`]; everything else is write-only.
/// Implementations should be cheap: every method is called while the
/// controller's state lock is held.
///
/// The notification and cart counter methods default to no-ops for hosts
/// whose page has no such elements.
pub trait Surface: Send + 'static {
    /// Make the modal container displayed (not yet visually active).
    fn show_modal(&mut self);
    /// Remove the modal container from display.
    fn hide_modal(&mut self);
    /// Toggle the active state that drives the open/close transition.
    fn set_active(&mut self, active: bool);
    fn focus_close_control(&mut self);
    /// Suspend or restore background page scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    fn set_title(&mut self, text: &str);
    fn set_price(&mut self, text: &str);
    fn set_image(&mut self, src: &str, alt: &str);
    fn clear_image(&mut self);
    /// Insert already-sanitised description markup.
    fn set_description_html(&mut self, html: &str);
    fn clear_description(&mut self);
    /// Render one selector per option set, each preselecting its first value.
    fn render_selectors(&mut self, option_sets: &[OptionSet]);
    fn clear_selectors(&mut self);

    /// Whether the add-to-cart form already carries the hidden variant id field.
    fn has_variant_id_field(&self) -> bool;
    fn create_variant_id_field(&mut self, variant_id: &str);
    fn set_variant_id_field(&mut self, variant_id: &str);

    fn set_cart_count(&mut self, _count: u32) {}
    /// Show the added-to-cart panel and start its fade-in.
    fn show_notification(&mut self, _title: &str) {}
    fn fade_out_notification(&mut self) {}
    fn hide_notification(&mut self) {}
}
