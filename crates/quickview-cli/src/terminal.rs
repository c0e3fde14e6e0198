//! A [`Surface`] that keeps the popup's fields in memory and renders them as
//! plain text.

use quickview_core::OptionSet;
use quickview_popup::Surface;

#[derive(Debug, Default)]
pub(crate) struct TerminalSurface {
    pub(crate) displayed: bool,
    pub(crate) title: String,
    pub(crate) price: String,
    pub(crate) image: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) selectors: Vec<OptionSet>,
    pub(crate) variant_id: Option<String>,
}

impl TerminalSurface {
    /// Renders the popup body as it would appear when open.
    pub(crate) fn render(&self) -> String {
        let mut lines = vec![self.title.clone(), format!("  price:   {}", self.price)];
        if let Some(image) = &self.image {
            lines.push(format!("  image:   {image}"));
        }
        lines.extend(
            self.selectors
                .iter()
                .map(|set| format!("  {}: {}", set.name, set.values.join(" | "))),
        );
        if let Some(id) = &self.variant_id {
            lines.push(format!("  variant: {id}"));
        }
        if let Some(description) = &self.description {
            lines.push(format!("\n{description}"));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Surface for TerminalSurface {
    fn show_modal(&mut self) {
        self.displayed = true;
    }

    fn hide_modal(&mut self) {
        self.displayed = false;
    }

    fn set_active(&mut self, active: bool) {
        tracing::trace!(active, "modal active state");
    }

    fn focus_close_control(&mut self) {}

    fn set_scroll_locked(&mut self, locked: bool) {
        tracing::trace!(locked, "page scroll lock");
    }

    fn set_title(&mut self, text: &str) {
        text.clone_into(&mut self.title);
    }

    fn set_price(&mut self, text: &str) {
        text.clone_into(&mut self.price);
    }

    fn set_image(&mut self, src: &str, _alt: &str) {
        self.image = Some(src.to_owned());
    }

    fn clear_image(&mut self) {
        self.image = None;
    }

    fn set_description_html(&mut self, html: &str) {
        self.description = Some(html.to_owned());
    }

    fn clear_description(&mut self) {
        self.description = None;
    }

    fn render_selectors(&mut self, option_sets: &[OptionSet]) {
        self.selectors.extend_from_slice(option_sets);
    }

    fn clear_selectors(&mut self) {
        self.selectors.clear();
    }

    fn has_variant_id_field(&self) -> bool {
        self.variant_id.is_some()
    }

    fn create_variant_id_field(&mut self, variant_id: &str) {
        self.variant_id = Some(variant_id.to_owned());
    }

    fn set_variant_id_field(&mut self, variant_id: &str) {
        self.variant_id = Some(variant_id.to_owned());
    }

    fn set_cart_count(&mut self, count: u32) {
        println!("cart: {count} item(s)");
    }

    fn show_notification(&mut self, title: &str) {
        println!("added to cart: {title}");
    }
}
