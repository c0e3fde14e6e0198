/// CSS classes that mark an element as a quick view trigger.
const TRIGGER_CLASSES: &[&str] = &["quick-view", "quick-view-icon"];

/// A clicked element that may open the quick view.
///
/// Built by the host from the nearest ancestor of the click target that
/// carries one of the trigger classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    classes: Vec<String>,
    product_handle: Option<String>,
}

impl Trigger {
    /// `class_list` is the element's whitespace-separated `class` attribute;
    /// `product_handle` its `data-product-handle` attribute.
    #[must_use]
    pub fn new(class_list: &str, product_handle: Option<&str>) -> Self {
        Self {
            classes: class_list.split_whitespace().map(str::to_owned).collect(),
            product_handle: product_handle.map(str::to_owned),
        }
    }

    #[must_use]
    pub fn is_quick_view(&self) -> bool {
        self.classes
            .iter()
            .any(|c| TRIGGER_CLASSES.contains(&c.as_str()))
    }

    /// The product handle, if present and non-blank.
    #[must_use]
    pub fn product_handle(&self) -> Option<&str> {
        self.product_handle
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}
