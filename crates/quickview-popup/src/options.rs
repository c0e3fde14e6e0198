use std::time::Duration;

use quickview_core::{AppConfig, CartEncoding, DEFAULT_MONEY_FORMAT};

/// Presentation and behaviour settings for one [`crate::QuickView`].
#[derive(Debug, Clone)]
pub struct QuickViewOptions {
    pub money_format: String,
    /// Size suffix for resized image URLs, e.g. `"600x"`.
    pub image_size: String,
    /// Length of the close transition; the modal is hidden afterwards.
    pub close_delay: Duration,
    /// How long the cart notification stays fully visible.
    pub notification_visible: Duration,
    /// Length of the notification fade-out before it is hidden.
    pub notification_fade: Duration,
    /// Product titles longer than this are cut and suffixed with `...`.
    pub notification_title_max_chars: usize,
    /// Show the cart notification and refresh the cart counter after an add.
    pub cart_notifications: bool,
    pub cart_encoding: CartEncoding,
}

impl Default for QuickViewOptions {
    fn default() -> Self {
        Self {
            money_format: DEFAULT_MONEY_FORMAT.to_owned(),
            image_size: "600x".to_owned(),
            close_delay: Duration::from_millis(200),
            notification_visible: Duration::from_millis(3000),
            notification_fade: Duration::from_millis(300),
            notification_title_max_chars: 20,
            cart_notifications: false,
            cart_encoding: CartEncoding::Form,
        }
    }
}

impl QuickViewOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            money_format: config.money_format.clone(),
            image_size: config.image_size.clone(),
            close_delay: Duration::from_millis(config.close_delay_ms),
            notification_visible: Duration::from_millis(config.notification_visible_ms),
            notification_fade: Duration::from_millis(config.notification_fade_ms),
            notification_title_max_chars: config.notification_title_max_chars,
            cart_notifications: config.cart_notifications,
            cart_encoding: config.cart_encoding,
        }
    }

    /// Cuts `title` to the configured length, appending `...` when cut.
    #[must_use]
    pub fn notification_title(&self, title: &str) -> String {
        let max = self.notification_title_max_chars;
        if title.chars().count() > max {
            let mut cut: String = title.chars().take(max).collect();
            cut.push_str("...");
            cut
        } else {
            title.to_owned()
        }
    }
}
