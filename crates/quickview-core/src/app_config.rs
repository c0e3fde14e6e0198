#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Request body encoding used for `POST /cart/add.js`.
///
/// The two storefront themes this widget shipped with disagreed: one posted
/// a form (`id`, `quantity`), the other a JSON `items` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartEncoding {
    #[default]
    Form,
    Json,
}

impl std::fmt::Display for CartEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartEncoding::Form => write!(f, "form"),
            CartEncoding::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Storefront root, e.g. `"https://shop.example.com"`.
    pub store_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Money template with `{{amount}}`-style placeholders.
    pub money_format: String,
    /// Size suffix inserted before image extensions, e.g. `"600x"`.
    pub image_size: String,
    /// Delay between starting the close transition and hiding the modal.
    pub close_delay_ms: u64,
    pub notification_visible_ms: u64,
    pub notification_fade_ms: u64,
    pub notification_title_max_chars: usize,
    /// Show the add-to-cart notification and refresh the cart counter.
    pub cart_notifications: bool,
    pub cart_encoding: CartEncoding,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}
