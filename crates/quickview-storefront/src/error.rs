use thiserror::Error;

/// Errors returned by [`crate::StorefrontClient`].
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not the JSON shape the endpoint promises.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The cart refused the line (sold out, quantity limit, unknown variant).
    #[error("cart rejected the item ({status}): {description}")]
    CartRejected { status: u16, description: String },

    #[error("add-to-cart response from {url} contained no items")]
    EmptyAddResponse { url: String },

    #[error("invalid store URL \"{store_url}\": {reason}")]
    InvalidStoreUrl { store_url: String, reason: String },

    #[error("invalid product handle \"{handle}\": {reason}")]
    InvalidHandle { handle: String, reason: String },
}
