use quickview_storefront::StorefrontError;
use thiserror::Error;

/// Failures the controller reports back to its host.
///
/// Both variants have already been reflected on the surface where the
/// popup has something to show (the load error text); the host decides
/// whether to do more.
#[derive(Debug, Error)]
pub enum QuickViewError {
    #[error("failed to load product \"{handle}\": {source}")]
    Load {
        handle: String,
        #[source]
        source: StorefrontError,
    },

    #[error("failed to add variant {variant_id} to cart: {source}")]
    AddToCart {
        variant_id: i64,
        #[source]
        source: StorefrontError,
    },
}
