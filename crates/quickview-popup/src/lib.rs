//! Quick view popup controller.
//!
//! [`QuickView`] owns the popup's state (current product, option selection,
//! visibility) and drives an injected [`Surface`] for everything the
//! shopper sees. Product and cart data come through the [`Storefront`]
//! trait, implemented for [`quickview_storefront::StorefrontClient`].

pub mod controller;
pub mod error;
pub mod options;
pub mod storefront;
pub mod surface;
pub mod trigger;

pub use controller::{LoadOutcome, QuickView, SubmitOutcome, Visibility};
pub use error::QuickViewError;
pub use options::QuickViewOptions;
pub use storefront::Storefront;
pub use surface::{PointerTarget, Surface};
pub use trigger::Trigger;
