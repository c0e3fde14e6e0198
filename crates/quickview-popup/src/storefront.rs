use std::future::Future;

use quickview_core::{AddedItem, Cart, CartEncoding, Product};
use quickview_storefront::{StorefrontClient, StorefrontError};

/// The storefront endpoints the controller depends on.
pub trait Storefront: Send + Sync + 'static {
    fn fetch_product(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Product, StorefrontError>> + Send;

    fn fetch_cart(&self) -> impl Future<Output = Result<Cart, StorefrontError>> + Send;

    fn add_to_cart(
        &self,
        variant_id: i64,
        quantity: u32,
        encoding: CartEncoding,
    ) -> impl Future<Output = Result<AddedItem, StorefrontError>> + Send;
}

impl Storefront for StorefrontClient {
    fn fetch_product(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Product, StorefrontError>> + Send {
        StorefrontClient::fetch_product(self, handle)
    }

    fn fetch_cart(&self) -> impl Future<Output = Result<Cart, StorefrontError>> + Send {
        StorefrontClient::fetch_cart(self)
    }

    fn add_to_cart(
        &self,
        variant_id: i64,
        quantity: u32,
        encoding: CartEncoding,
    ) -> impl Future<Output = Result<AddedItem, StorefrontError>> + Send {
        StorefrontClient::add_to_cart(self, variant_id, quantity, encoding)
    }
}
