pub mod client;
pub mod error;
mod retry;

pub use client::{extract_store_origin, StorefrontClient};
pub use error::StorefrontError;
