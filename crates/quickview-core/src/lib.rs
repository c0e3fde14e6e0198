pub mod app_config;
pub mod config;
pub mod error;
pub mod image;
pub mod money;
pub mod product;
pub mod sanitize;
pub mod variant;

pub use app_config::{AppConfig, CartEncoding, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use image::resize_image_url;
pub use money::{format_money, parse_cents, DEFAULT_MONEY_FORMAT};
pub use product::{AddedItem, Cart, CartItem, FeaturedImage, Product, ProductOption, Variant};
pub use sanitize::sanitize_description;
pub use variant::{build_option_sets, resolve_variant, OptionSet, Resolution, Selection};
