//! Storefront response types for the public `.js` endpoints.
//!
//! ## Observed shape of `GET /products/{handle}.js`
//!
//! ### Prices
//! Integers in minor currency units (`2500` = `$25.00`), unlike the admin and
//! `products.json` endpoints which return decimal strings.
//!
//! ### `options`
//! Current themes return objects (`{"name": "Size", "position": 1, "values": [...]}`);
//! some older stores still return bare strings (`["Size"]`). Both are accepted.
//!
//! ### Option slots
//! A variant carries up to three option values in `option1`..`option3`. The
//! option declared at index `i` of `options` reads slot `option{i+1}`.
//! Unused slots are `null`.
//!
//! ### `images`
//! Protocol-relative CDN URLs (`//cdn.shopify.com/...`) in display order.

use serde::{Deserialize, Serialize};

/// Maximum number of option slots a variant carries.
pub const MAX_OPTION_SLOTS: usize = 3;

/// A product as returned by `GET /products/{handle}.js`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,

    pub title: String,

    /// URL slug, e.g. `"blue-shirt"`.
    #[serde(default)]
    pub handle: String,

    /// Storefront price in minor units (the lowest variant price).
    #[serde(default)]
    pub price: i64,

    #[serde(default)]
    pub compare_at_price: Option<i64>,

    #[serde(default)]
    pub vendor: Option<String>,

    #[serde(default = "default_available")]
    pub available: bool,

    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,

    /// Raw HTML description. Must go through
    /// [`crate::sanitize_description`] before display.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub options: Vec<ProductOption>,

    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Returns the first image URL, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Looks up a variant by id.
    #[must_use]
    pub fn variant(&self, id: i64) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Returns the slot index (0-based) of the option called `name`,
    /// compared case-insensitively.
    #[must_use]
    pub fn option_slot(&self, name: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.name.eq_ignore_ascii_case(name))
            .filter(|&slot| slot < MAX_OPTION_SLOTS)
    }
}

/// A declared product option such as `"Size"` or `"Color"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProductOption")]
pub struct ProductOption {
    pub name: String,
    pub position: Option<u32>,
    /// Values as declared by the store. Selectors are built from the variants
    /// instead; see [`crate::build_option_sets`].
    pub values: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductOption {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        position: Option<u32>,
        #[serde(default)]
        values: Vec<String>,
    },
}

impl From<RawProductOption> for ProductOption {
    fn from(raw: RawProductOption) -> Self {
        match raw {
            RawProductOption::Name(name) => Self {
                name,
                position: None,
                values: Vec::new(),
            },
            RawProductOption::Full {
                name,
                position,
                values,
            } => Self {
                name,
                position,
                values,
            },
        }
    }
}

/// A single purchasable variant of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,

    /// Combined option label, e.g. `"Large / Blue"` or `"Default Title"`.
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,

    /// Price in minor units.
    pub price: i64,

    #[serde(default)]
    pub compare_at_price: Option<i64>,

    #[serde(default = "default_available")]
    pub available: bool,

    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
}

impl Variant {
    /// Returns the option value stored in `slot` (0-based), if present.
    #[must_use]
    pub fn option_value(&self, slot: usize) -> Option<&str> {
        match slot {
            0 => self.option1.as_deref(),
            1 => self.option2.as_deref(),
            2 => self.option3.as_deref(),
            _ => None,
        }
    }
}

/// Variant-specific image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Cart state from `GET /cart.js`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub item_count: u32,
    #[serde(default)]
    pub total_price: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// A line in [`Cart::items`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub variant_id: i64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: i64,
}

/// The line item echoed back by `POST /cart/add.js`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddedItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub variant_id: i64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub handle: Option<String>,
}

/// Default for `available` when the field is absent (optimistic).
fn default_available() -> bool {
    true
}
