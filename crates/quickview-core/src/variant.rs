//! Option-set derivation and variant resolution.
//!
//! A product declares up to three options (e.g. `Size`, `Color`); every
//! variant carries one value per option in the matching slot. The selector
//! UI shows one choice list per option and the shopper's picks resolve to
//! a single variant.

use crate::product::{Product, Variant};

/// Option name Shopify assigns to products without real variants.
const DEFAULT_OPTION_NAME: &str = "Title";
/// Sole value of [`DEFAULT_OPTION_NAME`].
const DEFAULT_OPTION_VALUE: &str = "Default Title";

/// The choices offered for one product option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    pub name: String,
    /// Distinct values in first-seen variant order.
    pub values: Vec<String>,
}

/// Derives the selectable option sets for `product`.
///
/// Values come from the variants, not from the declared option values, so
/// a selector never offers a value no variant carries. The synthetic
/// `Title` / `Default Title` option is skipped, as are options with no
/// values at all.
#[must_use]
pub fn build_option_sets(product: &Product) -> Vec<OptionSet> {
    product
        .options
        .iter()
        .enumerate()
        .filter_map(|(slot, option)| {
            let mut values: Vec<String> = Vec::new();
            for value in product.variants.iter().filter_map(|v| v.option_value(slot)) {
                if !value.is_empty() && !values.iter().any(|seen| seen == value) {
                    values.push(value.to_owned());
                }
            }

            if option.name == DEFAULT_OPTION_NAME
                && values.first().map(String::as_str) == Some(DEFAULT_OPTION_VALUE)
            {
                return None;
            }
            if values.is_empty() {
                tracing::debug!(option = %option.name, slot, "option has no variant values — no selector");
                return None;
            }

            Some(OptionSet {
                name: option.name.clone(),
                values,
            })
        })
        .collect()
}

/// The shopper's current picks, option name → value, in selector order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<(String, String)>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection a freshly rendered set of selectors starts with: the
    /// first value of every option.
    #[must_use]
    pub fn from_defaults(option_sets: &[OptionSet]) -> Self {
        let entries = option_sets
            .iter()
            .filter_map(|set| set.values.first().map(|v| (set.name.clone(), v.clone())))
            .collect();
        Self { entries }
    }

    /// Sets `name` to `value`, replacing any earlier pick for the same
    /// option (names compared case-insensitively).
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            value.clone_into(&mut entry.1);
        } else {
            self.entries.push((name.to_owned(), value.to_owned()));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of matching a [`Selection`] against a product's variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one variant matches.
    Found(Variant),
    /// No variant carries this combination.
    NotFound,
    /// The selection matches more than one variant (malformed data or an
    /// option without a selector).
    Ambiguous(usize),
}

/// Finds the variant whose option slots equal every pick in `selection`.
///
/// Selection names are matched to the product's declared options
/// case-insensitively; a pick for an undeclared option matches nothing.
/// Value comparison is exact.
#[must_use]
pub fn resolve_variant(product: &Product, selection: &Selection) -> Resolution {
    let mut criteria = Vec::with_capacity(selection.len());
    for (name, value) in selection.iter() {
        let Some(slot) = product.option_slot(name) else {
            return Resolution::NotFound;
        };
        criteria.push((slot, value));
    }

    let mut matches = product.variants.iter().filter(|variant| {
        criteria
            .iter()
            .all(|&(slot, value)| variant.option_value(slot) == Some(value))
    });

    match (matches.next(), matches.count()) {
        (None, _) => Resolution::NotFound,
        (Some(variant), 0) => Resolution::Found(variant.clone()),
        (Some(_), rest) => Resolution::Ambiguous(rest + 1),
    }
}

#[cfg(test)]
#[path = "variant_test.rs"]
mod tests;
