//! Shopify-style money formatting.
//!
//! A money template is free text with `{{token}}` placeholders, e.g.
//! `"${{amount}}"` or `"{{amount_with_comma_separator}} €"`. Amounts are
//! always given in minor units.
//!
//! | Token | `123456` renders as |
//! |---|---|
//! | `amount` | `1234.56` |
//! | `amount_no_decimals` | `1234` |
//! | `amount_with_comma_separator` | `1234,56` |
//! | `amount_no_decimals_with_comma_separator` | `1,234` |
//!
//! Unknown tokens render as the empty string.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Template used when a store does not configure one.
pub const DEFAULT_MONEY_FORMAT: &str = "${{amount}}";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid money token regex"));
static FRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d+").expect("valid fraction regex"));

/// Formats `cents` (minor units) through a money template.
#[must_use]
pub fn format_money(cents: i64, format: &str) -> String {
    let amount = amount_with_decimals(cents);
    let whole = cents.div_euclid(100);

    TOKEN_RE
        .replace_all(format, |caps: &Captures<'_>| match &caps[1] {
            "amount" => amount.clone(),
            "amount_no_decimals" => whole.to_string(),
            "amount_with_comma_separator" => amount.replace('.', ","),
            "amount_no_decimals_with_comma_separator" => group_thousands(whole),
            _ => String::new(),
        })
        .into_owned()
}

/// Parses a price given as text into minor units.
///
/// Older theme code passed prices around as strings such as `"1299.00"`;
/// anything after the first decimal point is dropped before parsing.
/// Returns `None` if what remains is not an integer.
#[must_use]
pub fn parse_cents(raw: &str) -> Option<i64> {
    FRACTION_RE.replace(raw.trim(), "").parse::<i64>().ok()
}

/// `cents / 100` with exactly two decimal places.
fn amount_with_decimals(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Inserts `,` between every group of three digits.
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_with_default_format() {
        assert_eq!(format_money(12345, DEFAULT_MONEY_FORMAT), "$123.45");
    }

    #[test]
    fn amount_pads_minor_units() {
        assert_eq!(format_money(5, "{{amount}}"), "0.05");
        assert_eq!(format_money(100, "{{amount}}"), "1.00");
        assert_eq!(format_money(0, "{{amount}}"), "0.00");
    }

    #[test]
    fn amount_does_not_group_thousands() {
        assert_eq!(format_money(123_456_789, "{{amount}}"), "1234567.89");
    }

    #[test]
    fn amount_no_decimals_truncates() {
        assert_eq!(format_money(12399, "{{amount_no_decimals}}"), "123");
    }

    #[test]
    fn amount_with_comma_separator_swaps_decimal_point() {
        assert_eq!(
            format_money(12345, "{{amount_with_comma_separator}} €"),
            "123,45 €"
        );
    }

    #[test]
    fn no_decimals_with_comma_separator_groups_thousands() {
        assert_eq!(
            format_money(
                100_000,
                "...{{amount_no_decimals_with_comma_separator}}..."
            ),
            "...1,000..."
        );
        assert_eq!(
            format_money(123_456_789, "{{amount_no_decimals_with_comma_separator}}"),
            "1,234,567"
        );
        assert_eq!(
            format_money(99_900, "{{amount_no_decimals_with_comma_separator}}"),
            "999"
        );
    }

    #[test]
    fn tokens_allow_inner_whitespace() {
        assert_eq!(format_money(2500, "${{ amount }}"), "$25.00");
    }

    #[test]
    fn unknown_token_renders_empty() {
        assert_eq!(format_money(2500, "[{{amount_in_words}}]"), "[]");
    }

    #[test]
    fn template_without_tokens_is_unchanged() {
        assert_eq!(format_money(2500, "FREE"), "FREE");
    }

    #[test]
    fn multiple_tokens_in_one_template() {
        assert_eq!(
            format_money(250_050, "{{amount}} ({{amount_no_decimals_with_comma_separator}})"),
            "2500.50 (2,500)"
        );
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(format_money(-12345, "{{amount}}"), "-123.45");
        assert_eq!(format_money(-5, "{{amount}}"), "-0.05");
        assert_eq!(
            format_money(-100_000, "{{amount_no_decimals_with_comma_separator}}"),
            "-1,000"
        );
    }

    #[test]
    fn parse_cents_strips_fraction() {
        assert_eq!(parse_cents("1299"), Some(1299));
        assert_eq!(parse_cents("1299.00"), Some(1299));
        assert_eq!(parse_cents(" 42 "), Some(42));
        assert_eq!(parse_cents("abc"), None);
        assert_eq!(parse_cents(""), None);
    }
}
