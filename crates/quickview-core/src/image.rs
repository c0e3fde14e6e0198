use std::sync::LazyLock;

use regex::{Captures, Regex};

static IMAGE_EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(jpg|jpeg|png|webp)").expect("valid image extension regex"));

/// Rewrites a CDN image URL to request a resized rendition.
///
/// The image CDN serves `name_600x.jpg` as a 600px-wide copy of `name.jpg`.
/// Only the first extension occurrence is rewritten; URLs without a known
/// extension are returned unchanged. No validation is done on the result.
#[must_use]
pub fn resize_image_url(url: &str, size: &str) -> String {
    IMAGE_EXT_RE
        .replace(url, |caps: &Captures<'_>| format!("_{size}.{}", &caps[1]))
        .into_owned()
}
