//! Defensive clean-up of product description HTML.
//!
//! Descriptions are merchant-authored `body_html` and are displayed as
//! markup. The storefront is expected to sanitise them already; this pass
//! strips the constructs that execute code or restyle the page anyway.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Elements removed together with their content.
const BLOCKED_CONTAINERS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "form", "noscript", "template",
];

static BLOCKED_CONTAINER_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BLOCKED_CONTAINERS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("valid blocked container regex")
        })
        .collect()
});

/// Leftover blocked tags: unclosed containers, void elements, stray closers.
static BLOCKED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)</?(?:script|style|iframe|object|embed|form|noscript|template|link|meta|base)\b[^>]*>",
    )
    .expect("valid blocked tag regex")
});

static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[a-zA-Z][^>]*>").expect("valid open tag regex"));

/// Inline `on*` handlers. Browsers accept `/` as well as whitespace before
/// an attribute name. Group 1 matches a quoted value of some other
/// attribute so it is skipped whole.
static EVENT_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)("[^"]*"|'[^']*')|[\s/]+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#)
        .expect("valid event attribute regex")
});

/// URL attributes with a script scheme. Group 1 as above; group 2 is the
/// separator, group 3 the attribute name.
static SCRIPT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)("[^"]*"|'[^']*')|([\s/]+)(href|src|action|formaction|xlink:href)\s*=\s*(?:"\s*(?:javascript|vbscript):[^"]*"|'\s*(?:javascript|vbscript):[^']*'|(?:javascript|vbscript):[^\s>]*)"#,
    )
    .expect("valid script url regex")
});

/// Returns `html` with script-capable markup removed.
///
/// Removes blocked elements (with content), inline `on*` handlers and
/// `javascript:`/`vbscript:` URLs. Everything else, including text, is kept
/// as-is.
#[must_use]
pub fn sanitize_description(html: &str) -> String {
    let mut cleaned = html.to_owned();
    for re in BLOCKED_CONTAINER_RES.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    cleaned = BLOCKED_TAG_RE.replace_all(&cleaned, "").into_owned();

    let result = OPEN_TAG_RE
        .replace_all(&cleaned, |caps: &Captures<'_>| {
            let tag = EVENT_ATTR_RE.replace_all(&caps[0], |attr: &Captures<'_>| {
                attr.get(1).map_or_else(String::new, |quoted| quoted.as_str().to_owned())
            });
            SCRIPT_URL_RE
                .replace_all(&tag, |attr: &Captures<'_>| match attr.get(1) {
                    Some(quoted) => quoted.as_str().to_owned(),
                    None => format!("{}{}=\"#\"", &attr[2], &attr[3]),
                })
                .into_owned()
        })
        .into_owned();

    if result.len() != html.len() {
        tracing::debug!(
            original_len = html.len(),
            sanitized_len = result.len(),
            "stripped unsafe markup from product description"
        );
    }
    result
}
