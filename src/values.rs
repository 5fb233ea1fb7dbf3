//! Generic attribute-value sanitizers
//!
//! Each sanitizer is a pure function of the value and the policy. Only
//! `style`, `class`, `href` and `src` are rewritten; every other whitelisted
//! attribute passes through untouched.
//!
//! None of these is a grammar: style values are split per declaration and URLs
//! are only inspected for their scheme and stripped of characters that cannot
//! appear in a URL.

use crate::policy::SanitizePolicy;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Scheme whose URLs are blanked
const BLOCKED_SCHEME: &str = "javascript";

/// Sanitize the value of attribute `name` (lowercase) under `policy`
///
/// Returns `Cow::Borrowed` when the value is left as-is.
///
/// # Examples
///
/// ```
/// use html_whitelist_sanitizer::policy::SanitizePolicy;
/// use html_whitelist_sanitizer::values::sanitize_value;
///
/// let policy = SanitizePolicy::default().allow_classes(["contain", "sider"]);
/// assert_eq!(
///     sanitize_value("class", "contain sider float-right", &policy),
///     "contain sider"
/// );
/// assert_eq!(sanitize_value("href", "javascript:alert(1)", &policy), "");
/// assert_eq!(sanitize_value("title", "anything <goes>", &policy), "anything <goes>");
/// ```
pub fn sanitize_value<'a>(name: &str, value: &'a str, policy: &SanitizePolicy) -> Cow<'a, str> {
    match name {
        "style" => Cow::Owned(sanitize_style(value, policy.style_properties())),
        "class" => Cow::Owned(sanitize_class(value, policy.css_classes())),
        "href" | "src" => sanitize_url(value),
        _ => Cow::Borrowed(value),
    }
}

/// Keep only declarations whose property is whitelisted
///
/// Properties are trimmed and lowercased, values trimmed. Declarations without
/// a `:` or with an empty property are dropped. Survivors are joined with `;`
/// and always terminated by `;`, so a value with no survivor becomes `";"`.
pub fn sanitize_style(value: &str, allowed: &BTreeSet<String>) -> String {
    let mut style = value
        .split(';')
        .filter_map(|declaration| {
            let (property, property_value) = declaration.split_once(':')?;
            let property = property.trim().to_lowercase();
            if property.is_empty() || !allowed.contains(&property) {
                return None;
            }
            Some(format!("{}:{}", property, property_value.trim()))
        })
        .collect::<Vec<_>>()
        .join(";");
    style.push(';');
    style
}

/// Keep only whitelisted class tokens, in input order
pub fn sanitize_class(value: &str, allowed: &BTreeSet<String>) -> String {
    value
        .split_whitespace()
        .filter(|token| allowed.contains(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Blank `javascript:` URLs and strip characters not valid in a URL
pub fn sanitize_url(value: &str) -> Cow<'_, str> {
    let filtered = if value.chars().all(is_url_char) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.chars().filter(|c| is_url_char(*c)).collect())
    };

    // Filtering drops whitespace and control characters, so "java\tscript:"
    // is caught here as well.
    match url_scheme(&filtered) {
        Some(scheme) if scheme == BLOCKED_SCHEME => Cow::Owned(String::new()),
        _ => filtered,
    }
}

/// The lowercased text before the first `:`, if any
///
/// ```
/// use html_whitelist_sanitizer::values::url_scheme;
///
/// assert_eq!(url_scheme("JavaScript:alert(1)").as_deref(), Some("javascript"));
/// assert_eq!(url_scheme("/relative/path"), None);
/// ```
pub fn url_scheme(url: &str) -> Option<String> {
    let (scheme, _) = url.split_once(':')?;
    let scheme = scheme.trim();
    if scheme.is_empty() {
        None
    } else {
        Some(scheme.to_ascii_lowercase())
    }
}

/// Letters, digits and `$-_.+!*'(),{}|\^~[]`<>#%";/?:@&=`
fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=".contains(c)
}
