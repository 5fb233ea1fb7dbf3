//! Turning a cleaned tree back into markup
//!
//! Serialization itself is html5ever's. On top of it this module performs the
//! two steps owed after a pass:
//!
//! 1. strip [`EMPTY_ELEMENT_SENTINEL`] from the text, and
//! 2. drop any tag token whose name is not a whitelist key, and any comment
//!    unless `#comment` is one, as a backstop against serializer surprises.

use crate::cleaner::EMPTY_ELEMENT_SENTINEL;
use crate::error::{Result, SanitizeError};
use crate::policy::SanitizePolicy;
use crate::tree::COMMENT_NAME;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use markup5ever_rcdom::{Handle, SerializableHandle};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// A comment, or a tag token whose name is capture 1
///
/// Quoted attribute values may hold a raw `<`, `<!--` or `-->`; serialized
/// text never does. Scanning left to right and consuming quoted values whole
/// keeps a value from being read as a token of its own.
fn markup_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<!--.*?-->|</?([A-Za-z][A-Za-z0-9:-]*)(?:[^<>"]|"[^"]*")*>"#)
            .expect("valid regex")
    })
}

/// Serialize the children of `root` as HTML
pub fn serialize_children(root: &Handle) -> Result<String> {
    let mut bytes = Vec::new();
    let handle: SerializableHandle = root.clone().into();
    serialize(
        &mut bytes,
        &handle,
        SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        },
    )?;

    String::from_utf8(bytes).map_err(|e| {
        SanitizeError::Serialize(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Serialize a cleaned root and apply the post-serialization steps
///
/// ```
/// use html_whitelist_sanitizer::cleaner::clean;
/// use html_whitelist_sanitizer::output::render_html;
/// use html_whitelist_sanitizer::parser::parse_html;
/// use html_whitelist_sanitizer::policy::SanitizePolicy;
///
/// let policy = SanitizePolicy::default();
/// let document = parse_html("<p></p><script>x</script>").unwrap();
/// let body = document.body().unwrap();
/// clean(&body, &policy).unwrap();
///
/// assert_eq!(render_html(&body, &policy).unwrap(), "<p></p>");
/// ```
pub fn render_html(root: &Handle, policy: &SanitizePolicy) -> Result<String> {
    let serialized = serialize_children(root)?;
    let without_sentinel = serialized.replace(EMPTY_ELEMENT_SENTINEL, "");
    Ok(restrict_to_whitelist(&without_sentinel, policy).trim().to_string())
}

/// Remove tag tokens and comments the policy does not whitelist
pub fn restrict_to_whitelist(html: &str, policy: &SanitizePolicy) -> String {
    markup_token_regex()
        .replace_all(html, |caps: &Captures| {
            let name = match caps.get(1) {
                Some(tag) => tag.as_str().to_lowercase(),
                None => COMMENT_NAME.to_string(),
            };
            if policy.allows_tag(&name) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}
