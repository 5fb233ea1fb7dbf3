//! End-to-end sanitizer: parse, clean, render
//!
//! [`HtmlSanitizer`] owns one policy and runs complete passes over markup
//! strings. It holds no per-pass state, so one instance can serve concurrent
//! callers through a shared reference.

use crate::cleaner::clean;
use crate::error::Result;
use crate::output::render_html;
use crate::parser::{HtmlDocument, parse_html};
use crate::policy::SanitizePolicy;
use crate::removal_log::RemovalLog;
use tracing::debug;

/// Output of a full pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedHtml {
    /// Sanitized markup
    pub html: String,
    /// Tags removed or replaced by text, in removal order
    pub removed: RemovalLog,
}

/// Whitelist sanitizer bound to a policy
///
/// # Usage
///
/// ```rust
/// use html_whitelist_sanitizer::policy::SanitizePolicy;
/// use html_whitelist_sanitizer::sanitizer::HtmlSanitizer;
///
/// let sanitizer = HtmlSanitizer::with_policy(
///     SanitizePolicy::default().allow_classes(["contain", "sider"]),
/// );
///
/// let result = sanitizer
///     .sanitize(r#"<div class="contain sider float-right">right</div><script>x()</script>"#)
///     .expect("sanitize");
/// assert_eq!(result.html, r#"<div class="contain sider">right</div>"#);
/// assert_eq!(result.removed.as_slice(), ["script"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlSanitizer {
    policy: SanitizePolicy,
}

impl HtmlSanitizer {
    /// Create a sanitizer with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SanitizePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SanitizePolicy {
        &self.policy
    }

    /// Mutable access for adjusting the policy between passes
    pub fn policy_mut(&mut self) -> &mut SanitizePolicy {
        &mut self.policy
    }

    /// Clean an already parsed document in place
    ///
    /// A document without a body is left alone and yields an empty log.
    pub fn clean_document(&self, document: &HtmlDocument) -> Result<RemovalLog> {
        match document.body() {
            Some(body) => Ok(clean(&body, &self.policy)?.removed),
            None => Ok(RemovalLog::new()),
        }
    }

    /// Parse, clean and render `html`
    ///
    /// # Errors
    ///
    /// Propagates parse, depth-limit, structural and serialization errors.
    pub fn sanitize(&self, html: &str) -> Result<SanitizedHtml> {
        let document = parse_html(html)?;
        let Some(body) = document.body() else {
            return Ok(SanitizedHtml {
                html: String::new(),
                removed: RemovalLog::new(),
            });
        };

        let cleaned = clean(&body, &self.policy)?;
        let html = render_html(&cleaned.root, &self.policy)?;

        debug!(
            output_len = html.len(),
            removed = cleaned.removed.len(),
            "sanitization pass complete"
        );

        Ok(SanitizedHtml {
            html,
            removed: cleaned.removed,
        })
    }
}
