//! Value-transform hooks for individual attributes
//!
//! A hook replaces the generic value sanitization for one attribute of one
//! tag. Registering a hook also whitelists the attribute on that tag.
//!
//! Hooks must be `Send + Sync` so a policy can be shared by concurrent passes.

use crate::error::Result;
use regex::Regex;

/// Strategy applied to an attribute value in place of the generic sanitizers
pub trait ValueTransform: Send + Sync {
    /// Map the raw attribute value to its sanitized form.
    ///
    /// Returning an empty string blanks the value; the attribute itself stays.
    fn transform(&self, value: &str) -> String;
}

impl<F> ValueTransform for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform(&self, value: &str) -> String {
        self(value)
    }
}

/// Keeps values matching a pattern and blanks everything else
///
/// # Examples
///
/// ```
/// use html_whitelist_sanitizer::transform::{PatternFilter, ValueTransform};
///
/// let filter = PatternFilter::new(r"^https://www\.youtube\.com/embed/").unwrap();
/// assert_eq!(
///     filter.transform("https://www.youtube.com/embed/lBOwxXxesBo"),
///     "https://www.youtube.com/embed/lBOwxXxesBo"
/// );
/// assert_eq!(filter.transform("https://evil.example/"), "");
/// ```
#[derive(Debug, Clone)]
pub struct PatternFilter {
    pattern: Regex,
}

impl PatternFilter {
    /// Compile `pattern` into a filter
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Wrap an already compiled regex
    pub fn from_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl ValueTransform for PatternFilter {
    fn transform(&self, value: &str) -> String {
        if self.pattern.is_match(value) {
            value.to_string()
        } else {
            String::new()
        }
    }
}
