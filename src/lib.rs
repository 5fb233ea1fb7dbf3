//! HTML Whitelist Sanitizer
//!
//! This library removes everything from untrusted markup that a whitelist
//! does not explicitly allow: elements, attributes, style declarations, CSS
//! classes and `javascript:` URLs.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `parser`: HTML5 parsing using html5ever
//! - `tree`: node primitives (detach, replace, text content) over rcdom handles
//! - `policy`: tag, attribute, style and class whitelists
//! - `transform`: per-attribute value hooks
//! - `values`: generic style, class and URL value sanitizers
//! - `attributes`: per-element attribute filter
//! - `cleaner`: the tree pruner
//! - `removal_log`: audit trail of pruned nodes
//! - `output`: serialization and post-serialization cleanup
//! - `sanitizer`: parse, clean and render in one call
//!
//! # Example
//!
//! ```rust
//! use html_whitelist_sanitizer::{HtmlSanitizer, SanitizePolicy};
//!
//! let policy = SanitizePolicy::default().allow_style_properties(["color"]);
//! let sanitizer = HtmlSanitizer::with_policy(policy);
//!
//! let result = sanitizer
//!     .sanitize(r#"<span style="color:#f00;font-size:19px;" class="x">t</span>"#)
//!     .unwrap();
//! assert_eq!(result.html, r#"<span style="color:#f00;" class="">t</span>"#);
//! ```

// Module declarations
pub mod attributes;
pub mod cleaner;
pub mod error;
pub mod output;
pub mod parser;
pub mod policy;
pub mod removal_log;
pub mod sanitizer;
pub mod transform;
pub mod tree;
pub mod values;

// Re-export main types for convenience
pub use cleaner::{Cleaned, clean};
pub use error::{Result, SanitizeError};
pub use parser::{HtmlDocument, parse_html};
pub use policy::{AttributeRule, PolicyConfig, SanitizePolicy, TagRule};
pub use removal_log::RemovalLog;
pub use sanitizer::{HtmlSanitizer, SanitizedHtml};
pub use transform::{PatternFilter, ValueTransform};
