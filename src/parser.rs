//! HTML5 parser using html5ever
//!
//! This module turns untrusted markup into the DOM tree the cleaner prunes.
//!
//! # Overview
//!
//! The parser uses html5ever, which implements the WHATWG HTML5 parsing
//! algorithm. Malformed markup (unclosed tags, stray end tags, misnested
//! formatting elements) is recovered the way browsers recover it, so the tree
//! the cleaner sees is the tree a browser would have rendered.
//!
//! # Body placement
//!
//! User content is a fragment, not a document. The markup is parsed with a
//! leading `<body>` start tag so that elements the tree builder would normally
//! hoist into `<head>` (`<script>`, `<style>`, `<meta>`, `<link>`) stay in the
//! body, where the whitelist sees them.
//!
//! ```rust
//! use html_whitelist_sanitizer::parser::parse_html;
//! use html_whitelist_sanitizer::tree::node_name;
//!
//! let document = parse_html("<script src=\"x.js\"></script><p>Hello").expect("parse");
//! let body = document.body().expect("body");
//! let names: Vec<_> = body.children.borrow().iter().filter_map(node_name).collect();
//! assert_eq!(names, vec!["script", "p"]);
//! ```
//!
//! # Lifetime
//!
//! Keep the [`HtmlDocument`] alive while working with handles from it: dropping
//! an rcdom node empties its whole subtree, even nodes still referenced
//! elsewhere.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{Result, SanitizeError};

/// Start tag prepended to every input
const BODY_PREFIX: &str = "<body>";

/// A parsed document
pub struct HtmlDocument {
    dom: RcDom,
}

impl HtmlDocument {
    /// The document node
    pub fn document(&self) -> &Handle {
        &self.dom.document
    }

    /// The `<html>` element
    pub fn root_element(&self) -> Option<Handle> {
        find_child_element(&self.dom.document, "html")
    }

    /// The `<body>` element, the container user content lives in
    pub fn body(&self) -> Option<Handle> {
        self.root_element()
            .and_then(|html| find_child_element(&html, "body"))
    }

    pub fn into_dom(self) -> RcDom {
        self.dom
    }
}

/// Parse markup into a document tree
///
/// # Errors
///
/// - `SanitizeError::Parse`: the tree builder produced no root element
///
/// html5ever recovers from every malformed input, so this is effectively
/// infallible; the error exists for tree builders that can give up.
///
/// # Examples
///
/// ```rust
/// use html_whitelist_sanitizer::parser::parse_html;
///
/// // Missing closing tags are recovered
/// let document = parse_html("<div>xxxx</div><div>dddd").expect("parse");
/// assert_eq!(document.body().unwrap().children.borrow().len(), 2);
/// ```
pub fn parse_html(html: &str) -> Result<HtmlDocument> {
    let mut input = String::with_capacity(BODY_PREFIX.len() + html.len());
    input.push_str(BODY_PREFIX);
    input.push_str(html);

    let dom = parse_document(RcDom::default(), Default::default()).one(input.as_str());

    let document = HtmlDocument { dom };
    if document.root_element().is_none() {
        return Err(SanitizeError::Parse(
            "document has no root element".to_string(),
        ));
    }

    Ok(document)
}

fn find_child_element(parent: &Handle, tag: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| match child.data {
            NodeData::Element { ref name, .. } => &*name.local == tag,
            _ => false,
        })
        .cloned()
}
