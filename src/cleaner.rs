//! Whitelist tree pruner
//!
//! The cleaner walks a parsed tree depth-first and decides, per node, whether
//! to keep it, replace it by its text, or remove it. It mutates the tree in
//! place and records every pruned node in a [`RemovalLog`].
//!
//! # Traversal
//!
//! Children of a kept node are visited from last to first over the children
//! present when the node was kept, each with its whole subtree before the
//! sibling in front of it. Pruning a child only ever touches its own slot in
//! the parent, so siblings still to be visited stay in place. Pruned nodes are
//! not descended into. Pending nodes live on an explicit stack, not the call
//! stack.
//!
//! # Per-node decision
//!
//! | node                                   | outcome                                  |
//! |----------------------------------------|------------------------------------------|
//! | pass root                              | kept, attributes filtered, children walked |
//! | element whose tag is whitelisted       | kept, attributes filtered, children walked |
//! | other element, `keep_text`, visible text | replaced by a text node with its text  |
//! | other element                          | removed                                  |
//! | comment                                | kept iff `#comment` is whitelisted       |
//! | doctype / processing instruction       | removed                                  |
//! | text                                   | kept                                     |
//!
//! A kept, non-void element with no children receives [`EMPTY_ELEMENT_SENTINEL`]
//! as its text so that serializers which self-close childless elements leave
//! it open. The output stage strips the sentinel again.
//!
//! # Examples
//!
//! ```rust
//! use html_whitelist_sanitizer::cleaner::clean;
//! use html_whitelist_sanitizer::parser::parse_html;
//! use html_whitelist_sanitizer::policy::SanitizePolicy;
//!
//! let document = parse_html(r#"<p>ok</p><script src="x.js"></script>"#).unwrap();
//! let body = document.body().unwrap();
//!
//! let cleaned = clean(&body, &SanitizePolicy::default()).unwrap();
//! assert_eq!(cleaned.removed.as_slice(), ["script"]);
//! assert_eq!(body.children.borrow().len(), 1);
//! ```

use crate::attributes::sanitize_attributes;
use crate::error::{Result, SanitizeError};
use crate::policy::SanitizePolicy;
use crate::removal_log::RemovalLog;
use crate::tree::{append_text, detach, node_name, replace_with_text, text_content};
use markup5ever_rcdom::{Handle, NodeData};
use tracing::debug;

/// Placeholder text put into kept elements that would otherwise be empty
pub const EMPTY_ELEMENT_SENTINEL: &str = "a7c598c8-fcb7-4bde-af9c-91c6515fbf7a-empty-element";

/// Elements that never have content
///
/// See <https://developer.mozilla.org/en-US/docs/Glossary/Void_element>
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Characters that do not count as visible text
const BLANK_CHARS: &[char] = &[' ', '\u{3000}', '\n', '\r', '\t'];

/// Result of a pass: the pruned root and what was pruned
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub root: Handle,
    pub removed: RemovalLog,
}

/// Prune the tree under `root` against `policy`
///
/// `root` is always kept whatever its tag; its attributes are still filtered.
/// A root without children is left as is, apart from attribute filtering.
///
/// The walk keeps its own stack of pending nodes, so tree depth is bounded by
/// memory rather than by the call stack.
///
/// # Errors
///
/// - `SanitizeError::DepthLimit`: `policy.max_depth` is set and a node lies
///   deeper than it
/// - `SanitizeError::Structure`: a node could not be detached or replaced
///
/// On error the tree is left partially cleaned and must not be used.
pub fn clean(root: &Handle, policy: &SanitizePolicy) -> Result<Cleaned> {
    let mut walker = TreeWalker {
        policy,
        removed: RemovalLog::new(),
        pending: Vec::new(),
    };
    walker.run(root)?;

    Ok(Cleaned {
        root: root.clone(),
        removed: walker.removed,
    })
}

/// Whether `text` holds anything but spaces, tabs, line breaks and ideographic spaces
pub fn has_visible_text(text: &str) -> bool {
    text.chars().any(|c| !BLANK_CHARS.contains(&c))
}

struct TreeWalker<'p> {
    policy: &'p SanitizePolicy,
    removed: RemovalLog,
    /// Nodes still to visit with their depth; the top is visited next
    pending: Vec<(Handle, usize)>,
}

impl TreeWalker<'_> {
    fn run(&mut self, root: &Handle) -> Result<()> {
        match node_name(root) {
            Some(name) => self.keep(root, &name, true, 0)?,
            // A document node: walk its children.
            None => self.schedule_children(root, 1),
        }

        while let Some((node, depth)) = self.pending.pop() {
            self.visit(&node, depth)?;
        }
        Ok(())
    }

    fn visit(&mut self, node: &Handle, depth: usize) -> Result<()> {
        // Text is content.
        let Some(name) = node_name(node) else {
            return Ok(());
        };

        if let Some(max) = self.policy.max_depth {
            if depth > max {
                return Err(SanitizeError::DepthLimit { depth, max });
            }
        }

        if self.policy.allows_tag(&name) {
            self.keep(node, &name, false, depth)
        } else {
            self.prune(node, &name, depth)
        }
    }

    fn keep(&mut self, node: &Handle, name: &str, is_root: bool, depth: usize) -> Result<()> {
        let NodeData::Element {
            ref attrs,
            ref template_contents,
            ..
        } = node.data
        else {
            return Ok(());
        };

        if !attrs.borrow().is_empty() {
            sanitize_attributes(node, name, self.policy);
        }

        let template_contents = template_contents.borrow().clone();
        if let Some(contents) = template_contents {
            self.schedule_children(&contents, depth + 1);
            return Ok(());
        }

        if node.children.borrow().is_empty() {
            if !is_root && !VOID_ELEMENTS.contains(&name) {
                append_text(node, EMPTY_ELEMENT_SENTINEL);
            }
            return Ok(());
        }

        self.schedule_children(node, depth + 1);
        Ok(())
    }

    /// Push the current children of `parent` so the last one is visited first
    ///
    /// The children are captured now. Each one is visited with its whole
    /// subtree before its previous sibling, and pruning a node only touches
    /// that node's slot in its parent.
    fn schedule_children(&mut self, parent: &Handle, depth: usize) {
        self.pending.extend(
            parent
                .children
                .borrow()
                .iter()
                .map(|child| (child.clone(), depth)),
        );
    }

    fn prune(&mut self, node: &Handle, name: &str, depth: usize) -> Result<()> {
        let is_element = matches!(node.data, NodeData::Element { .. });
        let text = if self.policy.keep_text && is_element {
            text_content(node)
        } else {
            String::new()
        };

        let kept_text = has_visible_text(&text);
        if kept_text {
            replace_with_text(node, &text)?;
        } else {
            detach(node)?;
        }

        debug!(tag = name, depth, kept_text, "pruned node");
        self.removed.record(name);
        Ok(())
    }
}
