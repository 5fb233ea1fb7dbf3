//! Node primitives over `markup5ever_rcdom` handles
//!
//! The rcdom tree owns children through `Rc` in the parent's child vector and
//! points back to the parent through a `Weak`. Every mutation here goes
//! through that weak link, so a node whose parent is gone or does not list it
//! is reported as a structural error rather than silently skipped.

use crate::error::{Result, SanitizeError};
use html5ever::Attribute;
use html5ever::tendril::StrTendril;
use markup5ever_rcdom::{Handle, Node, NodeData};
use std::cell::RefCell;
use std::rc::Rc;

/// Pseudo tag name under which comments are whitelisted and logged
pub const COMMENT_NAME: &str = "#comment";
pub const DOCTYPE_NAME: &str = "#doctype";
pub const PROCESSING_INSTRUCTION_NAME: &str = "#processing-instruction";

/// Lowercased tag name of an element, or the pseudo name of a non-element
///
/// Returns `None` for the document node and for text nodes.
pub fn node_name(node: &Handle) -> Option<String> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.to_lowercase()),
        NodeData::Comment { .. } => Some(COMMENT_NAME.to_string()),
        NodeData::Doctype { .. } => Some(DOCTYPE_NAME.to_string()),
        NodeData::ProcessingInstruction { .. } => Some(PROCESSING_INSTRUCTION_NAME.to_string()),
        NodeData::Document | NodeData::Text { .. } => None,
    }
}

/// Lowercased attribute name, `prefix:local` for namespaced attributes
pub fn attribute_name(attr: &Attribute) -> String {
    match attr.name.prefix {
        Some(ref prefix) => format!("{}:{}", prefix, attr.name.local).to_lowercase(),
        None => attr.name.local.to_lowercase(),
    }
}

pub fn attributes(node: &Handle) -> Option<&RefCell<Vec<Attribute>>> {
    match node.data {
        NodeData::Element { ref attrs, .. } => Some(attrs),
        _ => None,
    }
}

pub fn is_text(node: &Handle) -> bool {
    matches!(node.data, NodeData::Text { .. })
}

/// Concatenated text of all descendant text nodes, in document order
///
/// Walks with an explicit stack so arbitrarily deep subtrees are fine.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![node.clone()];

    while let Some(current) = stack.pop() {
        if let NodeData::Text { ref contents } = current.data {
            text.push_str(&contents.borrow());
            continue;
        }
        if matches!(current.data, NodeData::Element { .. } | NodeData::Document) {
            stack.extend(current.children.borrow().iter().rev().cloned());
        }
    }

    text
}

pub fn create_text_node(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(text)),
    })
}

/// Append a text node as last child of `parent`
pub fn append_text(parent: &Handle, text: &str) {
    let child = create_text_node(text);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Remove `node` from its parent's child list
pub fn detach(node: &Handle) -> Result<()> {
    let (parent, index) = locate(node)?;
    parent.children.borrow_mut().remove(index);
    node.parent.set(None);
    Ok(())
}

/// Put a text node carrying `text` in place of `node`
pub fn replace_with_text(node: &Handle, text: &str) -> Result<Handle> {
    let (parent, index) = locate(node)?;
    let replacement = create_text_node(text);
    replacement.parent.set(Some(Rc::downgrade(&parent)));
    parent.children.borrow_mut()[index] = replacement.clone();
    node.parent.set(None);
    Ok(replacement)
}

fn locate(node: &Handle) -> Result<(Handle, usize)> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|weak| weak.upgrade());
    node.parent.set(weak);

    let parent = parent.ok_or_else(|| {
        SanitizeError::Structure(format!(
            "{} has no parent to detach from",
            node_name(node).unwrap_or_else(|| "node".to_string())
        ))
    })?;

    let index = parent
        .children
        .borrow()
        .iter()
        .position(|child| Rc::ptr_eq(child, node))
        .ok_or_else(|| {
            SanitizeError::Structure(format!(
                "{} is not listed among its parent's children",
                node_name(node).unwrap_or_else(|| "node".to_string())
            ))
        })?;

    Ok((parent, index))
}
