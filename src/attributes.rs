//! Per-element attribute filtering
//!
//! An attribute survives when its lowercased name is a global attribute, is
//! listed in the tag's rule (with or without a hook), or starts with `data-`
//! while the `data-*` wildcard is a global attribute. Survivors either go
//! through their hook or through the generic value sanitizers.

use crate::policy::{AttributeRule, SanitizePolicy, TagRule};
use crate::transform::ValueTransform;
use crate::tree::{attribute_name, attributes};
use crate::values::sanitize_value;
use html5ever::tendril::StrTendril;
use markup5ever_rcdom::Handle;
use std::borrow::Cow;
use tracing::trace;

const DATA_ATTRIBUTE_PREFIX: &str = "data-";

/// What happens to one attribute
#[derive(Clone, Copy)]
pub enum AttributeAction<'p> {
    /// Not whitelisted for this tag
    Drop,
    /// Whitelisted; value goes through the generic sanitizers
    Sanitize,
    /// Whitelisted with a hook; value goes through the hook only
    Transform(&'p dyn ValueTransform),
}

/// Decide the fate of attribute `name` (lowercase) under `tag_rule`
pub fn attribute_action<'p>(
    name: &str,
    tag_rule: Option<&'p TagRule>,
    policy: &SanitizePolicy,
) -> AttributeAction<'p> {
    match tag_rule.and_then(|rule| rule.get(name)) {
        Some(AttributeRule::Transformed(hook)) => AttributeAction::Transform(hook.as_ref()),
        Some(AttributeRule::Allowed) => AttributeAction::Sanitize,
        None if policy.is_global_attribute(name) => AttributeAction::Sanitize,
        None if policy.allows_data_attributes() && name.starts_with(DATA_ATTRIBUTE_PREFIX) => {
            AttributeAction::Sanitize
        }
        None => AttributeAction::Drop,
    }
}

/// Filter the attributes of element `node` whose lowercased tag is `tag`
///
/// Attributes are visited last to first over the initial count, so removing
/// one never shifts an attribute still to be visited. Attribute order of the
/// survivors is preserved. Non-elements are left alone.
pub fn sanitize_attributes(node: &Handle, tag: &str, policy: &SanitizePolicy) {
    let Some(attrs) = attributes(node) else {
        return;
    };
    let tag_rule = policy.tag_rule(tag);
    let mut attrs = attrs.borrow_mut();

    let mut index = attrs.len();
    while index > 0 {
        index -= 1;
        let name = attribute_name(&attrs[index]);

        let sanitized = match attribute_action(&name, tag_rule, policy) {
            AttributeAction::Drop => {
                trace!(tag, attribute = %name, "dropping attribute");
                attrs.remove(index);
                continue;
            }
            AttributeAction::Transform(hook) => Cow::Owned(hook.transform(&attrs[index].value)),
            AttributeAction::Sanitize => sanitize_value(&name, &attrs[index].value, policy),
        };

        if let Cow::Owned(value) = sanitized {
            if *value != *attrs[index].value {
                trace!(tag, attribute = %name, "rewriting attribute value");
                attrs[index].value = StrTendril::from(value);
            }
        }
    }
}
