//! Sanitization policy: the whitelists a pass enforces
//!
//! A [`SanitizePolicy`] is read-only while a pass runs. Hooks are stored behind
//! `Arc`, so cloning a policy is cheap and the clone is safe to hand to another
//! thread.
//!
//! # Examples
//!
//! ```
//! use html_whitelist_sanitizer::policy::{SanitizePolicy, TagRule};
//!
//! let mut policy = SanitizePolicy::default()
//!     .allow_style_properties(["color"])
//!     .allow_classes(["contain", "sider"]);
//! policy.remove_from_tag_whitelist(["table", "tr", "th", "td"]);
//! policy.merge_tag_whitelist([(
//!     " IFrame ",
//!     TagRule::from_names(["src", "width", "height"]),
//! )]);
//!
//! assert!(policy.allows_tag("iframe"));
//! assert!(!policy.allows_tag("table"));
//! ```

use crate::transform::ValueTransform;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Global-attribute marker that admits every `data-` prefixed attribute
pub const DATA_ATTRIBUTE_WILDCARD: &str = "data-*";

/// How a whitelisted attribute's value is treated
#[derive(Clone)]
pub enum AttributeRule {
    /// Kept, then passed through the generic value sanitizers
    Allowed,
    /// Kept, with the hook replacing the generic value sanitizers
    Transformed(Arc<dyn ValueTransform>),
}

impl fmt::Debug for AttributeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeRule::Allowed => write!(f, "Allowed"),
            AttributeRule::Transformed(_) => write!(f, "Transformed(<hook>)"),
        }
    }
}

/// Attributes allowed on one tag, beyond the global ones
///
/// An empty rule still whitelists the tag itself.
#[derive(Debug, Clone, Default)]
pub struct TagRule {
    attributes: BTreeMap<String, AttributeRule>,
}

impl TagRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule allowing each of `names` without a hook
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rule = Self::new();
        for name in names {
            rule.insert(name.as_ref(), AttributeRule::Allowed);
        }
        rule
    }

    /// Allow `name` with generic value sanitization
    pub fn allow(mut self, name: &str) -> Self {
        self.insert(name, AttributeRule::Allowed);
        self
    }

    /// Allow `name` and route its value through `hook`
    pub fn transform<T>(mut self, name: &str, hook: T) -> Self
    where
        T: ValueTransform + 'static,
    {
        self.insert(name, AttributeRule::Transformed(Arc::new(hook)));
        self
    }

    pub fn insert(&mut self, name: &str, rule: AttributeRule) {
        self.attributes.insert(normalize_name(name), rule);
    }

    /// Look up the rule for an already lowercased attribute name
    pub fn get(&self, name: &str) -> Option<&AttributeRule> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}

/// Whitelist configuration for a sanitization pass
#[derive(Debug, Clone)]
pub struct SanitizePolicy {
    tags: BTreeMap<String, TagRule>,
    global_attributes: BTreeSet<String>,
    style_properties: BTreeSet<String>,
    css_classes: BTreeSet<String>,
    /// Replace disallowed elements by their text instead of dropping them
    pub keep_text: bool,
    /// Optional cap on nesting below the pass root; `None` walks any depth
    pub max_depth: Option<usize>,
}

impl SanitizePolicy {
    /// A policy that allows no tags and no attributes
    pub fn empty() -> Self {
        Self {
            tags: BTreeMap::new(),
            global_attributes: BTreeSet::new(),
            style_properties: BTreeSet::new(),
            css_classes: BTreeSet::new(),
            keep_text: false,
            max_depth: None,
        }
    }

    /// Build a policy from its declarative form
    pub fn from_config(config: PolicyConfig) -> Self {
        let mut policy = Self::empty()
            .allow_global_attributes(&config.global_attributes)
            .allow_style_properties(&config.style_properties)
            .allow_classes(&config.css_classes)
            .with_keep_text(config.keep_text);
        policy.max_depth = config.max_depth;
        policy.merge_tag_whitelist(
            config
                .tags
                .iter()
                .map(|(tag, attributes)| (tag.as_str(), TagRule::from_names(attributes))),
        );
        policy
    }

    /// Whether `tag` (already lowercased) is a whitelist key
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    pub fn tag_rule(&self, tag: &str) -> Option<&TagRule> {
        self.tags.get(tag)
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn is_global_attribute(&self, name: &str) -> bool {
        self.global_attributes.contains(name)
    }

    /// Whether the `data-*` wildcard is among the global attributes
    pub fn allows_data_attributes(&self) -> bool {
        self.global_attributes.contains(DATA_ATTRIBUTE_WILDCARD)
    }

    pub fn style_properties(&self) -> &BTreeSet<String> {
        &self.style_properties
    }

    pub fn css_classes(&self) -> &BTreeSet<String> {
        &self.css_classes
    }

    /// Drop every tag from the whitelist
    pub fn clear_tag_whitelist(&mut self) {
        self.tags.clear();
    }

    pub fn remove_from_tag_whitelist<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.tags.remove(&normalize_name(name.as_ref()));
        }
    }

    /// Add or overwrite tag rules; tag names are trimmed and lowercased
    pub fn merge_tag_whitelist<I, S>(&mut self, rules: I)
    where
        I: IntoIterator<Item = (S, TagRule)>,
        S: AsRef<str>,
    {
        for (tag, rule) in rules {
            let tag = normalize_name(tag.as_ref());
            if !tag.is_empty() {
                self.tags.insert(tag, rule);
            }
        }
    }

    /// Add or overwrite one tag rule
    pub fn allow_tag(mut self, tag: &str, rule: TagRule) -> Self {
        self.merge_tag_whitelist([(tag, rule)]);
        self
    }

    pub fn allow_global_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_normalized(&mut self.global_attributes, names);
        self
    }

    pub fn allow_style_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_normalized(&mut self.style_properties, names);
        self
    }

    /// Class tokens are matched exactly, so they are only trimmed
    pub fn allow_classes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.css_classes.extend(
            names
                .into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty()),
        );
        self
    }

    pub fn with_keep_text(mut self, keep_text: bool) -> Self {
        self.keep_text = keep_text;
        self
    }

    /// Reject trees nested deeper than `max_depth` below the pass root
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self::from_config(PolicyConfig::default())
    }
}

/// Serializable form of a policy, without hooks
///
/// Every field falls back to the default policy when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Tag name to the attributes allowed on it
    pub tags: BTreeMap<String, Vec<String>>,
    pub global_attributes: Vec<String>,
    pub style_properties: Vec<String>,
    pub css_classes: Vec<String>,
    pub keep_text: bool,
    pub max_depth: Option<usize>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let tags = DEFAULT_TAGS
            .iter()
            .map(|(tag, attributes)| {
                (
                    tag.to_string(),
                    attributes.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect();

        Self {
            tags,
            global_attributes: DEFAULT_GLOBAL_ATTRIBUTES
                .iter()
                .map(|a| a.to_string())
                .collect(),
            style_properties: Vec::new(),
            css_classes: Vec::new(),
            keep_text: false,
            max_depth: None,
        }
    }
}

const DEFAULT_GLOBAL_ATTRIBUTES: &[&str] = &["class", "style", "title", DATA_ATTRIBUTE_WILDCARD];

const DEFAULT_TAGS: &[(&str, &[&str])] = &[
    ("img", &["alt", "src", "height", "width"]),
    ("a", &["href", "rel", "target", "download", "type"]),
    ("div", &[]),
    ("table", &["sortable", "width"]),
    ("tbody", &[]),
    ("caption", &[]),
    ("tr", &[]),
    ("td", &["valign", "colspan", "rowspan"]),
    ("th", &["width"]),
    ("br", &[]),
    ("p", &[]),
    ("b", &[]),
    ("strong", &[]),
    ("i", &[]),
    ("u", &[]),
    ("em", &[]),
    ("span", &[]),
    ("ol", &[]),
    ("ul", &[]),
    ("li", &["value"]),
    ("blockquote", &["cite"]),
    (
        "embed",
        &[
            "type",
            "pluginspage",
            "src",
            "width",
            "height",
            "wmode",
            "play",
            "loop",
            "menu",
            "allowscriptaccess",
            "allowfullscreen",
        ],
    ),
    ("pre", &[]),
    ("hr", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    (
        "video",
        &[
            "autoplay", "controls", "height", "loop", "muted", "poster", "preload", "src", "width",
        ],
    ),
    ("source", &["src", "srcset", "media", "sizes", "type"]),
    (
        "audio",
        &["autoplay", "controls", "loop", "muted", "preload", "src"],
    ),
];

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn extend_normalized<I, S>(set: &mut BTreeSet<String>, names: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    set.extend(
        names
            .into_iter()
            .map(|name| normalize_name(name.as_ref()))
            .filter(|name| !name.is_empty()),
    );
}
