//! Audit trail of the nodes a pass removed or replaced

use std::collections::BTreeMap;

/// Ordered, append-only list of pruned node names
///
/// Entries appear in removal order. Since a kept node's children are scanned
/// last to first and a pruned node is never descended into, only the topmost
/// pruned node of each subtree is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalLog {
    entries: Vec<String>,
}

impl RemovalLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tag: &str) {
        self.entries.push(tag.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.iter().any(|entry| entry == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Number of removals per tag name
    pub fn counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

impl IntoIterator for RemovalLog {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a RemovalLog {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
