//! Flattening of the dependency forest for list rendering.
//!
//! The TUI renders the filtered forest as a scrollable list; a
//! [`VisibleRow`] is one list entry, carrying just the fields the
//! renderer needs. Children of collapsed nodes are not emitted.

use crate::parser::DependencyKind;
use crate::tree::{DependencyNode, Severity};

/// A flattened representation of a visible tree node.
#[derive(Debug, Clone)]
pub struct VisibleRow {
    /// Package name
    pub name: String,
    /// Declared version spec
    pub version: String,
    /// Newer known version, when any
    pub latest_version: Option<String>,
    /// Dependency kind
    pub kind: DependencyKind,
    /// License identifier, when known
    pub license: Option<String>,
    /// Depth in the tree (0 = top-level)
    pub depth: usize,
    /// Whether this node is currently expanded
    pub is_expanded: bool,
    /// Whether this node has children
    pub has_children: bool,
    /// Whether this is the last child of its parent
    pub is_last_child: bool,
    /// Number of known vulnerabilities
    pub vulnerability_count: usize,
    /// Worst vulnerability severity, when any
    pub max_severity: Option<Severity>,
    /// Whether the manifest declares conflicting versions
    pub has_version_conflict: bool,
}

impl VisibleRow {
    /// Get the expansion indicator for this row.
    pub fn expansion_indicator(&self) -> &'static str {
        if !self.has_children {
            "  "
        } else if self.is_expanded {
            "▼ "
        } else {
            "▶ "
        }
    }
}

/// Flatten the forest into a list of visible rows.
///
/// Only includes nodes whose ancestors are all expanded.
pub fn flatten_forest(forest: &[DependencyNode]) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    flatten_level(forest, 0, &mut rows);
    rows
}

fn flatten_level(nodes: &[DependencyNode], depth: usize, rows: &mut Vec<VisibleRow>) {
    let count = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        rows.push(VisibleRow {
            name: node.name.clone(),
            version: node.version.clone(),
            latest_version: node.latest_version.clone(),
            kind: node.kind,
            license: node.license.clone(),
            depth,
            is_expanded: node.is_expanded,
            has_children: node.has_children(),
            is_last_child: i == count - 1,
            vulnerability_count: node.vulnerabilities.len(),
            max_severity: node.max_severity(),
            has_version_conflict: node.has_version_conflict,
        });

        if node.is_expanded {
            flatten_level(&node.children, depth + 1, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_forest() -> Vec<DependencyNode> {
        let mut react = DependencyNode::new("react", "^18.2.0", DependencyKind::Production);
        react.children = vec![
            DependencyNode::new("react-dom", "1.0.0", DependencyKind::Production),
            DependencyNode::new("@types/react", "^18.0.0", DependencyKind::Development),
        ];
        let lodash = DependencyNode::new("lodash", "^4.17.21", DependencyKind::Production);
        vec![react, lodash]
    }

    #[test]
    fn test_flatten_collapsed() {
        let rows = flatten_forest(&create_test_forest());

        // Children hidden while react is collapsed
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "react");
        assert_eq!(rows[1].name, "lodash");
        assert!(rows[0].has_children);
        assert!(!rows[1].has_children);
    }

    #[test]
    fn test_flatten_expanded() {
        let mut forest = create_test_forest();
        forest[0].is_expanded = true;

        let rows = flatten_forest(&forest);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].name, "react-dom");
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[2].name, "@types/react");
        assert!(rows[2].is_last_child);
        assert_eq!(rows[3].name, "lodash");
        assert_eq!(rows[3].depth, 0);
    }

    #[test]
    fn test_expansion_indicator() {
        let mut forest = create_test_forest();
        let rows = flatten_forest(&forest);
        assert_eq!(rows[0].expansion_indicator(), "▶ ");
        assert_eq!(rows[1].expansion_indicator(), "  ");

        forest[0].is_expanded = true;
        let rows = flatten_forest(&forest);
        assert_eq!(rows[0].expansion_indicator(), "▼ ");
    }

    #[test]
    fn test_last_child_tracking() {
        let rows = flatten_forest(&create_test_forest());
        assert!(!rows[0].is_last_child);
        assert!(rows[1].is_last_child);
    }
}
