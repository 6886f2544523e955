//! The canonical dependency tree node.
//!
//! Every parsed manifest converges on a forest of [`DependencyNode`]s;
//! the query engine, state store, exporters, and UI all operate on this
//! one shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parser::DependencyKind;

/// Severity of a known vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Returns a short uppercase label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Moderate => "MODERATE",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// A known vulnerability attached to a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Severity classification.
    pub severity: Severity,

    /// Human-readable advisory title.
    pub title: String,

    /// Advisory link, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Vulnerability {
    /// Creates a new vulnerability entry.
    pub fn new(severity: Severity, title: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            url: None,
        }
    }

    /// Attaches an advisory URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A node in the canonical dependency forest.
///
/// Serializes in camelCase so the JSON export is a faithful structural
/// dump of the model. `is_expanded` is UI state, not identity: for
/// state-tracking purposes a node's identity is the `(name, version)`
/// pair, so two structurally distinct nodes with the same name and
/// version share expand state (see [`NodeStateStore`]).
///
/// [`NodeStateStore`]: crate::tree::NodeStateStore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    /// The package name (for Maven, `group:artifact`).
    pub name: String,

    /// The raw version spec as declared by the manifest.
    pub version: String,

    /// Newer version known to the resolver, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,

    /// The declared role of this dependency.
    pub kind: DependencyKind,

    /// Child dependencies in discovery order; empty for a leaf.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<DependencyNode>,

    /// SPDX-like license identifier, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Source repository link, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,

    /// Project homepage, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Known vulnerabilities, possibly empty.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub vulnerabilities: Vec<Vulnerability>,

    /// Whether this node is expanded in the UI.
    pub is_expanded: bool,

    /// Whether the manifest declares this package more than once with
    /// diverging version specs.
    pub has_version_conflict: bool,
}

impl DependencyNode {
    /// Creates a bare node with no metadata attached.
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            latest_version: None,
            kind,
            children: Vec::new(),
            license: None,
            repository_url: None,
            homepage: None,
            vulnerabilities: Vec::new(),
            is_expanded: false,
            has_version_conflict: false,
        }
    }

    /// Check if this node has children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The highest severity among this node's vulnerabilities.
    pub fn max_severity(&self) -> Option<Severity> {
        self.vulnerabilities.iter().map(|v| v.severity).max()
    }

    /// True when the resolver knows a version newer than the declared
    /// one.
    pub fn has_upgrade(&self) -> bool {
        self.latest_version
            .as_deref()
            .is_some_and(|latest| latest != self.version)
    }

    /// Total node count of this subtree, self included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = DependencyNode::new("react", "^18.2.0", DependencyKind::Production);
        assert_eq!(node.name, "react");
        assert_eq!(node.version, "^18.2.0");
        assert!(!node.is_expanded);
        assert!(!node.has_children());
        assert!(node.max_severity().is_none());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Moderate);
        assert!(Severity::Moderate > Severity::Low);
    }

    #[test]
    fn test_max_severity() {
        let mut node = DependencyNode::new("lodash", "^4.17.0", DependencyKind::Production);
        node.vulnerabilities = vec![
            Vulnerability::new(Severity::Low, "minor issue"),
            Vulnerability::new(Severity::High, "prototype pollution"),
        ];
        assert_eq!(node.max_severity(), Some(Severity::High));
    }

    #[test]
    fn test_has_upgrade() {
        let mut node = DependencyNode::new("react", "^18.2.0", DependencyKind::Production);
        assert!(!node.has_upgrade());

        node.latest_version = Some("19.1.0".to_string());
        assert!(node.has_upgrade());

        node.latest_version = Some("^18.2.0".to_string());
        assert!(!node.has_upgrade());
    }

    #[test]
    fn test_subtree_len() {
        let mut root = DependencyNode::new("a", "1.0.0", DependencyKind::Production);
        let mut child = DependencyNode::new("b", "1.0.0", DependencyKind::Production);
        child
            .children
            .push(DependencyNode::new("c", "1.0.0", DependencyKind::Production));
        root.children.push(child);

        assert_eq!(root.subtree_len(), 3);
    }

    #[test]
    fn test_serialization_is_camel_case() {
        let mut node = DependencyNode::new("react", "^18.2.0", DependencyKind::Production);
        node.latest_version = Some("19.1.0".to_string());
        node.has_version_conflict = true;

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["latestVersion"], "19.1.0");
        assert_eq!(json["hasVersionConflict"], true);
        assert_eq!(json["isExpanded"], false);
        assert_eq!(json["kind"], "production");
        // Empty collections and absent options are omitted
        assert!(json.get("children").is_none());
        assert!(json.get("license").is_none());
    }
}
