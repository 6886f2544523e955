//! Parser for Maven pom.xml files.
//!
//! Walks `project > dependencies > dependency` and emits one record per
//! dependency element. Tag names are compared by local name so
//! namespaced POMs (`xmlns="http://maven.apache.org/POM/4.0.0"`) parse
//! the same as bare ones.

use roxmltree::{Document, Node};

use super::types::{DependencyKind, DependencyRecord};
use super::{ParseError, ParseResult};

/// Maps Maven `<scope>` values to dependency kinds.
///
/// The default table maps `test` to development and `provided` to peer;
/// every other scope, including an absent one, is production. Maven's
/// `optional` attribute is deliberately not mapped — callers that want
/// it can construct a mapping with an extra entry.
#[derive(Debug, Clone)]
pub struct ScopeMapping {
    entries: Vec<(String, DependencyKind)>,
}

impl ScopeMapping {
    /// Creates a mapping from explicit scope/kind pairs.
    pub fn new(entries: Vec<(String, DependencyKind)>) -> Self {
        Self { entries }
    }

    /// Resolves a scope value to a kind; unmapped and absent scopes are
    /// production.
    pub fn kind_for(&self, scope: Option<&str>) -> DependencyKind {
        scope
            .and_then(|s| {
                self.entries
                    .iter()
                    .find(|(name, _)| name == s)
                    .map(|(_, kind)| *kind)
            })
            .unwrap_or(DependencyKind::Production)
    }
}

impl Default for ScopeMapping {
    fn default() -> Self {
        Self::new(vec![
            ("test".to_string(), DependencyKind::Development),
            ("provided".to_string(), DependencyKind::Peer),
        ])
    }
}

/// Parses pom.xml content into a flat record list with the default
/// scope mapping.
///
/// Not-well-formed XML fails with [`ParseError::MalformedManifest`]. A
/// dependency element missing `groupId`, `artifactId`, or `version`
/// falls back to the literal `"unknown"` for the missing part.
///
/// # Example
///
/// ```
/// use depviz::parser::pom::parse_str;
/// use depviz::parser::DependencyKind;
///
/// let pom = r#"<project><dependencies><dependency>
///     <groupId>junit</groupId>
///     <artifactId>junit</artifactId>
///     <version>4.13.2</version>
///     <scope>test</scope>
/// </dependency></dependencies></project>"#;
///
/// let records = parse_str(pom).unwrap();
/// assert_eq!(records[0].name, "junit:junit");
/// assert_eq!(records[0].kind, DependencyKind::Development);
/// ```
pub fn parse_str(content: &str) -> ParseResult<Vec<DependencyRecord>> {
    parse_str_with_mapping(content, &ScopeMapping::default())
}

/// Parses pom.xml content with a caller-supplied scope mapping.
pub fn parse_str_with_mapping(
    content: &str,
    mapping: &ScopeMapping,
) -> ParseResult<Vec<DependencyRecord>> {
    let doc = Document::parse(content)
        .map_err(|e| ParseError::MalformedManifest(format!("invalid pom.xml: {}", e)))?;

    let project = doc.root_element();
    if project.tag_name().name() != "project" {
        // Well-formed XML that isn't a POM yields no records, matching
        // the record-level tolerance policy
        return Ok(Vec::new());
    }

    let records = child_by_name(project, "dependencies")
        .map(|deps| {
            deps.children()
                .filter(|n| n.tag_name().name() == "dependency")
                .map(|dep| record_from_element(dep, mapping))
                .collect()
        })
        .unwrap_or_default();

    Ok(records)
}

fn record_from_element(dep: Node<'_, '_>, mapping: &ScopeMapping) -> DependencyRecord {
    let group_id = child_text(dep, "groupId").unwrap_or("unknown");
    let artifact_id = child_text(dep, "artifactId").unwrap_or("unknown");
    let version = child_text(dep, "version").unwrap_or("unknown");
    let kind = mapping.kind_for(child_text(dep, "scope"));

    DependencyRecord::new(format!("{}:{}", group_id, artifact_id), version, kind)
}

fn child_by_name<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.tag_name().name() == name)
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child_by_name(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
