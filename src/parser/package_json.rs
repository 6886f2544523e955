//! Parser for npm package.json files.
//!
//! Reads the four dependency maps of a `package.json` and emits one
//! record per entry, tagged with the kind implied by the map it came
//! from.

use serde_json::Map;

use super::types::{DependencyKind, DependencyRecord, PackageManifest};
use super::{ParseError, ParseResult};

/// Parses a `package.json` document into a flat record list.
///
/// The input must be a valid JSON object; anything else fails with
/// [`ParseError::MalformedManifest`]. The four dependency maps are
/// emitted in the fixed order `dependencies`, `devDependencies`,
/// `peerDependencies`, `optionalDependencies`, and within each map in
/// the key order of the source document. Absent maps are skipped, as
/// are entries whose version value is not a string.
///
/// # Example
///
/// ```
/// use depviz::parser::package_json::parse_str;
/// use depviz::parser::DependencyKind;
///
/// let json = r#"{
///     "dependencies": {"react": "^18.0.0"},
///     "devDependencies": {"typescript": "^5.0.0"}
/// }"#;
///
/// let records = parse_str(json).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].name, "react");
/// assert_eq!(records[1].kind, DependencyKind::Development);
/// ```
pub fn parse_str(content: &str) -> ParseResult<Vec<DependencyRecord>> {
    let manifest: PackageManifest = serde_json::from_str(content)
        .map_err(|e| ParseError::MalformedManifest(format!("invalid package.json: {}", e)))?;

    Ok(extract_records(&manifest))
}

/// Extracts all dependency records from a parsed manifest.
///
/// Collects the four maps in their fixed order and flattens them into a
/// single list with kinds tagged.
pub fn extract_records(manifest: &PackageManifest) -> Vec<DependencyRecord> {
    let fields: [(&Option<Map<String, serde_json::Value>>, DependencyKind); 4] = [
        (&manifest.dependencies, DependencyKind::Production),
        (&manifest.dev_dependencies, DependencyKind::Development),
        (&manifest.peer_dependencies, DependencyKind::Peer),
        (&manifest.optional_dependencies, DependencyKind::Optional),
    ];

    let mut records = Vec::new();
    for (field, kind) in fields {
        if let Some(map) = field {
            for (name, version) in map {
                // Non-string versions are a record-level anomaly, not a
                // parse failure
                match version.as_str() {
                    Some(v) => records.push(DependencyRecord::new(name, v, kind)),
                    None => {
                        tracing::debug!(package = %name, "skipping non-string version value");
                    }
                }
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PACKAGE_JSON: &str = r#"{
        "name": "test-app",
        "version": "1.0.0",
        "dependencies": {
            "react": "^18.2.0",
            "react-dom": "^18.2.0",
            "lodash": "^4.17.21"
        },
        "devDependencies": {
            "typescript": "^5.0.0",
            "jest": "^29.0.0"
        },
        "peerDependencies": {
            "react": ">=16.8.0"
        },
        "optionalDependencies": {
            "fsevents": "^2.3.0"
        }
    }"#;

    #[test]
    fn test_parse_str_all_kinds() {
        let records = parse_str(SAMPLE_PACKAGE_JSON).unwrap();

        // 3 prod + 2 dev + 1 peer + 1 optional = 7
        assert_eq!(records.len(), 7);

        let count = |kind| records.iter().filter(|r| r.kind == kind).count();
        assert_eq!(count(DependencyKind::Production), 3);
        assert_eq!(count(DependencyKind::Development), 2);
        assert_eq!(count(DependencyKind::Peer), 1);
        assert_eq!(count(DependencyKind::Optional), 1);
    }

    #[test]
    fn test_kind_partitioning_order() {
        let json = r#"{
            "dependencies": {"a": "1.0.0"},
            "devDependencies": {"b": "^2.0.0"},
            "peerDependencies": {"c": "~3.0.0"}
        }"#;
        let records = parse_str(json).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            (records[0].name.as_str(), records[0].kind),
            ("a", DependencyKind::Production)
        );
        assert_eq!(
            (records[1].name.as_str(), records[1].kind),
            ("b", DependencyKind::Development)
        );
        assert_eq!(
            (records[2].name.as_str(), records[2].kind),
            ("c", DependencyKind::Peer)
        );
    }

    #[test]
    fn test_insertion_order_within_field() {
        let json = r#"{"dependencies": {"zebra": "1.0.0", "alpha": "2.0.0", "mango": "3.0.0"}}"#;
        let records = parse_str(json).unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zebra", "alpha", "mango"]);
    }

    #[test]
    fn test_parse_str_minimal() {
        let records = parse_str(r#"{"name": "minimal"}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_str_empty_object() {
        let records = parse_str("{}").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("{ invalid json }");
        assert!(matches!(
            result.unwrap_err(),
            ParseError::MalformedManifest(_)
        ));
    }

    #[test]
    fn test_parse_str_not_an_object() {
        let result = parse_str(r#"["react", "lodash"]"#);
        assert!(matches!(
            result.unwrap_err(),
            ParseError::MalformedManifest(_)
        ));
    }

    #[test]
    fn test_non_string_version_skipped() {
        let json = r#"{"dependencies": {"react": "^18.0.0", "weird": {"nested": true}}}"#;
        let records = parse_str(json).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "react");
    }

    #[test]
    fn test_parse_str_with_extra_fields() {
        // package.json often has many other fields; ensure we ignore them
        let json = r#"{
            "name": "with-extras",
            "scripts": {"build": "tsc"},
            "license": "MIT",
            "repository": {"type": "git", "url": "https://example.com"},
            "dependencies": {"express": "^4.18.0"}
        }"#;

        let records = parse_str(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "express");
    }

    #[test]
    fn test_specific_values() {
        let records = parse_str(SAMPLE_PACKAGE_JSON).unwrap();

        let react = records
            .iter()
            .find(|r| r.name == "react" && r.kind == DependencyKind::Production)
            .unwrap();
        assert_eq!(react.version, "^18.2.0");

        let typescript = records.iter().find(|r| r.name == "typescript").unwrap();
        assert_eq!(typescript.kind, DependencyKind::Development);
    }
}
