//! Parser module for depviz.
//!
//! This module provides parsers for the supported dependency manifest
//! formats, each turning raw file content into a flat list of
//! [`DependencyRecord`]s.
//!
//! # Supported Formats
//!
//! - **package.json** (npm/Node.js)
//! - **requirements.txt** (pip/Python)
//! - **pom.xml** (Maven/JVM)
//!
//! Parser selection is by file identity only; content is never sniffed.
//! A structural failure (invalid JSON/XML) fails the whole call, while
//! record-level anomalies are recovered by skipping the record or
//! substituting a documented default.
//!
//! # Example
//!
//! ```
//! use depviz::parser::{parse_manifest, Ecosystem};
//!
//! let json = r#"{"dependencies": {"react": "^18.2.0"}}"#;
//! let (ecosystem, records) = parse_manifest("package.json", json).unwrap();
//!
//! assert_eq!(ecosystem, Ecosystem::Npm);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].name, "react");
//! ```

pub mod package_json;
pub mod pom;
pub mod requirements;
pub mod types;

// Re-export commonly used types for convenience
pub use pom::ScopeMapping;
pub use types::{DependencyKind, DependencyRecord, Ecosystem, PackageManifest};

/// Errors that can occur during manifest parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input could not be parsed as the expected format.
    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    /// No parser matches the given file identity.
    #[error("Unsupported file kind: {0}")]
    UnsupportedFileKind(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses manifest content, selecting the parser by file name.
///
/// Returns the detected ecosystem alongside the parsed records, or
/// [`ParseError::UnsupportedFileKind`] when the file name matches no
/// known manifest.
pub fn parse_manifest(
    file_name: &str,
    content: &str,
) -> ParseResult<(Ecosystem, Vec<DependencyRecord>)> {
    let ecosystem = Ecosystem::from_file_name(file_name).ok_or_else(|| {
        ParseError::UnsupportedFileKind(format!(
            "'{}' is not a supported manifest (expected package.json, requirements.txt, or pom.xml)",
            file_name
        ))
    })?;

    tracing::debug!(file = file_name, %ecosystem, "parsing manifest");

    let records = match ecosystem {
        Ecosystem::Npm => package_json::parse_str(content)?,
        Ecosystem::Pip => requirements::parse_str(content),
        Ecosystem::Maven => pom::parse_str(content)?,
    };

    tracing::debug!(count = records.len(), "parsed dependency records");
    Ok((ecosystem, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_selects_npm() {
        let (eco, records) =
            parse_manifest("package.json", r#"{"dependencies": {"react": "^18.0.0"}}"#).unwrap();
        assert_eq!(eco, Ecosystem::Npm);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_manifest_selects_pip() {
        let (eco, records) = parse_manifest("requirements.txt", "flask==2.0.1\n").unwrap();
        assert_eq!(eco, Ecosystem::Pip);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "flask");
    }

    #[test]
    fn test_parse_manifest_selects_maven() {
        let pom = r#"<project><dependencies><dependency>
            <groupId>junit</groupId><artifactId>junit</artifactId><version>4.13</version>
        </dependency></dependencies></project>"#;
        let (eco, records) = parse_manifest("pom.xml", pom).unwrap();
        assert_eq!(eco, Ecosystem::Maven);
        assert_eq!(records[0].name, "junit:junit");
    }

    #[test]
    fn test_parse_manifest_unsupported() {
        let result = parse_manifest("Gemfile", "gem 'rails'");
        assert!(matches!(
            result.unwrap_err(),
            ParseError::UnsupportedFileKind(_)
        ));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::MalformedManifest("bad JSON".to_string());
        assert!(err.to_string().contains("Malformed manifest"));

        let err = ParseError::UnsupportedFileKind("Gemfile".to_string());
        assert!(err.to_string().contains("Unsupported file kind"));
    }
}
