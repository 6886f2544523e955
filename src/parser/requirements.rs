//! Parser for pip requirements.txt files.
//!
//! One requirement spec per line. Blank lines and comment lines are
//! skipped; lines that do not start with a package name token are
//! silently dropped, mirroring the lenient behavior of real-world
//! requirements tooling.

use std::sync::OnceLock;

use regex::Regex;

use super::types::{DependencyKind, DependencyRecord};

/// Requirement line grammar: a name token, an optional comparator
/// (longest match first so `>=` wins over `>`), an optional version
/// token. No whitespace is allowed between tokens; a spaced spec like
/// `flask == 2.0.1` parses as `flask` at `latest`.
fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_-]+)(==|>=|<=|!=|~=|>|<)?([0-9.*]+)?").expect("valid regex")
    })
}

/// Parses requirements.txt content into a flat record list.
///
/// Total over its input: malformed lines produce no record and no
/// error. Package names are lower-cased per pip convention, and every
/// record is a production dependency since the format carries no
/// dev/peer distinction.
///
/// # Example
///
/// ```
/// use depviz::parser::requirements::parse_str;
///
/// let records = parse_str("Flask==2.0.1\n# pinned for CI\nrequests>=2.25.0\n");
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].name, "flask");
/// assert_eq!(records[0].version, "==2.0.1");
/// assert_eq!(records[1].version, ">=2.25.0");
/// ```
pub fn parse_str(content: &str) -> Vec<DependencyRecord> {
    let mut records = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(caps) = line_pattern().captures(line) else {
            tracing::debug!(line, "dropping unparseable requirement line");
            continue;
        };

        let name = caps[1].to_lowercase();
        let version = match (caps.get(2), caps.get(3)) {
            (comparator, Some(version)) => {
                format!(
                    "{}{}",
                    comparator.map(|c| c.as_str()).unwrap_or(""),
                    version.as_str()
                )
            }
            _ => "latest".to_string(),
        };

        records.push(DependencyRecord::new(name, version, DependencyKind::Production));
    }

    records
}
