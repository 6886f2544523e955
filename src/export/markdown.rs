//! Markdown export implementation.
//!
//! A human-readable report: summary counts followed by a table of all
//! nodes, with nesting shown by indentation in the name column.

use std::io::{self, Write};

use super::Exporter;
use crate::parser::DependencyKind;
use crate::tree::DependencyNode;

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl MarkdownExporter {
    fn count_kind(forest: &[DependencyNode], kind: DependencyKind) -> usize {
        forest.iter().filter(|n| n.kind == kind).count()
    }

    fn write_rows<W: Write>(
        nodes: &[DependencyNode],
        depth: usize,
        writer: &mut W,
    ) -> io::Result<()> {
        for node in nodes {
            let indent = "&nbsp;&nbsp;".repeat(depth);
            let vulns = if node.vulnerabilities.is_empty() {
                "-".to_string()
            } else {
                node.vulnerabilities
                    .iter()
                    .map(|v| v.severity.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            writeln!(
                writer,
                "| {}{} | `{}` | {} | {} | {} |",
                indent,
                node.name,
                node.version,
                node.kind.label(),
                node.license.as_deref().unwrap_or("-"),
                vulns
            )?;
            Self::write_rows(&node.children, depth + 1, writer)?;
        }
        Ok(())
    }
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, forest: &[DependencyNode], writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Dependency Report")?;
        writeln!(writer)?;

        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "- Total top-level dependencies: {}", forest.len())?;
        writeln!(
            writer,
            "- Production: {}",
            Self::count_kind(forest, DependencyKind::Production)
        )?;
        writeln!(
            writer,
            "- Development: {}",
            Self::count_kind(forest, DependencyKind::Development)
        )?;
        writeln!(
            writer,
            "- Peer: {}",
            Self::count_kind(forest, DependencyKind::Peer)
        )?;
        writeln!(
            writer,
            "- Optional: {}",
            Self::count_kind(forest, DependencyKind::Optional)
        )?;
        writeln!(writer)?;

        writeln!(writer, "## Dependencies")?;
        writeln!(writer)?;
        writeln!(writer, "| Name | Version | Kind | License | Vulnerabilities |")?;
        writeln!(writer, "|------|---------|------|---------|-----------------|")?;
        Self::write_rows(forest, 0, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Severity, Vulnerability};

    fn create_test_forest() -> Vec<DependencyNode> {
        let mut react = DependencyNode::new("react", "^18.2.0", DependencyKind::Production);
        react.license = Some("MIT".to_string());
        react.children = vec![DependencyNode::new(
            "react-dom",
            "1.0.0",
            DependencyKind::Production,
        )];

        let mut lodash = DependencyNode::new("lodash", "^4.17.21", DependencyKind::Production);
        lodash.vulnerabilities = vec![Vulnerability::new(Severity::High, "Prototype pollution")];

        let typescript = DependencyNode::new("typescript", "^5.0.0", DependencyKind::Development);

        vec![react, lodash, typescript]
    }

    #[test]
    fn test_markdown_summary_counts() {
        let forest = create_test_forest();
        let mut output = Vec::new();

        MarkdownExporter.export(&forest, &mut output).unwrap();

        let md = String::from_utf8(output).unwrap();
        assert!(md.contains("- Total top-level dependencies: 3"));
        assert!(md.contains("- Production: 2"));
        assert!(md.contains("- Development: 1"));
    }

    #[test]
    fn test_markdown_table_rows() {
        let forest = create_test_forest();
        let mut output = Vec::new();

        MarkdownExporter.export(&forest, &mut output).unwrap();

        let md = String::from_utf8(output).unwrap();
        assert!(md.contains("| react | `^18.2.0` | prod | MIT | - |"));
        assert!(md.contains("| &nbsp;&nbsp;react-dom | `1.0.0` | prod | - | - |"));
        assert!(md.contains("HIGH"));
    }

    #[test]
    fn test_markdown_empty_forest() {
        let mut output = Vec::new();
        MarkdownExporter.export(&[], &mut output).unwrap();

        let md = String::from_utf8(output).unwrap();
        assert!(md.contains("- Total top-level dependencies: 0"));
    }
}
