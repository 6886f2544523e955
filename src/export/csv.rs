//! CSV export implementation.
//!
//! Flattens the forest into one row per node, depth-first, with a
//! depth column preserving the tree shape.

use std::io::{self, Write};

use super::Exporter;
use crate::tree::DependencyNode;

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    fn write_rows<W: Write>(
        nodes: &[DependencyNode],
        depth: usize,
        writer: &mut W,
    ) -> io::Result<()> {
        for node in nodes {
            writeln!(
                writer,
                "{},{},{},{},{},{},{}",
                Self::escape_field(&node.name),
                Self::escape_field(&node.version),
                node.kind.label(),
                Self::escape_field(node.license.as_deref().unwrap_or("")),
                node.vulnerabilities.len(),
                node.has_version_conflict,
                depth
            )?;
            Self::write_rows(&node.children, depth + 1, writer)?;
        }
        Ok(())
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, forest: &[DependencyNode], writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "name,version,kind,license,vulnerabilities,has_conflict,depth"
        )?;
        Self::write_rows(forest, 0, writer)
    }
}
