//! JSON export implementation.
//!
//! A lossless structural dump of the canonical forest, suitable for
//! re-ingestion by other tooling.

use std::io::{self, Write};

use super::Exporter;
use crate::tree::DependencyNode;

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, forest: &[DependencyNode], writer: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(forest)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
