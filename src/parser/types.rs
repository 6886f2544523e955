//! Shared types for manifest parsing.
//!
//! This module defines the core data structures used to represent
//! dependency manifests and their declared dependencies across the
//! supported ecosystems.

use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::fmt;

/// The package ecosystem a manifest belongs to.
///
/// Each ecosystem has exactly one manifest file name and one parser;
/// selection between them is by file identity, never by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    /// npm / Node.js (`package.json`)
    Npm,
    /// pip / Python (`requirements.txt`)
    Pip,
    /// Maven / JVM (`pom.xml`)
    Maven,
}

impl Ecosystem {
    /// Select an ecosystem from a manifest file name.
    ///
    /// Matches the bare file name (`package.json`) or a path ending in
    /// it (`frontend/package.json`). Returns `None` for anything else.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
        match name {
            "package.json" => Some(Ecosystem::Npm),
            "requirements.txt" => Some(Ecosystem::Pip),
            "pom.xml" => Some(Ecosystem::Maven),
            _ => None,
        }
    }

    /// The canonical manifest file name for this ecosystem.
    pub fn manifest_name(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "package.json",
            Ecosystem::Pip => "requirements.txt",
            Ecosystem::Maven => "pom.xml",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pip => "pip",
            Ecosystem::Maven => "maven",
        };
        write!(f, "{}", s)
    }
}

/// Categorizes the declared role of a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Production dependencies - required at runtime.
    Production,
    /// Development dependencies - only needed during development.
    Development,
    /// Peer dependencies - expected to be provided by the consumer.
    Peer,
    /// Optional dependencies - enhance functionality if available.
    Optional,
}

impl DependencyKind {
    /// Returns a short label for the dependency kind.
    pub fn label(&self) -> &'static str {
        match self {
            DependencyKind::Production => "prod",
            DependencyKind::Development => "dev",
            DependencyKind::Peer => "peer",
            DependencyKind::Optional => "optional",
        }
    }

    /// All kinds, in declaration order of a `package.json`.
    pub fn all() -> [DependencyKind; 4] {
        [
            DependencyKind::Production,
            DependencyKind::Development,
            DependencyKind::Peer,
            DependencyKind::Optional,
        ]
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyKind::Production => "production",
            DependencyKind::Development => "development",
            DependencyKind::Peer => "peer",
            DependencyKind::Optional => "optional",
        };
        write!(f, "{}", s)
    }
}

/// Represents the structure of a `package.json` file.
///
/// Mirrors the npm specification, capturing the four dependency maps
/// needed for analysis. Map fields keep the key order of the source
/// document, which defines the emission order of parsed records.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageManifest {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package (semver format).
    pub version: Option<String>,

    /// Production dependencies required at runtime.
    pub dependencies: Option<Map<String, serde_json::Value>>,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<Map<String, serde_json::Value>>,

    /// Peer dependencies that the host package must provide.
    #[serde(rename = "peerDependencies")]
    pub peer_dependencies: Option<Map<String, serde_json::Value>>,

    /// Optional dependencies that enhance functionality if available.
    #[serde(rename = "optionalDependencies")]
    pub optional_dependencies: Option<Map<String, serde_json::Value>>,
}

/// A single declared dependency, as read from a manifest.
///
/// This is the flat, ecosystem-neutral parser output; the tree
/// normalizer turns records into full [`DependencyNode`]s with
/// resolver metadata attached.
///
/// [`DependencyNode`]: crate::tree::DependencyNode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    /// The package name (for Maven, `group:artifact`).
    pub name: String,

    /// The raw version spec as declared, or `"latest"` / `"unknown"`
    /// where the manifest leaves it out.
    pub version: String,

    /// The declared role of this dependency.
    pub kind: DependencyKind,
}

impl DependencyRecord {
    /// Creates a new dependency record.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
        }
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.kind)
    }
}
