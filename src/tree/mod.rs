//! The canonical dependency forest.
//!
//! This module owns the unified data model every manifest converges on:
//! [`DependencyNode`] trees assembled by the [`normalizer`] from parser
//! records plus resolver metadata, with UI expand state tracked by the
//! [`NodeStateStore`].
//!
//! A forest is built once per successful parse; uploading a new
//! manifest discards the previous forest entirely, there is no merging.
//!
//! # Example
//!
//! ```
//! use depviz::parser::parse_manifest;
//! use depviz::resolver::StaticResolver;
//! use depviz::tree::normalize;
//!
//! let json = r#"{"dependencies": {"react": "^18.2.0"}}"#;
//! let (ecosystem, records) = parse_manifest("package.json", json).unwrap();
//! let forest = normalize(&records, ecosystem, &StaticResolver::default());
//!
//! assert_eq!(forest[0].name, "react");
//! assert_eq!(forest[0].license.as_deref(), Some("MIT"));
//! ```

mod node;
mod normalizer;
mod state;

pub use node::{DependencyNode, Severity, Vulnerability};
pub use normalizer::normalize;
pub use state::NodeStateStore;
