//! depviz - Terminal UI dependency manifest visualizer
//!
//! This crate parses a dependency manifest from one of three ecosystems
//! (npm `package.json`, pip `requirements.txt`, Maven `pom.xml`) into a
//! unified dependency forest, enriches it with descriptive metadata,
//! and supports interactive narrowing via free-text search and
//! structured filters.

pub mod export;
pub mod parser;
pub mod query;
pub mod resolver;
pub mod tree;
pub mod ui;
