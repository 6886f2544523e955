//! Query engine for narrowing the dependency forest.
//!
//! A query is free-text search plus [`FilterOptions`]; the engine
//! recomputes the visible sub-forest from scratch on every change.
//! Whole-tree re-filtering per keystroke is deliberate: the transform
//! is pure and CPU-only, so no debouncing or caching is needed.
//!
//! # Example
//!
//! ```
//! use depviz::parser::DependencyKind;
//! use depviz::query::{filter_forest, FilterOptions};
//! use depviz::tree::DependencyNode;
//!
//! let forest = vec![
//!     DependencyNode::new("react", "^18.2.0", DependencyKind::Production),
//!     DependencyNode::new("lodash", "^4.17.21", DependencyKind::Production),
//! ];
//!
//! let filtered = filter_forest(&forest, "rea", &FilterOptions::default());
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].name, "react");
//! ```

mod filter;
mod options;

pub use filter::filter_forest;
pub use options::{FilterOptions, VersionConstraintMode};
