//! UI module for the depviz TUI
//!
//! This module provides the terminal user interface for exploring a
//! parsed dependency forest: search-as-you-type, structured filters,
//! and expand/collapse navigation.

mod app;
pub mod rows;

pub use app::{run_app, App};
pub use rows::{flatten_forest, VisibleRow};
