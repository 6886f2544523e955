//! Structured filter options for the query engine.

use std::collections::HashSet;

use crate::parser::DependencyKind;

/// How the declared version spec constrains a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionConstraintMode {
    /// No version constraint.
    #[default]
    All,
    /// Pinned specs only: no `^`, `~`, or `>=` marker.
    Exact,
    /// Ranged specs only: any `^`, `~`, or `>=` marker.
    Range,
    /// The literal `latest` or a wildcard spec.
    LatestOnly,
}

impl VersionConstraintMode {
    /// Display label for the filter panel.
    pub fn label(&self) -> &'static str {
        match self {
            VersionConstraintMode::All => "all",
            VersionConstraintMode::Exact => "exact",
            VersionConstraintMode::Range => "range",
            VersionConstraintMode::LatestOnly => "latest",
        }
    }

    /// The next mode in cycling order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            VersionConstraintMode::All => VersionConstraintMode::Exact,
            VersionConstraintMode::Exact => VersionConstraintMode::Range,
            VersionConstraintMode::Range => VersionConstraintMode::LatestOnly,
            VersionConstraintMode::LatestOnly => VersionConstraintMode::All,
        }
    }
}

/// The structured half of a query.
///
/// Empty sets mean "no constraint"; the default value constrains
/// nothing and, combined with empty search text, makes the filter an
/// identity transform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOptions {
    /// Keep only these kinds; empty keeps all.
    pub dependency_kinds: HashSet<DependencyKind>,

    /// Keep only nodes whose license is in this set; empty keeps all.
    pub license_types: HashSet<String>,

    /// Keep only nodes whose spec looks un-pinned (`^` or `~`).
    pub show_outdated_only: bool,

    /// Keep only nodes with at least one known vulnerability.
    pub show_with_vulnerabilities_only: bool,

    /// Version spec constraint.
    pub version_constraint_mode: VersionConstraintMode,
}

impl FilterOptions {
    /// True when no structured filter constrains anything.
    pub fn is_unconstrained(&self) -> bool {
        self.dependency_kinds.is_empty()
            && self.license_types.is_empty()
            && !self.show_outdated_only
            && !self.show_with_vulnerabilities_only
            && self.version_constraint_mode == VersionConstraintMode::All
    }

    /// Adds or removes a kind from the kind filter.
    pub fn toggle_kind(&mut self, kind: DependencyKind) {
        if !self.dependency_kinds.remove(&kind) {
            self.dependency_kinds.insert(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconstrained() {
        assert!(FilterOptions::default().is_unconstrained());
    }

    #[test]
    fn test_any_constraint_flips_unconstrained() {
        let mut options = FilterOptions::default();
        options.show_outdated_only = true;
        assert!(!options.is_unconstrained());

        let mut options = FilterOptions::default();
        options.version_constraint_mode = VersionConstraintMode::Exact;
        assert!(!options.is_unconstrained());

        let mut options = FilterOptions::default();
        options.license_types.insert("MIT".to_string());
        assert!(!options.is_unconstrained());
    }

    #[test]
    fn test_toggle_kind() {
        let mut options = FilterOptions::default();
        options.toggle_kind(DependencyKind::Production);
        assert!(options.dependency_kinds.contains(&DependencyKind::Production));

        options.toggle_kind(DependencyKind::Production);
        assert!(options.dependency_kinds.is_empty());
    }

    #[test]
    fn test_mode_cycle_wraps() {
        let mut mode = VersionConstraintMode::All;
        for _ in 0..4 {
            mode = mode.next();
        }
        assert_eq!(mode, VersionConstraintMode::All);
    }
}
