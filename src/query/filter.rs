//! The recursive filter engine.
//!
//! Computes the visible sub-forest for a free-text query plus
//! structured filter options. Pure and total: nodes are never mutated,
//! and no combination of inputs fails — an unmatchable query yields an
//! empty forest.
//!
//! Search and the structured filters combine as
//! `(search OR matching-descendant) AND all-structured-filters`: a
//! matching descendant keeps its ancestors visible, but only the text
//! clause is relaxed for them — an ancestor that fails a structured
//! filter is dropped along with its role as a path to the match.

use crate::tree::DependencyNode;

use super::options::{FilterOptions, VersionConstraintMode};

/// Filters a forest, preserving ancestor chains of matching
/// descendants.
///
/// A kept node is emitted as a shallow copy whose children are the
/// recursively filtered subset, so a kept ancestor shows only the
/// children that themselves pass. Empty search text with default
/// options is an identity transform and short-circuits without
/// copying per node.
pub fn filter_forest(
    forest: &[DependencyNode],
    search_text: &str,
    options: &FilterOptions,
) -> Vec<DependencyNode> {
    if search_text.is_empty() && options.is_unconstrained() {
        return forest.to_vec();
    }

    let search_lower = search_text.to_lowercase();
    filter_level(forest, &search_lower, options)
}

fn filter_level(
    nodes: &[DependencyNode],
    search_lower: &str,
    options: &FilterOptions,
) -> Vec<DependencyNode> {
    nodes
        .iter()
        .filter_map(|node| {
            let children = filter_level(&node.children, search_lower, options);
            let has_matching_descendant = !children.is_empty() && !search_lower.is_empty();

            let search_matches =
                search_lower.is_empty() || node.name.to_lowercase().contains(search_lower);

            let keep = (search_matches || has_matching_descendant)
                && kind_matches(node, options)
                && license_matches(node, options)
                && version_constraint_matches(node, options)
                && outdated_matches(node, options)
                && vulnerability_matches(node, options);

            keep.then(|| shallow_copy(node, children))
        })
        .collect()
}

fn kind_matches(node: &DependencyNode, options: &FilterOptions) -> bool {
    options.dependency_kinds.is_empty() || options.dependency_kinds.contains(&node.kind)
}

fn license_matches(node: &DependencyNode, options: &FilterOptions) -> bool {
    options.license_types.is_empty()
        || node
            .license
            .as_ref()
            .is_some_and(|license| options.license_types.contains(license))
}

fn version_constraint_matches(node: &DependencyNode, options: &FilterOptions) -> bool {
    let version = &node.version;
    let is_ranged =
        version.contains('^') || version.contains('~') || version.contains(">=");

    match options.version_constraint_mode {
        VersionConstraintMode::All => true,
        VersionConstraintMode::Exact => !is_ranged,
        VersionConstraintMode::Range => is_ranged,
        VersionConstraintMode::LatestOnly => version == "latest" || version.contains('*'),
    }
}

fn outdated_matches(node: &DependencyNode, options: &FilterOptions) -> bool {
    // Un-pinned specs stand in for "outdated"; this is a heuristic, not
    // a registry check
    !options.show_outdated_only || node.version.contains('^') || node.version.contains('~')
}

fn vulnerability_matches(node: &DependencyNode, options: &FilterOptions) -> bool {
    !options.show_with_vulnerabilities_only || !node.vulnerabilities.is_empty()
}

fn shallow_copy(node: &DependencyNode, children: Vec<DependencyNode>) -> DependencyNode {
    DependencyNode {
        name: node.name.clone(),
        version: node.version.clone(),
        latest_version: node.latest_version.clone(),
        kind: node.kind,
        children,
        license: node.license.clone(),
        repository_url: node.repository_url.clone(),
        homepage: node.homepage.clone(),
        vulnerabilities: node.vulnerabilities.clone(),
        is_expanded: node.is_expanded,
        has_version_conflict: node.has_version_conflict,
    }
}
