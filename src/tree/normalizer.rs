//! Assembles parser output into the canonical dependency forest.
//!
//! For each flat record the normalizer mints a [`DependencyNode`],
//! attaches resolver metadata, and — for a few well-known npm packages
//! — a small static set of illustrative child dependencies so the tree
//! view has nesting to show. The table is fixed and documented below;
//! no real transitive resolution happens here.

use std::collections::HashMap;

use crate::parser::{DependencyKind, DependencyRecord, Ecosystem};
use crate::resolver::MetadataResolver;
use crate::tree::DependencyNode;

/// Builds the canonical forest from parsed records.
///
/// Emits nodes in record order, calling the resolver once per record
/// (and once per synthetic child). A record is flagged with
/// `has_version_conflict` when the same package name appears elsewhere
/// in the record list with a different version spec, e.g. `react` in
/// `dependencies` at `^18.2.0` and in `peerDependencies` at `>=16.8.0`.
pub fn normalize(
    records: &[DependencyRecord],
    ecosystem: Ecosystem,
    resolver: &dyn MetadataResolver,
) -> Vec<DependencyNode> {
    let conflicts = conflicting_names(records);

    let forest: Vec<DependencyNode> = records
        .iter()
        .map(|record| {
            let mut node = build_node(record, ecosystem, resolver);
            node.has_version_conflict = conflicts.contains(&record.name.as_str());
            node.children = demo_children(&record.name, ecosystem)
                .iter()
                .map(|child| build_node(child, ecosystem, resolver))
                .collect();
            node
        })
        .collect();

    tracing::debug!(
        roots = forest.len(),
        total = forest.iter().map(|n| n.subtree_len()).sum::<usize>(),
        "normalized dependency forest"
    );

    forest
}

fn build_node(
    record: &DependencyRecord,
    ecosystem: Ecosystem,
    resolver: &dyn MetadataResolver,
) -> DependencyNode {
    let meta = resolver.resolve(&record.name, ecosystem);

    let mut node = DependencyNode::new(record.name.clone(), record.version.clone(), record.kind);
    node.license = meta.license;
    node.latest_version = meta.latest_version;
    node.repository_url = meta.repository_url;
    node.homepage = meta.homepage;
    node.vulnerabilities = meta.vulnerabilities;
    node
}

/// Names declared more than once with diverging version specs.
fn conflicting_names(records: &[DependencyRecord]) -> std::collections::HashSet<&str> {
    let mut versions: HashMap<&str, &str> = HashMap::new();
    let mut conflicts = std::collections::HashSet::new();

    for record in records {
        match versions.get(record.name.as_str()) {
            Some(seen) if *seen != record.version => {
                conflicts.insert(record.name.as_str());
            }
            _ => {
                versions.insert(&record.name, &record.version);
            }
        }
    }

    conflicts
}

/// Static illustrative sub-dependency table.
///
/// npm only: `react`, `lucide-react`, and `d3` gain a `{name}-dom`
/// runtime child plus a `@types/{name}` dev child; `tailwindcss` gains
/// its two real companion packages. Demo seeding, not resolution.
fn demo_children(name: &str, ecosystem: Ecosystem) -> Vec<DependencyRecord> {
    if ecosystem != Ecosystem::Npm {
        return Vec::new();
    }

    match name {
        "react" | "lucide-react" | "d3" => vec![
            DependencyRecord::new(format!("{}-dom", name), "1.0.0", DependencyKind::Production),
            DependencyRecord::new(
                format!("@types/{}", name),
                "^18.0.0",
                DependencyKind::Development,
            ),
        ],
        "tailwindcss" => vec![
            DependencyRecord::new("postcss", "^8.4.0", DependencyKind::Production),
            DependencyRecord::new("autoprefixer", "^10.4.0", DependencyKind::Production),
        ],
        _ => Vec::new(),
    }
}
