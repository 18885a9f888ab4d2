//! # Conflict Resolution
//!
//! Once the dependency tree is complete, this module looks for sources that
//! were requested at more than one ref and picks one canonical ref for each.
//!
//! ## Algorithm
//!
//! 1.  Nodes are visited breadth-first from the direct dependencies down, so
//!     shallower requests are always seen before deeper ones.
//! 2.  Requests are grouped by source URL, not by package name: two packages
//!     with different names but the same source are the same dependency.
//! 3.  The first node seen for a source is its canonical choice and is never
//!     replaced. Every node, the first included, is recorded in the changeset
//!     for its ref (`branch/revision`).
//! 4.  A source with more than one changeset is a conflict.
//!
//! The result is "shallowest wins, ties broken by discovery order". No
//! attempt is made to find a ref every requester would accept.
//!
//! Conflicts, and the changesets within each conflict, are reported in the
//! order they were first discovered, so the same tree always yields the same
//! report.

use std::collections::HashMap;
use std::fmt::Write;

use crate::package::PackageDescriptor;
use crate::tree::{DependencyTree, NodeId};

/// All the nodes that requested one ref of a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub git_ref: String,
    pub nodes: Vec<NodeId>,
}

/// A source requested at more than one ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub source: String,
    /// The canonical request: shallowest, then first discovered.
    pub chosen: NodeId,
    pub changesets: Vec<Changeset>,
}

/// Every conflict found in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    /// The canonical descriptor of every conflicting source.
    pub fn resolved(&self, tree: &DependencyTree) -> Vec<PackageDescriptor> {
        self.conflicts
            .iter()
            .filter_map(|conflict| tree.descriptor(conflict.chosen).cloned())
            .collect()
    }

    /// Human-readable warning for every conflict.
    ///
    /// Each requested ref is listed with the nodes that asked for it, the
    /// chosen one marked `(*)`, followed by the chain of packages that pulled
    /// each request in.
    pub fn render(&self, tree: &DependencyTree) -> String {
        let mut out = String::new();
        for conflict in &self.conflicts {
            let _ = writeln!(
                out,
                "Warning: conflicting versions found for {} (* was chosen):",
                conflict.source
            );
            for changeset in &conflict.changesets {
                for &node in &changeset.nodes {
                    let prefix = if node == conflict.chosen { "(*) " } else { "    " };
                    let _ = writeln!(out, "  {}{}", prefix, changeset.git_ref);

                    let mut indent = " ".repeat(8);
                    for ancestor in tree.ancestors(node) {
                        if let Some(pkg) = tree.descriptor(ancestor) {
                            let _ = writeln!(out, "{}... from {}", indent, pkg.source);
                            indent.push_str("  ");
                        }
                    }
                }
            }
        }
        out
    }
}

/// Per-source bookkeeping during traversal.
struct SourceRecord {
    source: String,
    chosen: NodeId,
    changesets: Vec<Changeset>,
}

impl SourceRecord {
    fn record(&mut self, git_ref: String, node: NodeId) {
        match self.changesets.iter_mut().find(|c| c.git_ref == git_ref) {
            Some(changeset) => changeset.nodes.push(node),
            None => self.changesets.push(Changeset {
                git_ref,
                nodes: vec![node],
            }),
        }
    }
}

/// Find every source requested at more than one ref in `tree`.
pub fn resolve(tree: &DependencyTree) -> ConflictReport {
    let mut records: Vec<SourceRecord> = Vec::new();
    let mut by_source: HashMap<String, usize> = HashMap::new();

    for id in tree.breadth_first(tree.root()) {
        let Some(pkg) = tree.descriptor(id) else {
            continue;
        };

        match by_source.get(&pkg.source) {
            Some(&index) => records[index].record(pkg.git_ref(), id),
            None => {
                by_source.insert(pkg.source.clone(), records.len());
                records.push(SourceRecord {
                    source: pkg.source.clone(),
                    chosen: id,
                    changesets: vec![Changeset {
                        git_ref: pkg.git_ref(),
                        nodes: vec![id],
                    }],
                });
            }
        }
    }

    let conflicts: Vec<Conflict> = records
        .into_iter()
        .filter(|record| record.changesets.len() > 1)
        .map(|record| Conflict {
            source: record.source,
            chosen: record.chosen,
            changesets: record.changesets,
        })
        .collect();

    for conflict in &conflicts {
        let refs: Vec<&str> = conflict
            .changesets
            .iter()
            .map(|c| c.git_ref.as_str())
            .collect();
        log::warn!(
            "{} requested at {} refs: {}",
            conflict.source,
            refs.len(),
            refs.join(", ")
        );
    }

    ConflictReport { conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, source: &str, branch: &str, revision: Option<&str>) -> PackageDescriptor {
        let pkg = PackageDescriptor::new(name, source, branch);
        match revision {
            Some(rev) => pkg.pinned(rev),
            None => pkg,
        }
    }

    #[test]
    fn test_same_source_under_two_names_conflicts() {
        let mut tree = DependencyTree::new();
        let root = tree.root();
        let a = tree.add_child(root, pkg("pkgA", "urlX", "dev", None));
        let b = tree.add_child(root, pkg("pkgB", "urlX", "main", None));

        let report = resolve(&tree);

        assert_eq!(report.len(), 1);
        let conflict = &report.conflicts[0];
        assert_eq!(conflict.source, "urlX");
        assert_eq!(conflict.chosen, a);
        assert_eq!(
            conflict.changesets,
            vec![
                Changeset {
                    git_ref: "dev/HEAD".to_string(),
                    nodes: vec![a],
                },
                Changeset {
                    git_ref: "main/HEAD".to_string(),
                    nodes: vec![b],
                },
            ]
        );

        let resolved = report.resolved(&tree);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "pkgA");
    }

    #[test]
    fn test_no_conflict_without_shared_sources() {
        let mut tree = DependencyTree::new();
        let root = tree.root();
        let a = tree.add_child(root, pkg("a", "git://a", "", Some("r1")));
        tree.add_child(a, pkg("b", "git://b", "", Some("r2")));

        let report = resolve(&tree);
        assert!(report.is_empty());
        assert!(report.resolved(&tree).is_empty());
        assert_eq!(report.render(&tree), "");
    }

    #[test]
    fn test_same_ref_twice_is_not_a_conflict() {
        let mut tree = DependencyTree::new();
        let root = tree.root();
        let a = tree.add_child(root, pkg("a", "git://a", "", None));
        tree.add_child(a, pkg("s", "git://shared", "", Some("r1")));
        tree.add_child(root, pkg("s2", "git://shared", "master", Some("r1")));

        assert!(resolve(&tree).is_empty());
    }

    #[test]
    fn test_shallowest_request_wins() {
        let mut tree = DependencyTree::new();
        let root = tree.root();
        // The deeper request is discovered first while fetching, but it sits
        // at depth 2.
        let p = tree.add_child(root, pkg("p", "git://p", "", Some("p1")));
        let deep = tree.add_child(p, pkg("x", "git://x", "dev", Some("r2")));
        let shallow = tree.add_child(root, pkg("x", "git://x", "master", Some("r1")));

        let report = resolve(&tree);
        assert_eq!(report.len(), 1);
        assert_eq!(report.conflicts[0].chosen, shallow);
        assert_eq!(report.conflicts[0].changesets[1].nodes, vec![deep]);
        assert_eq!(report.resolved(&tree)[0].git_ref(), "master/r1");
    }

    #[test]
    fn test_ties_go_to_first_discovered() {
        let mut tree = DependencyTree::new();
        let root = tree.root();
        let first = tree.add_child(root, pkg("a", "git://x", "", Some("r1")));
        tree.add_child(root, pkg("b", "git://x", "", Some("r2")));
        tree.add_child(root, pkg("c", "git://x", "", Some("r1")));

        let report = resolve(&tree);
        assert_eq!(report.conflicts[0].chosen, first);
        assert_eq!(report.conflicts[0].changesets[0].nodes.len(), 2);
    }

    #[test]
    fn test_conflicts_reported_in_discovery_order() {
        let mut tree = DependencyTree::new();
        let root = tree.root();
        tree.add_child(root, pkg("b1", "git://b", "", Some("1")));
        tree.add_child(root, pkg("a1", "git://a", "", Some("1")));
        tree.add_child(root, pkg("a2", "git://a", "", Some("2")));
        tree.add_child(root, pkg("b2", "git://b", "", Some("2")));

        let sources: Vec<_> = resolve(&tree)
            .conflicts
            .into_iter()
            .map(|c| c.source)
            .collect();
        assert_eq!(sources, vec!["git://b", "git://a"]);
    }

    #[test]
    fn test_render_lists_ancestor_chain() {
        let mut tree = DependencyTree::new();
        let root = tree.root();
        let p = tree.add_child(root, pkg("p", "git://p", "", Some("p1")));
        tree.add_child(p, pkg("x", "git://x", "dev", Some("r2")));
        tree.add_child(root, pkg("x", "git://x", "master", Some("r1")));

        let rendered = resolve(&tree).render(&tree);
        let expected = "\
Warning: conflicting versions found for git://x (* was chosen):
  (*) master/r1
      dev/r2
        ... from git://p
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_nests_deeper_chains() {
        let mut tree = DependencyTree::new();
        let root = tree.root();
        tree.add_child(root, pkg("x", "git://x", "", Some("r1")));
        let p = tree.add_child(root, pkg("p", "git://p", "", Some("p1")));
        let q = tree.add_child(p, pkg("q", "git://q", "", Some("q1")));
        tree.add_child(q, pkg("x", "git://x", "", Some("r3")));

        let rendered = resolve(&tree).render(&tree);
        assert!(rendered.contains("\n      master/r3\n        ... from git://q\n          ... from git://p\n"));
    }
}
