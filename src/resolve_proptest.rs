//! Property-based tests for conflict resolution.
//!
//! These tests use proptest to generate random dependency trees and verify
//! that the resolver's invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::package::PackageDescriptor;
    use crate::resolve::resolve;
    use crate::tree::{DependencyTree, NodeId};
    use proptest::prelude::*;
    use std::collections::{BTreeSet, HashMap};

    /// Each entry is `(parent pick, source index, ref index)`. The parent pick
    /// selects among the sentinel and every node created before this one.
    fn build(shape: &[(usize, u8, u8)]) -> DependencyTree {
        let mut tree = DependencyTree::new();
        let mut ids = vec![tree.root()];
        for (i, &(parent_pick, source, rev)) in shape.iter().enumerate() {
            let parent = ids[parent_pick % ids.len()];
            let pkg = PackageDescriptor::new(
                format!("pkg{}", i),
                format!("git://src{}", source),
                "",
            )
            .pinned(format!("r{}", rev));
            ids.push(tree.add_child(parent, pkg));
        }
        tree
    }

    fn refs_by_source(tree: &DependencyTree) -> HashMap<String, BTreeSet<String>> {
        let mut refs: HashMap<String, BTreeSet<String>> = HashMap::new();
        for id in tree.breadth_first(tree.root()) {
            let pkg = tree.descriptor(id).unwrap();
            refs.entry(pkg.source.clone())
                .or_default()
                .insert(pkg.git_ref());
        }
        refs
    }

    fn tree_strategy() -> impl Strategy<Value = Vec<(usize, u8, u8)>> {
        prop::collection::vec((0usize..64, 0u8..4, 0u8..3), 0..40)
    }

    proptest! {
        /// Property: exactly the sources with more than one distinct ref are
        /// reported, so single-ref sources never produce a false positive
        #[test]
        fn conflicts_match_sources_with_several_refs(shape in tree_strategy()) {
            let tree = build(&shape);
            let report = resolve(&tree);

            let expected: BTreeSet<String> = refs_by_source(&tree)
                .into_iter()
                .filter(|(_, refs)| refs.len() > 1)
                .map(|(source, _)| source)
                .collect();
            let reported: BTreeSet<String> =
                report.conflicts.iter().map(|c| c.source.clone()).collect();

            prop_assert_eq!(reported, expected);
            prop_assert_eq!(report.resolved(&tree).len(), report.len());
        }

        /// Property: the chosen request is never deeper than any other
        /// request for the same source
        #[test]
        fn chosen_request_is_shallowest(shape in tree_strategy()) {
            let tree = build(&shape);
            for conflict in resolve(&tree).conflicts {
                let chosen_depth = tree.depth(conflict.chosen);
                let all: Vec<NodeId> = conflict
                    .changesets
                    .iter()
                    .flat_map(|c| c.nodes.iter().copied())
                    .collect();
                for node in all {
                    prop_assert!(chosen_depth <= tree.depth(node));
                }
            }
        }

        /// Property: every request for a conflicting source lands in exactly
        /// one changeset, under its own ref
        #[test]
        fn every_request_is_recorded_once(shape in tree_strategy()) {
            let tree = build(&shape);
            for conflict in resolve(&tree).conflicts {
                let expected = tree
                    .breadth_first(tree.root())
                    .filter(|&id| tree.descriptor(id).unwrap().source == conflict.source)
                    .count();
                let mut recorded = 0;
                for changeset in &conflict.changesets {
                    for &node in &changeset.nodes {
                        prop_assert_eq!(&tree.descriptor(node).unwrap().git_ref(), &changeset.git_ref);
                        recorded += 1;
                    }
                }
                prop_assert_eq!(recorded, expected);
            }
        }

        /// Property: resolution is deterministic for a given tree
        #[test]
        fn resolution_is_deterministic(shape in tree_strategy()) {
            let tree = build(&shape);
            prop_assert_eq!(resolve(&tree), resolve(&tree));
        }
    }
}
