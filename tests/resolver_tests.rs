//! Parent resolution and ordering over generated nested sets

mod test_data_gen;

use std::collections::HashMap;

use nestree_core::bounds::{is_descendant_of, is_immediate_child_of, node_child_count};
use nestree_core::config::DepthMode;
use nestree_core::id::NodeId;
use nestree_core::node::NodeRecord;
use nestree_core::schema::TreeColumns;
use nestree_grid::{ForestSorter, ParentResolver, ResolveAnomaly};
use test_data_gen::{generate_tree, scramble, small_tree, to_rows};

fn resolve(nodes: &[NodeRecord]) -> Vec<Option<NodeId>> {
    ParentResolver::new(DepthMode::Strict)
        .resolve_all(nodes)
        .expect("resolve failed")
        .parents
}

#[test]
fn test_small_tree_parents() {
    let parents = resolve(&small_tree());
    assert_eq!(
        parents,
        vec![
            None,
            Some(NodeId::new(1)),
            Some(NodeId::new(2)),
            Some(NodeId::new(1)),
        ]
    );
}

#[test]
fn test_every_parent_contains_child_one_level_up() {
    let shapes: [&[usize]; 4] = [&[3, 2, 2], &[1, 1, 1, 1, 1], &[5], &[2, 0, 3]];
    for fanout in shapes {
        let nodes = generate_tree(None, fanout, 1);
        let by_id: HashMap<NodeId, &NodeRecord> = nodes.iter().map(|n| (n.id, n)).collect();
        let parents = resolve(&nodes);
        for (node, parent) in nodes.iter().zip(&parents) {
            match parent {
                Some(pid) => {
                    let p = by_id[pid];
                    assert!(is_descendant_of(node, p));
                    assert_eq!(node.depth, p.depth + 1);
                }
                None => assert!(node.is_root()),
            }
        }
    }
}

#[test]
fn test_child_count_matches_scan() {
    let nodes = generate_tree(None, &[3, 2, 2], 1);
    for n in &nodes {
        let descendants = nodes.iter().filter(|c| is_descendant_of(c, n)).count() as u64;
        assert_eq!(node_child_count(n).unwrap(), descendants);
    }
    // One level above the leaves, descendants are exactly the immediate children.
    for n in nodes.iter().filter(|n| n.depth == 2) {
        let immediate = nodes.iter().filter(|c| is_immediate_child_of(c, n)).count() as u64;
        assert_eq!(node_child_count(n).unwrap(), immediate);
        assert_eq!(immediate, 2);
    }
}

#[test]
fn test_small_tree_immediate_child_counts() {
    let batch = ForestSorter::sort(to_rows(&small_tree(), &TreeColumns::single_tree()));
    assert_eq!(batch.immediate_child_count(NodeId::new(1)), 2);
    assert_eq!(batch.immediate_child_count(NodeId::new(2)), 1);
    assert_eq!(batch.immediate_child_count(NodeId::new(4)), 0);
}

#[test]
fn test_two_forests_never_share_parents() {
    let mut nodes = generate_tree(Some(1), &[2, 2], 1);
    nodes.extend(generate_tree(Some(2), &[2, 2], 100));
    let batch = ForestSorter::sort(to_rows(&scramble(nodes.clone()), &TreeColumns::default()));
    let sorted: Vec<NodeRecord> = batch.iter().map(|r| r.node).collect();
    let by_id: HashMap<NodeId, &NodeRecord> = nodes.iter().map(|n| (n.id, n)).collect();

    let parents = resolve(&sorted);
    for (node, parent) in sorted.iter().zip(&parents) {
        if let Some(pid) = parent {
            assert_eq!(by_id[pid].forest, node.forest, "{} leaked across forests", node.id);
        }
    }
    assert_eq!(parents.iter().filter(|p| p.is_none()).count(), 2);
}

#[test]
fn test_scrambled_input_resolves_after_sort() {
    let nodes = generate_tree(None, &[3, 3], 1);
    let expected = resolve(&nodes);
    let batch = ForestSorter::sort(to_rows(&scramble(nodes), &TreeColumns::single_tree()));
    assert!(ForestSorter::is_sorted(batch.rows()));
    let sorted: Vec<NodeRecord> = batch.iter().map(|r| r.node).collect();
    assert_eq!(resolve(&sorted), expected);
}

#[test]
fn test_sort_and_resolve_are_idempotent() {
    let nodes = generate_tree(Some(3), &[2, 3, 1], 1);
    let once = ForestSorter::sort(to_rows(&scramble(nodes), &TreeColumns::default()));
    let twice = ForestSorter::sort(once.clone().into_rows());
    let a: Vec<NodeRecord> = once.iter().map(|r| r.node).collect();
    let b: Vec<NodeRecord> = twice.iter().map(|r| r.node).collect();
    assert_eq!(a, b);
    assert_eq!(resolve(&a), resolve(&b));
}

#[test]
fn test_pruned_batch_detaches_top_level() {
    let nodes = generate_tree(None, &[3, 2], 1);
    let batch = ForestSorter::prune_roots(ForestSorter::sort(to_rows(
        &nodes,
        &TreeColumns::single_tree(),
    )));
    let pruned: Vec<NodeRecord> = batch.iter().map(|r| r.node).collect();
    let parents = resolve(&pruned);
    let top: Vec<_> = pruned
        .iter()
        .zip(&parents)
        .filter(|(_, p)| p.is_none())
        .map(|(n, _)| n.depth)
        .collect();
    assert_eq!(top, vec![1, 1, 1]);
    for (i, row) in batch.iter().enumerate() {
        assert_eq!(batch.position(row.id()), Some(i));
    }
}

#[test]
fn test_stale_depth_is_caught_by_bounds() {
    let mut nodes = small_tree();
    // 4 still sits inside 1 but claims to be a root.
    nodes[3].depth = 0;

    let res = ParentResolver::new(DepthMode::Tolerant)
        .resolve_all(&nodes)
        .unwrap();
    assert_eq!(res.parents[3], None);
    assert!(matches!(
        res.anomalies.as_slice(),
        [ResolveAnomaly::DepthDrop { node, enclosing, .. }]
            if *node == NodeId::new(4) && *enclosing == NodeId::new(1)
    ));

    assert!(ParentResolver::new(DepthMode::Strict)
        .resolve_all(&nodes)
        .is_err());
}
