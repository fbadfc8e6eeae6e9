//! Deep-link reconstruction against generated forests

mod test_data_gen;

use std::collections::BTreeSet;

use nestree_core::bounds::{is_immediate_child_of, NestedSet};
use nestree_core::config::{DisplayPolicy, TreeConfig};
use nestree_core::id::NodeId;
use nestree_core::node::NodeRecord;
use nestree_core::schema::TreeColumns;
use nestree_grid::{PathReconstructor, TreeGrid};
use nestree_store::MeteredStore;
use test_data_gen::{generate_tree, scan_ancestors, small_tree, store_of};

fn single(policy: DisplayPolicy) -> TreeConfig {
    TreeConfig::new(TreeColumns::single_tree(), policy)
}

#[test]
fn test_small_tree_with_hidden_roots() {
    let cfg = single(DisplayPolicy::roots_hidden());
    let store = MeteredStore::new(store_of(&small_tree(), &cfg.columns));
    let link = PathReconstructor::new(&cfg, &NestedSet)
        .reconstruct(&store, NodeId::new(3))
        .unwrap();

    assert_eq!(link.expanded, BTreeSet::from([NodeId::new(2)]));
    let ancestors: Vec<u64> = link.ancestors.iter().map(|a| a.id.get()).collect();
    assert_eq!(ancestors, vec![1, 2]);
    let rows: BTreeSet<u64> = link.rows.iter().map(|r| r.id().get()).collect();
    assert_eq!(rows, BTreeSet::from([2, 3, 4]));
    // Titles survive the round trip through the store.
    assert!(link.rows.iter().all(|r| r.record.contains("title")));
    assert_eq!(store.fetches(), 4);
}

#[test]
fn test_ancestor_chain_matches_scan_for_every_node() {
    let nodes = generate_tree(None, &[3, 2, 2], 1);
    let cfg = single(DisplayPolicy::roots_shown());
    let store = store_of(&nodes, &cfg.columns);
    let path = PathReconstructor::new(&cfg, &NestedSet);

    for node in &nodes {
        let link = path.reconstruct(&store, node.id).unwrap();
        let chain: Vec<NodeId> = link.ancestors.iter().map(|a| a.id).collect();
        assert_eq!(chain, scan_ancestors(&nodes, node.id), "chain of {}", node.id);
        assert_eq!(link.expanded, chain.iter().copied().collect::<BTreeSet<_>>());
        assert!(!link.expanded.contains(&node.id));
        assert_eq!(link.target, Some(*node));
    }
}

#[test]
fn test_rows_are_chain_plus_siblings_at_every_level() {
    let nodes = generate_tree(None, &[2, 3, 2], 1);
    let cfg = single(DisplayPolicy::roots_shown());
    let store = store_of(&nodes, &cfg.columns);
    let path = PathReconstructor::new(&cfg, &NestedSet);

    let deepest = nodes.iter().max_by_key(|n| (n.depth, n.left)).unwrap();
    let link = path.reconstruct(&store, deepest.id).unwrap();

    let chain: Vec<&NodeRecord> = link.ancestors.iter().collect();
    let mut expected: BTreeSet<NodeId> = chain.iter().map(|a| a.id).collect();
    for node in &nodes {
        if chain.iter().any(|a| is_immediate_child_of(node, a)) {
            expected.insert(node.id);
        }
    }
    let got: BTreeSet<NodeId> = link.rows.iter().map(|r| r.id()).collect();
    assert_eq!(got, expected);
    assert_eq!(got.len(), link.rows.len(), "rows must be deduplicated");
}

#[test]
fn test_round_trips_grow_with_depth_only() {
    let nodes = generate_tree(None, &[4, 4, 4], 1);
    let cfg = single(DisplayPolicy::roots_shown());
    let store = MeteredStore::new(store_of(&nodes, &cfg.columns));
    let path = PathReconstructor::new(&cfg, &NestedSet);

    for node in nodes.iter().step_by(5) {
        store.reset();
        path.reconstruct(&store, node.id).unwrap();
        // target lookup + ancestor range + one children query per ancestor
        assert_eq!(store.fetches(), 2 + node.depth as usize, "fetches for {}", node.id);
    }
}

#[test]
fn test_root_target() {
    let nodes = generate_tree(None, &[2, 2], 1);

    let cfg = single(DisplayPolicy::roots_shown());
    let link = PathReconstructor::new(&cfg, &NestedSet)
        .reconstruct(&store_of(&nodes, &cfg.columns), NodeId::new(1))
        .unwrap();
    assert!(link.ancestors.is_empty());
    assert!(link.expanded.is_empty());
    assert_eq!(link.rows.len(), 1);

    let cfg = single(DisplayPolicy::roots_hidden());
    let link = PathReconstructor::new(&cfg, &NestedSet)
        .reconstruct(&store_of(&nodes, &cfg.columns), NodeId::new(1))
        .unwrap();
    assert!(!link.is_empty());
    assert!(link.rows.is_empty());
    assert!(link.expanded.is_empty());
}

#[test]
fn test_other_forests_never_leak_in() {
    let cfg = TreeConfig::new(TreeColumns::default(), DisplayPolicy::roots_shown());
    let mut nodes = generate_tree(Some(1), &[3, 3], 1);
    // Identical bounds in a second forest.
    nodes.extend(generate_tree(Some(2), &[3, 3], 100));
    let store = store_of(&nodes, &cfg.columns);
    let path = PathReconstructor::new(&cfg, &NestedSet);

    for node in &nodes {
        let link = path.reconstruct(&store, node.id).unwrap();
        assert!(
            link.rows.iter().all(|r| r.node.forest == node.forest),
            "deep link to {} crossed forests",
            node.id
        );
        let chain: Vec<NodeId> = link.ancestors.iter().map(|a| a.id).collect();
        assert_eq!(chain, scan_ancestors(&nodes, node.id));
    }
}

#[test]
fn test_grid_deep_link_with_hidden_roots() {
    let nodes = generate_tree(None, &[2, 2, 2], 1);
    let cfg = single(DisplayPolicy::roots_hidden());
    let grid = TreeGrid::new(store_of(&nodes, &cfg.columns), cfg).unwrap();

    let target = nodes.iter().find(|n| n.depth == 3).unwrap();
    let tree = grid.render_deep_link(target.id).unwrap();
    let chain = scan_ancestors(&nodes, target.id);

    assert!(tree.rows.iter().all(|r| r.node.depth > 0));
    assert_eq!(tree.expanded, chain[1..].iter().copied().collect::<BTreeSet<_>>());
    assert_eq!(tree.parent_of(target.id), chain.last().copied());
    // First visible ancestor is drawn at the top level.
    assert_eq!(tree.parent_of(chain[1]), None);
    assert_eq!(tree.get(chain[1]).unwrap().display_depth, 0);
    assert_eq!(tree.get(target.id).unwrap().display_depth, 2);
    // Every expanded ancestor has its children in the pass.
    for id in &tree.expanded {
        assert!(tree.get(*id).unwrap().children_loaded);
        assert_eq!(tree.children_of(*id).count(), 2);
    }
}

#[test]
fn test_missing_target_renders_nothing() {
    let cfg = single(DisplayPolicy::roots_shown());
    let grid = TreeGrid::new(store_of(&small_tree(), &cfg.columns), cfg).unwrap();
    let tree = grid.render_deep_link(NodeId::new(999)).unwrap();
    assert!(tree.is_empty());
    assert!(tree.expanded.is_empty());
}
