//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use nestree_core::id::NodeId;
use nestree_core::node::{NodeRecord, TreeRow};
use nestree_core::schema::TreeColumns;
use nestree_core::types::Record;
use nestree_store::MemoryStore;

/// Build a complete tree in preorder: every node at depth `d` gets
/// `fanout[d]` children. Ids are assigned sequentially from `first_id`.
pub fn generate_tree(forest: Option<u64>, fanout: &[usize], first_id: u64) -> Vec<NodeRecord> {
    let mut out = Vec::new();
    let mut counter = 1i64;
    let mut next_id = first_id;
    build(0, fanout, &mut counter, &mut next_id, forest, &mut out);
    out
}

fn build(
    depth: u32,
    fanout: &[usize],
    counter: &mut i64,
    next_id: &mut u64,
    forest: Option<u64>,
    out: &mut Vec<NodeRecord>,
) {
    let idx = out.len();
    let mut node = NodeRecord::new(*next_id, *counter, 0, depth);
    if let Some(f) = forest {
        node = node.in_forest(f);
    }
    *next_id += 1;
    *counter += 1;
    out.push(node);
    if let Some(&n) = fanout.get(depth as usize) {
        for _ in 0..n {
            build(depth + 1, fanout, counter, next_id, forest, out);
        }
    }
    out[idx].right = *counter;
    *counter += 1;
}

/// The four-node fixture: 1 [1..10] → 2 [2..5] → 3 [3..4]; 1 → 4 [6..9].
pub fn small_tree() -> Vec<NodeRecord> {
    vec![
        NodeRecord::new(1, 1, 10, 0),
        NodeRecord::new(2, 2, 5, 1),
        NodeRecord::new(3, 3, 4, 2),
        NodeRecord::new(4, 6, 9, 1),
    ]
}

pub fn to_records(nodes: &[NodeRecord], columns: &TreeColumns) -> Vec<Record> {
    nodes
        .iter()
        .map(|n| {
            n.to_record(columns)
                .with("title", format!("node {}", n.id.get()))
        })
        .collect()
}

pub fn to_rows(nodes: &[NodeRecord], columns: &TreeColumns) -> Vec<TreeRow> {
    nodes.iter().map(|n| TreeRow::bare(*n, columns)).collect()
}

pub fn store_of(nodes: &[NodeRecord], columns: &TreeColumns) -> MemoryStore {
    MemoryStore::from_records(to_records(nodes, columns))
}

/// Deterministic reordering that breaks (forest, left) order.
pub fn scramble<T>(mut items: Vec<T>) -> Vec<T> {
    items.reverse();
    let n = items.len();
    if n > 2 {
        items.rotate_left(n / 3);
    }
    items
}

/// Ancestor chain of `id` (outermost first) found by brute-force scanning.
pub fn scan_ancestors(nodes: &[NodeRecord], id: NodeId) -> Vec<NodeId> {
    let Some(target) = nodes.iter().find(|n| n.id == id) else {
        return Vec::new();
    };
    let mut chain: Vec<&NodeRecord> = nodes
        .iter()
        .filter(|a| {
            a.forest == target.forest && a.left < target.left && a.right > target.right
        })
        .collect();
    chain.sort_by_key(|a| a.left);
    chain.into_iter().map(|a| a.id).collect()
}
