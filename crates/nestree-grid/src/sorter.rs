//! Display ordering of a fetched batch and root pruning.
//!
//! Ordering is `(forest id, left)`; left bounds are unique within a forest,
//! so no further tie-break exists. The parent resolver relies on this order.

use std::collections::HashMap;

use nestree_core::bounds::{is_immediate_child_of, sibling_order_key};
use nestree_core::id::NodeId;
use nestree_core::node::TreeRow;

/// Rows in display order plus a `NodeId → position` index.
///
/// The index is positional: anything that removes rows must rebuild it.
#[derive(Debug, Clone, Default)]
pub struct SortedBatch {
    rows: Vec<TreeRow>,
    index: HashMap<NodeId, usize>,
}

impl SortedBatch {
    fn from_sorted(rows: Vec<TreeRow>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            index.entry(row.id()).or_insert(pos);
        }
        Self { rows, index }
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TreeRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeRow> {
        self.rows.iter()
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeRow> {
        self.position(id).map(|p| &self.rows[p])
    }

    /// Immediate children of `id` present in this batch, counted by scanning.
    ///
    /// Unlike the bound-derived count this only sees what was fetched.
    pub fn immediate_child_count(&self, id: NodeId) -> usize {
        let Some(parent) = self.get(id) else {
            return 0;
        };
        self.rows
            .iter()
            .filter(|r| is_immediate_child_of(&r.node, &parent.node))
            .count()
    }
}

pub struct ForestSorter;

impl ForestSorter {
    /// Stable sort into display order. Sorting a sorted batch is a no-op.
    pub fn sort(mut rows: Vec<TreeRow>) -> SortedBatch {
        rows.sort_by_key(|r| sibling_order_key(&r.node));
        SortedBatch::from_sorted(rows)
    }

    pub fn is_sorted(rows: &[TreeRow]) -> bool {
        rows.windows(2)
            .all(|w| sibling_order_key(&w[0].node) <= sibling_order_key(&w[1].node))
    }

    /// Drop every depth-0 row and rebuild the key index.
    pub fn prune_roots(batch: SortedBatch) -> SortedBatch {
        let rows: Vec<TreeRow> = batch.rows.into_iter().filter(|r| !r.node.is_root()).collect();
        SortedBatch::from_sorted(rows)
    }
}
