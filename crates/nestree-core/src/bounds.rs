//! Nested-set bounds codec.
//!
//! Pure functions over `(left, right, depth, forest)`. A node's descendants are
//! the records strictly inside its interval; each descendant contributes one
//! left and one right bound, hence `(right - left - 1) / 2` of them.
//!
//! [`TreeEncoding`] lifts the codec behind a trait so the resolver and the
//! path reconstructor do not depend on the nested-set encoding directly.

use crate::error::{Error, Result};
use crate::id::{ForestId, NodeId};
use crate::node::NodeRecord;
use crate::predicate::Predicate;
use crate::schema::TreeColumns;

/// Left bound of every forest root.
pub const ROOT_LEFT: i64 = 1;

/// `(right - left - 1) / 2`, refusing to truncate a corrupt span.
pub fn child_count(left: i64, right: i64) -> Result<u64> {
    span_count(None, left, right)
}

/// [`child_count`] with the node id in the diagnostic.
pub fn node_child_count(node: &NodeRecord) -> Result<u64> {
    span_count(Some(node.id), node.left, node.right)
}

fn span_count(id: Option<NodeId>, left: i64, right: i64) -> Result<u64> {
    let corrupt = |reason: String| Error::DataIntegrity { node: id, reason };
    if right <= left {
        return Err(corrupt(format!(
            "right bound {} is not greater than left bound {}",
            right, left
        )));
    }
    let inner = right
        .checked_sub(left)
        .and_then(|d| d.checked_sub(1))
        .ok_or_else(|| corrupt(format!("bounds {}..{} overflow", left, right)))?;
    if inner % 2 != 0 {
        return Err(corrupt(format!(
            "bounds {}..{} enclose an odd number of slots",
            left, right
        )));
    }
    Ok((inner / 2) as u64)
}

/// Bounds sanity check applied to every row of a pass.
pub fn validate(node: &NodeRecord) -> Result<()> {
    node_child_count(node).map(|_| ())
}

pub fn same_forest(a: &NodeRecord, b: &NodeRecord) -> bool {
    a.forest == b.forest
}

/// `parent.left < child.left && child.right < parent.right`, same forest.
pub fn is_descendant_of(child: &NodeRecord, parent: &NodeRecord) -> bool {
    same_forest(child, parent) && parent.left < child.left && child.right < parent.right
}

pub fn is_immediate_child_of(child: &NodeRecord, parent: &NodeRecord) -> bool {
    is_descendant_of(child, parent) && child.depth == parent.depth + 1
}

/// Display order key: forest id (0 when absent), then left bound.
pub fn sibling_order_key(node: &NodeRecord) -> (ForestId, i64) {
    (node.forest_key(), node.left)
}

/// Equality on the forest column, when the table has one and the node knows
/// its forest.
pub fn forest_scope(columns: &TreeColumns, forest: Option<ForestId>) -> Option<Predicate> {
    match (&columns.forest, forest) {
        (Some(col), Some(f)) => Some(Predicate::eq(col.as_str(), f)),
        _ => None,
    }
}

/// Hierarchy encoding capability.
///
/// Implementations must agree with their own predicates: a record matches
/// `children_predicate(p)` exactly when `is_immediate_child_of(record, p)`.
pub trait TreeEncoding: Send + Sync {
    /// Human-readable encoding name (stable).
    fn name(&self) -> &'static str;

    fn child_count(&self, node: &NodeRecord) -> Result<u64>;

    fn is_immediate_child_of(&self, child: &NodeRecord, parent: &NodeRecord) -> bool;

    /// Every record that strictly contains `target`: its whole ancestor chain.
    fn ancestors_predicate(&self, target: &NodeRecord, columns: &TreeColumns) -> Predicate;

    /// Immediate children of `parent`.
    fn children_predicate(&self, parent: &NodeRecord, columns: &TreeColumns) -> Predicate;

    /// Forest roots, optionally restricted to one forest.
    fn roots_predicate(&self, forest: Option<ForestId>, columns: &TreeColumns) -> Predicate;
}

/// The nested-set encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedSet;

impl TreeEncoding for NestedSet {
    fn name(&self) -> &'static str {
        "nested-set"
    }

    fn child_count(&self, node: &NodeRecord) -> Result<u64> {
        node_child_count(node)
    }

    fn is_immediate_child_of(&self, child: &NodeRecord, parent: &NodeRecord) -> bool {
        is_immediate_child_of(child, parent)
    }

    fn ancestors_predicate(&self, target: &NodeRecord, columns: &TreeColumns) -> Predicate {
        Predicate::lt(columns.left.as_str(), target.left)
            .and(Predicate::gt(columns.right.as_str(), target.right))
            .and_maybe(forest_scope(columns, target.forest))
    }

    fn children_predicate(&self, parent: &NodeRecord, columns: &TreeColumns) -> Predicate {
        Predicate::gt(columns.left.as_str(), parent.left)
            .and(Predicate::lt(columns.right.as_str(), parent.right))
            .and(Predicate::eq(columns.depth.as_str(), parent.depth + 1))
            .and_maybe(forest_scope(columns, parent.forest))
    }

    fn roots_predicate(&self, forest: Option<ForestId>, columns: &TreeColumns) -> Predicate {
        Predicate::eq(columns.left.as_str(), ROOT_LEFT).and_maybe(forest_scope(columns, forest))
    }
}
