//! Deep links: materialize the path from a forest root down to a target node.
//!
//! The whole ancestor chain comes back from one range query (every node whose
//! interval strictly contains the target). Each ancestor then costs one more
//! query for its immediate children, so siblings are visible at every level.
//! Round trips are O(depth).

use std::collections::{BTreeSet, HashSet};

use nestree_core::bounds::{is_descendant_of, TreeEncoding, ROOT_LEFT};
use nestree_core::config::TreeConfig;
use nestree_core::id::NodeId;
use nestree_core::node::{NodeRecord, TreeRow};
use nestree_core::predicate::Predicate;
use nestree_core::query::Query;
use nestree_core::Result;
use nestree_store::TreeStore;

use crate::planner::fetch_rows;

/// Records needed to render a target node with its ancestry expanded.
#[derive(Debug, Clone, Default)]
pub struct DeepLink {
    /// `None` when the target does not exist.
    pub target: Option<NodeRecord>,
    /// Every fetched ancestor, outermost first (hidden roots included).
    pub ancestors: Vec<NodeRecord>,
    /// Ancestors (minus hidden roots), their children and the target,
    /// deduplicated, in fetch order.
    pub rows: Vec<TreeRow>,
    /// Ancestors to pre-open so the target is visible.
    pub expanded: BTreeSet<NodeId>,
}

impl DeepLink {
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
    }
}

pub struct PathReconstructor<'a> {
    config: &'a TreeConfig,
    encoding: &'a dyn TreeEncoding,
}

impl<'a> PathReconstructor<'a> {
    pub fn new(config: &'a TreeConfig, encoding: &'a dyn TreeEncoding) -> Self {
        Self { config, encoding }
    }

    /// Single query for the whole ancestor chain of `target`.
    pub fn ancestors_query(&self, target: &NodeRecord) -> Query {
        let columns = &self.config.columns;
        Query::in_tree_order(self.encoding.ancestors_predicate(target, columns), columns)
    }

    /// One children query per ancestor.
    pub fn children_queries(&self, ancestors: &[NodeRecord]) -> Vec<Query> {
        let columns = &self.config.columns;
        ancestors
            .iter()
            .map(|a| Query::in_tree_order(self.encoding.children_predicate(a, columns), columns))
            .collect()
    }

    /// Ancestors that must be open for `target` to be visible.
    pub fn expanded_set<'n>(
        &self,
        target: &NodeRecord,
        candidates: impl IntoIterator<Item = &'n NodeRecord>,
    ) -> BTreeSet<NodeId> {
        candidates
            .into_iter()
            .filter(|a| a.id != target.id && is_descendant_of(target, a))
            .filter(|a| self.is_visible(a))
            .map(|a| a.id)
            .collect()
    }

    fn is_visible(&self, node: &NodeRecord) -> bool {
        self.config.policy.show_roots || node.left != ROOT_LEFT
    }

    /// Look the target up by id, then reconstruct its path.
    pub fn reconstruct<S: TreeStore + ?Sized>(&self, store: &S, target: NodeId) -> Result<DeepLink> {
        let columns = &self.config.columns;
        let query = Query::new(Predicate::eq(columns.id.as_str(), target));
        match store.fetch_one(&query)? {
            Some(rec) => {
                let row = TreeRow::from_record(rec, columns)?;
                self.reconstruct_row(store, row)
            }
            None => Ok(DeepLink::default()),
        }
    }

    /// Reconstruct the path to an already-fetched target row.
    pub fn reconstruct_row<S: TreeStore + ?Sized>(
        &self,
        store: &S,
        target: TreeRow,
    ) -> Result<DeepLink> {
        let target_node = target.node;
        let ancestor_rows = fetch_rows(store, self.ancestors_query(&target_node), self.config)?;
        let ancestors: Vec<NodeRecord> = ancestor_rows.iter().map(|r| r.node).collect();

        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        let mut keep = |row: TreeRow, rows: &mut Vec<TreeRow>| {
            if seen.insert(row.id()) {
                rows.push(row);
            }
        };

        for row in ancestor_rows {
            if self.is_visible(&row.node) {
                keep(row, &mut rows);
            }
        }
        for query in self.children_queries(&ancestors) {
            #[cfg(feature = "tracing")]
            tracing::trace!(predicate = %query.predicate, "fetching path level");
            for row in fetch_rows(store, query, self.config)? {
                keep(row, &mut rows);
            }
        }
        if self.is_visible(&target_node) {
            keep(target, &mut rows);
        }

        let expanded = self.expanded_set(&target_node, &ancestors);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node = %target_node.id,
            ancestors = ancestors.len(),
            rows = rows.len(),
            expanded = expanded.len(),
            "reconstructed deep link"
        );

        Ok(DeepLink {
            target: Some(target_node),
            ancestors,
            rows,
            expanded,
        })
    }
}
