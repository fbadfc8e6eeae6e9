//! Pass orchestration.
//!
//! `TreeGrid` owns a store and a config. Every `render_*` call is one pass:
//! fetch, sort, prune hidden roots, resolve parents with a fresh resolver,
//! then annotate each row for the renderer.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use nestree_core::bounds::{NestedSet, TreeEncoding};
use nestree_core::config::TreeConfig;
use nestree_core::id::{ForestId, NodeId};
use nestree_core::node::{NodeRecord, TreeRow};
use nestree_core::predicate::Predicate;
use nestree_core::query::Query;
use nestree_core::types::Record;
use nestree_core::Result;
use nestree_store::TreeStore;

use crate::metrics::emit_pass;
use crate::path::PathReconstructor;
use crate::planner::{fetch_rows, LazyExpansionPlanner};
use crate::resolver::{ParentResolver, ResolveAnomaly};
use crate::sorter::ForestSorter;

/// One row as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub node: NodeRecord,
    pub record: Record,
    pub parent: Option<NodeId>,
    /// Descendant count derived from bounds.
    pub child_count: u64,
    /// Depth after hidden roots are taken away.
    pub display_depth: u32,
    pub has_children: bool,
    /// At least one immediate child is part of this pass; otherwise the
    /// children are fetched lazily on expansion.
    pub children_loaded: bool,
}

impl RenderedRow {
    pub fn id(&self) -> NodeId {
        self.node.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderedTree {
    pub rows: Vec<RenderedRow>,
    pub expanded: BTreeSet<NodeId>,
    pub anomalies: Vec<ResolveAnomaly>,
}

impl RenderedTree {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&RenderedRow> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|r| r.parent)
    }

    pub fn ids(&self) -> Vec<NodeId> {
        self.rows.iter().map(RenderedRow::id).collect()
    }

    /// Rows drawn at the top level.
    pub fn top_level(&self) -> impl Iterator<Item = &RenderedRow> {
        self.rows.iter().filter(|r| r.parent.is_none())
    }

    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &RenderedRow> {
        self.rows.iter().filter(move |r| r.parent == Some(id))
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }
}

pub struct TreeGrid<S> {
    store: S,
    config: TreeConfig,
    encoding: Box<dyn TreeEncoding>,
}

impl<S: TreeStore> TreeGrid<S> {
    pub fn new(store: S, config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            encoding: Box::new(NestedSet),
        })
    }

    /// Swap the hierarchy encoding.
    pub fn with_encoding(mut self, encoding: Box<dyn TreeEncoding>) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn planner(&self) -> LazyExpansionPlanner<'_> {
        LazyExpansionPlanner::new(&self.config, self.encoding.as_ref())
    }

    pub fn path(&self) -> PathReconstructor<'_> {
        PathReconstructor::new(&self.config, self.encoding.as_ref())
    }

    /// Render a page of records the caller already fetched.
    pub fn render_page(&self, records: Vec<Record>) -> Result<RenderedTree> {
        let rows = records
            .into_iter()
            .map(|rec| TreeRow::from_record(rec, &self.config.columns))
            .collect::<Result<Vec<_>>>()?;
        self.render_rows("page", rows, BTreeSet::new())
    }

    /// Every node, optionally restricted to one forest.
    pub fn render_all(&self, forest: Option<ForestId>) -> Result<RenderedTree> {
        let predicate = match (&self.config.columns.forest, forest) {
            (Some(col), Some(f)) => Predicate::eq(col.as_str(), f),
            _ => Predicate::True,
        };
        let query = Query::in_tree_order(predicate, &self.config.columns);
        let rows = fetch_rows(&self.store, query, &self.config)?;
        self.render_rows("all", rows, BTreeSet::new())
    }

    /// The level below `node` (or the top level for `None`).
    pub fn render_lazy(
        &self,
        node: Option<NodeId>,
        forest_context: Option<ForestId>,
    ) -> Result<RenderedTree> {
        let rows = self
            .planner()
            .fetch_children(&self.store, node, forest_context)?;
        self.render_rows("lazy", rows, BTreeSet::new())
    }

    /// The target's full ancestry with siblings at every level, ancestors
    /// pre-expanded.
    pub fn render_deep_link(&self, target: NodeId) -> Result<RenderedTree> {
        let link = self.path().reconstruct(&self.store, target)?;
        self.render_rows("deep_link", link.rows, link.expanded)
    }

    fn render_rows(
        &self,
        pass: &'static str,
        rows: Vec<TreeRow>,
        expanded: BTreeSet<NodeId>,
    ) -> Result<RenderedTree> {
        let fetched = rows.len();
        for row in &rows {
            self.encoding.child_count(&row.node)?;
        }

        if !ForestSorter::is_sorted(&rows) {
            #[cfg(feature = "tracing")]
            tracing::debug!(pass, "batch not in (forest, left) order; re-sorting");
        }
        let mut batch = ForestSorter::sort(rows);
        if !self.config.policy.show_roots {
            batch = ForestSorter::prune_roots(batch);
        }

        let resolution = ParentResolver::new(self.config.depth_mode)
            .resolve_all(batch.iter().map(|r| &r.node))?;
        let with_children: HashSet<NodeId> = resolution.parents.iter().flatten().copied().collect();

        let policy = self.config.policy;
        let mut out = Vec::with_capacity(batch.len());
        for (row, parent) in batch.into_rows().into_iter().zip(resolution.parents) {
            let child_count = self.encoding.child_count(&row.node)?;
            out.push(RenderedRow {
                parent,
                child_count,
                display_depth: policy.display_depth(row.node.depth),
                has_children: child_count > 0,
                children_loaded: with_children.contains(&row.node.id),
                node: row.node,
                record: row.record,
            });
        }

        emit_pass(
            pass,
            &[
                ("fetched", fetched.to_string()),
                ("rendered", out.len().to_string()),
                ("expanded", expanded.len().to_string()),
                ("anomalies", resolution.anomalies.len().to_string()),
            ],
        );

        Ok(RenderedTree {
            rows: out,
            expanded,
            anomalies: resolution.anomalies,
        })
    }
}
