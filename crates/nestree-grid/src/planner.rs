//! Lazy expansion: which query fetches exactly one level below a node.
//!
//! "No node" means the top level. With roots shown that is the roots
//! themselves (`left = 1`); with roots hidden the stored roots still have to
//! be looked up, because their bounds define the range of the visible top
//! level.

use nestree_core::bounds::TreeEncoding;
use nestree_core::config::TreeConfig;
use nestree_core::id::{ForestId, NodeId};
use nestree_core::node::{NodeRecord, TreeRow};
use nestree_core::predicate::Predicate;
use nestree_core::query::Query;
use nestree_core::Result;
use nestree_store::TreeStore;

#[derive(Debug, Clone, PartialEq)]
pub enum ChildrenPlan {
    Fetch(Predicate),
    /// The anchor node does not exist (any more); there is nothing to show.
    Empty,
}

impl ChildrenPlan {
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            ChildrenPlan::Fetch(p) => Some(p),
            ChildrenPlan::Empty => None,
        }
    }
}

pub struct LazyExpansionPlanner<'a> {
    config: &'a TreeConfig,
    encoding: &'a dyn TreeEncoding,
}

impl<'a> LazyExpansionPlanner<'a> {
    pub fn new(config: &'a TreeConfig, encoding: &'a dyn TreeEncoding) -> Self {
        Self { config, encoding }
    }

    pub fn children_plan<S: TreeStore + ?Sized>(
        &self,
        store: &S,
        node: Option<NodeId>,
        forest_context: Option<ForestId>,
    ) -> Result<ChildrenPlan> {
        let columns = &self.config.columns;
        match node {
            None if self.config.policy.show_roots => Ok(ChildrenPlan::Fetch(
                self.encoding.roots_predicate(forest_context, columns),
            )),
            None => {
                let roots = lookup_nodes(
                    store,
                    self.encoding.roots_predicate(forest_context, columns),
                    self.config,
                )?;
                if roots.is_empty() {
                    return Ok(ChildrenPlan::Empty);
                }
                Ok(ChildrenPlan::Fetch(Predicate::any(
                    roots
                        .iter()
                        .map(|r| self.encoding.children_predicate(r, columns)),
                )))
            }
            Some(id) => match lookup_node(store, id, self.config)? {
                Some(parent) => Ok(ChildrenPlan::Fetch(
                    self.encoding.children_predicate(&parent, columns),
                )),
                None => Ok(ChildrenPlan::Empty),
            },
        }
    }

    /// Plan and run the children query, in display order.
    pub fn fetch_children<S: TreeStore + ?Sized>(
        &self,
        store: &S,
        node: Option<NodeId>,
        forest_context: Option<ForestId>,
    ) -> Result<Vec<TreeRow>> {
        match self.children_plan(store, node, forest_context)? {
            ChildrenPlan::Fetch(predicate) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(%predicate, "fetching children");
                fetch_rows(store, Query::in_tree_order(predicate, &self.config.columns), self.config)
            }
            ChildrenPlan::Empty => Ok(Vec::new()),
        }
    }
}

/// Hierarchy fields of one node, projected to the hierarchy columns.
pub fn lookup_node<S: TreeStore + ?Sized>(
    store: &S,
    id: NodeId,
    config: &TreeConfig,
) -> Result<Option<NodeRecord>> {
    let columns = &config.columns;
    let query = Query::new(Predicate::eq(columns.id.as_str(), id)).select(columns.hierarchy());
    store
        .fetch_one(&query)?
        .map(|rec| NodeRecord::from_record(&rec, columns))
        .transpose()
}

pub(crate) fn lookup_nodes<S: TreeStore + ?Sized>(
    store: &S,
    predicate: Predicate,
    config: &TreeConfig,
) -> Result<Vec<NodeRecord>> {
    let columns = &config.columns;
    let query = Query::in_tree_order(predicate, columns).select(columns.hierarchy());
    store
        .fetch(&query)?
        .iter()
        .map(|rec| NodeRecord::from_record(rec, columns))
        .collect()
}

pub(crate) fn fetch_rows<S: TreeStore + ?Sized>(
    store: &S,
    query: Query,
    config: &TreeConfig,
) -> Result<Vec<TreeRow>> {
    store
        .fetch(&query)?
        .into_iter()
        .map(|rec| TreeRow::from_record(rec, &config.columns))
        .collect()
}
