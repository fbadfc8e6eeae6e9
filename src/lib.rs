#![forbid(unsafe_code)]
//! nestree: rebuild hierarchy from nested-set records.
//!
//! Re-exports the workspace crates under one roof:
//! - [`nestree_core`]: ids, records, bounds codec, predicates, config, errors
//! - [`nestree_store`]: the `TreeStore` boundary and the in-memory store
//! - [`nestree_grid`]: sorting, parent resolution, lazy expansion, deep links

pub use nestree_core;
pub use nestree_grid;
pub use nestree_store;

pub use nestree_core::prelude::*;
pub use nestree_grid::{
    ChildrenPlan, DeepLink, ForestSorter, LazyExpansionPlanner, ParentResolver,
    PathReconstructor, RenderedRow, RenderedTree, ResolveAnomaly, SortedBatch, TreeGrid,
};
pub use nestree_store::{MemoryStore, MeteredStore, TreeStore};
