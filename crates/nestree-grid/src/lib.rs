#![forbid(unsafe_code)]
//! nestree-grid: one rendering pass over a nested-set table.
//!
//! A pass is synchronous: fetch (through a `TreeStore`) → sort → prune
//! hidden roots → single-pass parent resolution → annotate. Every pass owns
//! a fresh `ParentResolver`; nothing is shared between passes, so a
//! `TreeGrid` can serve concurrent callers as long as its store can.

pub mod grid;
pub mod metrics;
pub mod path;
pub mod planner;
pub mod resolver;
pub mod sorter;

pub use grid::{RenderedRow, RenderedTree, TreeGrid};
pub use path::{DeepLink, PathReconstructor};
pub use planner::{ChildrenPlan, LazyExpansionPlanner};
pub use resolver::{ParentResolver, Resolution, ResolveAnomaly};
pub use sorter::{ForestSorter, SortedBatch};
