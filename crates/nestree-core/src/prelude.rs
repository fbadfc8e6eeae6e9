//! Convenient re-exports for downstream crates.

pub use crate::bounds::{NestedSet, TreeEncoding};
pub use crate::config::{DepthMode, DisplayPolicy, TreeConfig};
pub use crate::error::{Error, Result};
pub use crate::id::{ForestId, NodeId};
pub use crate::node::{NodeRecord, TreeRow};
pub use crate::predicate::{CmpOp, Predicate};
pub use crate::query::{Query, SortKey};
pub use crate::schema::{DataType, TreeColumns};
pub use crate::types::{Record, Scalar};
