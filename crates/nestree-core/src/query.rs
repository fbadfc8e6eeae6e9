//! Fetch requests: predicate + sort keys + projection.

use serde::{Deserialize, Serialize};

use crate::predicate::Predicate;
use crate::schema::TreeColumns;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub predicate: Predicate,
    pub order_by: Vec<SortKey>,
    /// Columns to return; `None` returns whole records.
    pub select: Option<Vec<String>>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            order_by: Vec::new(),
            select: None,
            limit: None,
        }
    }

    /// Query ordered the way a rendering pass needs it: forest, then left.
    pub fn in_tree_order(predicate: Predicate, columns: &TreeColumns) -> Self {
        Self::new(predicate).order_by(tree_order(columns))
    }

    pub fn order_by(mut self, keys: Vec<SortKey>) -> Self {
        self.order_by = keys;
        self
    }

    pub fn select(mut self, columns: Vec<String>) -> Self {
        self.select = Some(columns);
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

/// Sort keys for display order: forest id (if used), then left bound.
pub fn tree_order(columns: &TreeColumns) -> Vec<SortKey> {
    let mut keys = Vec::with_capacity(2);
    if let Some(forest) = &columns.forest {
        keys.push(SortKey::asc(forest.clone()));
    }
    keys.push(SortKey::asc(columns.left.clone()));
    keys
}
