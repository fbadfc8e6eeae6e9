//! Column mapping for nested-set tables. Pure data.
//!
//! A store hands back loosely-typed [`Record`](crate::types::Record)s; the
//! [`TreeColumns`] mapping says which columns carry the hierarchy.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Null,
    Boolean,
    Int64,
    Float64,
    Utf8,
}

/// Names of the columns that encode the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeColumns {
    pub id: String,
    pub left: String,
    pub right: String,
    pub depth: String,
    /// Forest id column. `None` declares a single-tree table.
    pub forest: Option<String>,
}

impl Default for TreeColumns {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            left: "lft".to_string(),
            right: "rgt".to_string(),
            depth: "depth".to_string(),
            forest: Some("tree".to_string()),
        }
    }
}

impl TreeColumns {
    /// Mapping for a table that stores a single tree.
    pub fn single_tree() -> Self {
        Self {
            forest: None,
            ..Self::default()
        }
    }

    pub fn with_forest(mut self, column: impl Into<String>) -> Self {
        self.forest = Some(column.into());
        self
    }

    pub fn uses_forests(&self) -> bool {
        self.forest.is_some()
    }

    /// Columns a store must return for the core to rebuild hierarchy.
    pub fn hierarchy(&self) -> Vec<String> {
        let mut cols = vec![
            self.id.clone(),
            self.left.clone(),
            self.right.clone(),
            self.depth.clone(),
        ];
        if let Some(forest) = &self.forest {
            cols.push(forest.clone());
        }
        cols
    }

    pub fn validate(&self) -> Result<()> {
        let cols = self.hierarchy();
        if let Some(empty) = cols.iter().find(|c| c.trim().is_empty()) {
            return Err(Error::Config(format!("empty column name in {:?}", empty)));
        }
        for (i, a) in cols.iter().enumerate() {
            if cols[i + 1..].contains(a) {
                return Err(Error::Config(format!(
                    "column '{}' is mapped to more than one tree attribute",
                    a
                )));
            }
        }
        Ok(())
    }
}
