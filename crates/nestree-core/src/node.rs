//! Typed view of a nested-set record.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::id::{ForestId, NodeId};
use crate::schema::{DataType, TreeColumns};
use crate::types::{Record, Scalar};

/// The hierarchy-carrying fields of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub left: i64,
    pub right: i64,
    pub depth: u32,
    pub forest: Option<ForestId>,
}

impl NodeRecord {
    pub fn new(id: u64, left: i64, right: i64, depth: u32) -> Self {
        Self {
            id: NodeId::new(id),
            left,
            right,
            depth,
            forest: None,
        }
    }

    pub fn in_forest(mut self, forest: u64) -> Self {
        self.forest = Some(ForestId::new(forest));
        self
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Forest key used for ordering; single-tree records sort as forest 0.
    pub fn forest_key(&self) -> ForestId {
        self.forest.unwrap_or(ForestId::DEFAULT)
    }

    /// Extract the hierarchy fields from a loosely-typed record.
    ///
    /// A forest column that is configured but absent or null yields `None`.
    pub fn from_record(record: &Record, columns: &TreeColumns) -> Result<Self> {
        let id = NodeId::new(unsigned(record, &columns.id)?);
        let left = integer(record, &columns.left)?;
        let right = integer(record, &columns.right)?;
        let depth_raw = integer(record, &columns.depth)?;
        let depth = u32::try_from(depth_raw)
            .map_err(|_| Error::integrity(id, format!("depth {} out of range", depth_raw)))?;
        let forest = match &columns.forest {
            Some(col) => match record.get(col) {
                None | Some(Scalar::Null) => None,
                Some(_) => Some(ForestId::new(unsigned(record, col)?)),
            },
            None => None,
        };
        Ok(Self {
            id,
            left,
            right,
            depth,
            forest,
        })
    }

    /// Write the hierarchy fields back into a record.
    pub fn to_record(&self, columns: &TreeColumns) -> Record {
        let mut rec = Record::new()
            .with(columns.id.as_str(), self.id)
            .with(columns.left.as_str(), self.left)
            .with(columns.right.as_str(), self.right)
            .with(columns.depth.as_str(), self.depth);
        if let (Some(col), Some(forest)) = (&columns.forest, self.forest) {
            rec.set(col.as_str(), forest);
        }
        rec
    }
}

/// A record together with its typed hierarchy view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeRow {
    pub node: NodeRecord,
    pub record: Record,
}

impl TreeRow {
    pub fn from_record(record: Record, columns: &TreeColumns) -> Result<Self> {
        let node = NodeRecord::from_record(&record, columns)?;
        Ok(Self { node, record })
    }

    /// Row whose record only carries the hierarchy columns.
    pub fn bare(node: NodeRecord, columns: &TreeColumns) -> Self {
        Self {
            record: node.to_record(columns),
            node,
        }
    }

    pub fn id(&self) -> NodeId {
        self.node.id
    }
}

fn integer(record: &Record, column: &str) -> Result<i64> {
    let value = record.get(column).ok_or_else(|| Error::MissingField {
        column: column.to_string(),
    })?;
    value.as_i64().ok_or_else(|| Error::TypeMismatch {
        column: column.to_string(),
        expected: DataType::Int64,
        found: value.data_type(),
    })
}

fn unsigned(record: &Record, column: &str) -> Result<u64> {
    let v = integer(record, column)?;
    u64::try_from(v).map_err(|_| Error::TypeMismatch {
        column: column.to_string(),
        expected: DataType::Int64,
        found: DataType::Int64,
    })
}
