use thiserror::Error;

use crate::id::NodeId;
use crate::schema::DataType;

/// Canonical result for nestree.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Bounds or depths that cannot come from a well-formed nested set.
    /// Fatal to the current pass only.
    #[error("corrupt nested-set encoding at {}: {reason}", describe_node(.node))]
    DataIntegrity {
        node: Option<NodeId>,
        reason: String,
    },

    #[error("record has no '{column}' column")]
    MissingField { column: String },

    #[error("column '{column}' holds {found:?}, expected {expected:?}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: DataType,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    // The core crate does not talk to storage, but store implementations map
    // their failures into this variant.
    #[error("store error: {0}")]
    Store(String),
}

impl Error {
    pub fn integrity(node: NodeId, reason: impl Into<String>) -> Self {
        Error::DataIntegrity {
            node: Some(node),
            reason: reason.into(),
        }
    }
}

fn describe_node(node: &Option<NodeId>) -> String {
    node.map(|n| n.to_string())
        .unwrap_or_else(|| "<unknown node>".to_string())
}
