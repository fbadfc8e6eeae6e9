//! Strongly-typed identifiers for tree nodes and forests.
//!
//! Both live in integer columns of the backing table. The wrappers keep them
//! apart from bounds and depths, and from each other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Scalar;

/// Declares a column-backed identifier.
///
/// `$label` is the noun used when the id shows up in messages.
macro_rules! column_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", $label, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        /// Column value for predicates and written records.
        impl From<$name> for Scalar {
            fn from(id: $name) -> Self {
                Scalar::from(id.0)
            }
        }
    };
}

column_id!(
    /// Value of the id column; unique across the whole table.
    NodeId,
    "node"
);
column_id!(
    /// Value of the forest column; shared by every node of one tree.
    ForestId,
    "forest"
);

impl ForestId {
    /// Forest key used for single-tree tables, where records carry no forest id.
    pub const DEFAULT: ForestId = ForestId::new(0);
}
