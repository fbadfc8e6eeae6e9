#![forbid(unsafe_code)]
//! nestree-core: the pure half of nested-set tree reconstruction.
//!
//! Responsibilities:
//! - Strongly-typed ids, loosely-typed records and the column mapping that
//!   turns a record into a typed [`node::NodeRecord`].
//! - The bounds codec (child counts, containment checks, sibling keys) and the
//!   [`bounds::TreeEncoding`] capability trait.
//! - Predicate/query values handed to an external store.
//! - Configuration and the canonical error type.
//!
//! **No I/O, no logging, no state** here. The store and grid crates drive it.

pub mod bounds;
pub mod config;
pub mod error;
pub mod id;
pub mod node;
pub mod predicate;
pub mod prelude;
pub mod query;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
