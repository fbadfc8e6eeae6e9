#![forbid(unsafe_code)]
//! nestree-store: the storage boundary.
//!
//! - `TreeStore`: the one call the core needs (`fetch(query)`).
//! - `MemoryStore`: reference implementation evaluating predicates in memory.
//! - `MeteredStore`: counts round trips, for callers that cap fetches.
//! - `jsonl`: newline-delimited JSON fixtures in and out.

pub mod error;
pub mod jsonl;
pub mod memory;
pub mod metered;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use metered::MeteredStore;
pub use store::TreeStore;
