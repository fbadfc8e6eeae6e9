//! The store interface consumed by the planner, the path reconstructor and
//! the grid.

use std::sync::Arc;

use nestree_core::query::Query;
use nestree_core::types::Record;
use nestree_core::Result;

/// A queryable record source.
///
/// Implementations must honor the predicate, the sort keys (in order), the
/// projection and the limit. Fetches are opaque and potentially slow; callers
/// minimize their count.
pub trait TreeStore: Send + Sync {
    fn fetch(&self, query: &Query) -> Result<Vec<Record>>;

    /// First record matching the query, if any.
    fn fetch_one(&self, query: &Query) -> Result<Option<Record>> {
        let query = query.clone().limit(1);
        Ok(self.fetch(&query)?.into_iter().next())
    }
}

impl<S: TreeStore + ?Sized> TreeStore for &S {
    fn fetch(&self, query: &Query) -> Result<Vec<Record>> {
        (**self).fetch(query)
    }

    fn fetch_one(&self, query: &Query) -> Result<Option<Record>> {
        (**self).fetch_one(query)
    }
}

impl<S: TreeStore + ?Sized> TreeStore for Arc<S> {
    fn fetch(&self, query: &Query) -> Result<Vec<Record>> {
        (**self).fetch(query)
    }

    fn fetch_one(&self, query: &Query) -> Result<Option<Record>> {
        (**self).fetch_one(query)
    }
}

impl<S: TreeStore + ?Sized> TreeStore for Box<S> {
    fn fetch(&self, query: &Query) -> Result<Vec<Record>> {
        (**self).fetch(query)
    }

    fn fetch_one(&self, query: &Query) -> Result<Option<Record>> {
        (**self).fetch_one(query)
    }
}
