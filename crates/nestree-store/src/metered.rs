//! Round-trip counting wrapper.
//!
//! Keep this cheap. Callers use it to check that a deep link costs O(depth)
//! fetches, or wire the counters to their own metrics.

use std::sync::atomic::{AtomicUsize, Ordering};

use nestree_core::query::Query;
use nestree_core::types::Record;
use nestree_core::Result;

use crate::store::TreeStore;

pub struct MeteredStore<S> {
    inner: S,
    fetches: AtomicUsize,
    rows: AtomicUsize,
}

impl<S: TreeStore> MeteredStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
            rows: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch` calls forwarded so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Total records returned so far.
    pub fn rows(&self) -> usize {
        self.rows.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.fetches.store(0, Ordering::Relaxed);
        self.rows.store(0, Ordering::Relaxed);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: TreeStore> TreeStore for MeteredStore<S> {
    fn fetch(&self, query: &Query) -> Result<Vec<Record>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let out = self.inner.fetch(query)?;
        self.rows.fetch_add(out.len(), Ordering::Relaxed);
        #[cfg(feature = "tracing")]
        tracing::trace!(fetches = self.fetches(), rows = out.len(), "metered fetch");
        Ok(out)
    }
}
