//! In-memory store backend.
//!
//! Holds records in a shared vector and answers queries by scanning. Used by
//! tests and fixtures, and as the reference for what a database-backed store
//! must return.

use std::io::BufRead;
use std::path::Path;
use std::sync::{Arc, RwLock};

use nestree_core::query::{Query, SortKey};
use nestree_core::types::{scalar_cmp, Record, Scalar};
use nestree_core::Result;

use crate::error::StoreError;
use crate::jsonl;
use crate::store::TreeStore;

/// Thread-safe in-memory record store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            data: Arc::new(RwLock::new(records)),
        }
    }

    /// Load newline-delimited JSON objects, one record per line.
    pub fn from_json_lines<R: BufRead>(reader: R) -> Result<Self> {
        Ok(Self::from_records(jsonl::read_records(reader)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_records(jsonl::read_path(path)?))
    }

    pub fn insert(&self, record: Record) -> Result<()> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        data.push(record);
        Ok(())
    }

    pub fn extend(&self, records: impl IntoIterator<Item = Record>) -> Result<()> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        data.extend(records);
        Ok(())
    }

    /// Number of stored records. A poisoned lock is reported, not read as empty.
    pub fn len(&self) -> Result<usize> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(data.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn clear(&self) -> Result<()> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        data.clear();
        Ok(())
    }

    /// Snapshot of every stored record, in insertion order.
    pub fn records(&self) -> Result<Vec<Record>> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(data.clone())
    }
}

impl TreeStore for MemoryStore {
    fn fetch(&self, query: &Query) -> Result<Vec<Record>> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        let mut rows: Vec<&Record> = data
            .iter()
            .filter(|r| query.predicate.matches(r))
            .collect();
        sort_rows(&mut rows, &query.order_by);
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(predicate = %query.predicate, rows = rows.len(), "memory fetch");

        Ok(match &query.select {
            Some(cols) => rows.into_iter().map(|r| r.project(cols)).collect(),
            None => rows.into_iter().cloned().collect(),
        })
    }
}

static NULL: Scalar = Scalar::Null;

/// Stable sort by the given keys; missing columns sort as null (first).
fn sort_rows(rows: &mut [&Record], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        for key in keys {
            let x = a.get(&key.column).unwrap_or(&NULL);
            let y = b.get(&key.column).unwrap_or(&NULL);
            let ord = scalar_cmp(x, y);
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != std::cmp::Ordering::Equal {
                return ord;
            }
        }
        std::cmp::Ordering::Equal
    });
}
