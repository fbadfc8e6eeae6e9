//! Lightweight value/record placeholders so core stays free of any database
//! driver types.
//!
//! Store crates convert their native rows to/from [`Record`] as needed.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::DataType;

/// A single loosely-typed value as returned by a store.
///
/// Untagged so that fixtures are plain JSON objects: `{"id": 1, "lft": 1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl Scalar {
    pub fn data_type(&self) -> DataType {
        match self {
            Scalar::Null => DataType::Null,
            Scalar::Bool(_) => DataType::Boolean,
            Scalar::I64(_) => DataType::Int64,
            Scalar::F64(_) => DataType::Float64,
            Scalar::Str(_) => DataType::Utf8,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Integer view, accepting integral floats and numeric strings the way
    /// loosely typed SQL drivers hand them back.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::I64(i) => Some(*i),
            Scalar::F64(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Scalar::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Typed comparison used by predicate evaluation.
    ///
    /// Returns `None` for nulls and for values that cannot be compared
    /// (e.g. a bool against a string); such comparisons are false.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        use Scalar::*;
        match (self, other) {
            (Null, _) | (_, Null) => None,
            (Bool(x), Bool(y)) => Some(x.cmp(y)),
            (I64(x), I64(y)) => Some(x.cmp(y)),
            (F64(x), F64(y)) => x.partial_cmp(y),
            (I64(x), F64(y)) => (*x as f64).partial_cmp(y),
            (F64(x), I64(y)) => x.partial_cmp(&(*y as f64)),
            (Str(x), Str(y)) => Some(x.cmp(y)),
            // Numeric strings compare against integers numerically.
            (Str(_), I64(y)) => self.as_i64().map(|x| x.cmp(y)),
            (I64(x), Str(_)) => other.as_i64().map(|y| x.cmp(&y)),
            _ => None,
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::I64(v)
    }
}

/// Saturates at `i64::MAX`; integer columns are signed.
impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Scalar::I64(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::I64(i64::from(v))
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// A flat row: column name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Scalar>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Scalar>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.fields.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Keep only the named columns (missing ones are skipped).
    pub fn project(&self, columns: &[String]) -> Record {
        let fields = columns
            .iter()
            .filter_map(|c| self.fields.get(c).map(|v| (c.clone(), v.clone())))
            .collect();
        Record { fields }
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Total order over scalars for sorting.
///
/// Nulls are sorted first, then values are compared by type.
pub fn scalar_cmp(a: &Scalar, b: &Scalar) -> Ordering {
    use Scalar::*;

    match (a, b) {
        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Less,
        (_, Null) => Ordering::Greater,
        (F64(x), F64(y)) => {
            if x.is_nan() && y.is_nan() {
                Ordering::Equal
            } else if x.is_nan() {
                Ordering::Greater
            } else if y.is_nan() {
                Ordering::Less
            } else {
                x.partial_cmp(y).unwrap_or(Ordering::Equal)
            }
        }
        _ => match a.compare(b) {
            Some(ord) => ord,
            // Mixed types: order by variant order
            None => scalar_type_order(a).cmp(&scalar_type_order(b)),
        },
    }
}

/// Assign a numeric order to scalar types for mixed-type comparisons.
fn scalar_type_order(s: &Scalar) -> u8 {
    use Scalar::*;
    match s {
        Null => 0,
        Bool(_) => 1,
        I64(_) | F64(_) => 2,
        Str(_) => 3,
    }
}
