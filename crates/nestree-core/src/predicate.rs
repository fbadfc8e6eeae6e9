//! Filter predicates handed to a store.
//!
//! Only what nested-set range queries need: column/literal comparisons
//! combined with AND/OR. Predicates can be evaluated in memory
//! ([`Predicate::matches`]) and rendered as SQL-like text for logs.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Record, Scalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    fn holds(self, ord: Ordering) -> bool {
        match self {
            CmpOp::Eq => ord == Ordering::Equal,
            CmpOp::Ne => ord != Ordering::Equal,
            CmpOp::Lt => ord == Ordering::Less,
            CmpOp::Le => ord != Ordering::Greater,
            CmpOp::Gt => ord == Ordering::Greater,
            CmpOp::Ge => ord != Ordering::Less,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Matches every record.
    True,
    Cmp {
        column: String,
        op: CmpOp,
        value: Scalar,
    },
    /// Conjunction; empty is `True`.
    And(Vec<Predicate>),
    /// Disjunction; empty matches nothing.
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn cmp(column: impl Into<String>, op: CmpOp, value: impl Into<Scalar>) -> Self {
        Predicate::Cmp {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::cmp(column, CmpOp::Eq, value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::cmp(column, CmpOp::Ne, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::cmp(column, CmpOp::Lt, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::cmp(column, CmpOp::Gt, value)
    }

    /// AND two predicates, flattening nested conjunctions and dropping `True`.
    pub fn and(self, other: Predicate) -> Predicate {
        let mut parts = Vec::new();
        for p in [self, other] {
            match p {
                Predicate::True => {}
                Predicate::And(inner) => parts.extend(inner),
                p => parts.push(p),
            }
        }
        match parts.len() {
            0 => Predicate::True,
            1 => parts.pop().unwrap_or(Predicate::True),
            _ => Predicate::And(parts),
        }
    }

    /// AND an optional predicate.
    pub fn and_maybe(self, other: Option<Predicate>) -> Predicate {
        match other {
            Some(p) => self.and(p),
            None => self,
        }
    }

    pub fn all(preds: impl IntoIterator<Item = Predicate>) -> Predicate {
        preds.into_iter().fold(Predicate::True, Predicate::and)
    }

    /// OR of the given predicates; a single predicate is returned unchanged.
    pub fn any(preds: impl IntoIterator<Item = Predicate>) -> Predicate {
        let mut parts: Vec<Predicate> = preds.into_iter().collect();
        if parts.len() == 1 {
            return parts.pop().unwrap_or(Predicate::Or(Vec::new()));
        }
        Predicate::Or(parts)
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Cmp { column, op, value } => match record.get(column) {
                // Missing and null columns never satisfy a comparison.
                Some(v) => v.compare(value).map(|ord| op.holds(ord)).unwrap_or(false),
                None => false,
            },
            Predicate::And(parts) => parts.iter().all(|p| p.matches(record)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches(record)),
        }
    }

    /// Columns referenced by this predicate, in first-use order.
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::True => {}
            Predicate::Cmp { column, .. } => {
                if !out.contains(&column.as_str()) {
                    out.push(column.as_str());
                }
            }
            Predicate::And(parts) | Predicate::Or(parts) => {
                for p in parts {
                    p.collect_columns(out);
                }
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::True => write!(f, "TRUE"),
            Predicate::Cmp { column, op, value } => {
                write!(f, "{} {} ", column, op.symbol())?;
                match value {
                    Scalar::Null => write!(f, "NULL"),
                    Scalar::Bool(b) => write!(f, "{}", b),
                    Scalar::I64(i) => write!(f, "{}", i),
                    Scalar::F64(x) => write!(f, "{}", x),
                    Scalar::Str(s) => write!(f, "'{}'", s.replace('\'', "''")),
                }
            }
            Predicate::And(parts) | Predicate::Or(parts) if parts.is_empty() => {
                if matches!(self, Predicate::And(_)) {
                    write!(f, "TRUE")
                } else {
                    write!(f, "FALSE")
                }
            }
            Predicate::And(parts) => join(f, parts, " AND "),
            Predicate::Or(parts) => join(f, parts, " OR "),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, parts: &[Predicate], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, p) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", p)?;
    }
    write!(f, ")")
}
