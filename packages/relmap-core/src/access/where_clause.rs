//! Equality predicate builder.

use std::fmt;

use crate::types::Value;

/// Conjunction of `column = ?` terms.
///
/// Each term carries its column and its bound value in one entry, so the
/// rendered clause text and the argument list come from the same ordered
/// list and always line up positionally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    terms: Vec<(String, Value)>,
}

impl WhereClause {
    /// Single equality term.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            terms: vec![(column.into(), value.into())],
        }
    }

    /// Appends an equality term.
    pub fn push_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.terms.push((column.into(), value.into()));
    }

    /// Appends all terms of `other`, preserving their order.
    pub fn and(mut self, other: WhereClause) -> Self {
        self.terms.extend(other.terms);
        self
    }

    /// Clause text with `?` placeholders, e.g. `"base_id" = ? AND "related_id" = ?`.
    pub fn sql(&self) -> String {
        self.terms
            .iter()
            .map(|(column, _)| format!("\"{}\" = ?", column.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Bound values in placeholder order.
    pub fn args(&self) -> Vec<Value> {
        self.terms.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Column names in placeholder order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(column, _)| column.as_str())
    }

    /// Number of `?` placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}
