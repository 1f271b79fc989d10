//! Query-related methods for table operations.

use std::collections::HashSet;

use super::record::Record;
use super::Table;
use crate::error::DbError;
use crate::types::Value;

/// Conjunction of column equality terms resolved against one schema.
///
/// An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<(usize, Value)>,
}

impl Filter {
    /// Returns `true` if the record satisfies every term.
    pub fn matches(&self, record: &Record) -> bool {
        self.terms
            .iter()
            .all(|(index, expected)| record.value(*index) == Some(expected))
    }

    /// Number of equality terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Table {
    /// Resolves `(column, value)` equality terms into a filter.
    ///
    /// # Arguments
    /// * `terms` - Column name and expected value pairs, ANDed together
    ///
    /// # Returns
    /// `Result<Filter, DbError>`; fails if a column is unknown or a value
    /// cannot be stored in its column.
    pub fn compile_filter<'a, I>(&self, terms: I) -> Result<Filter, DbError>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut resolved = Vec::new();
        for (column_name, value) in terms {
            let index = self.column_index(column_name)?;
            let column = &self.columns[index];
            if !value.is_null() && !column.column_type.accepts(value) {
                return Err(DbError::TypeMismatch {
                    expected: format!("{} for column '{}'", column.column_type, column.name),
                    got: value.type_name().to_string(),
                });
            }
            resolved.push((index, value.clone()));
        }
        Ok(Filter { terms: resolved })
    }

    /// Returns clones of the records matching the filter.
    ///
    /// # Performance
    /// - O(n) where n is number of records
    pub fn query_records(&self, filter: &Filter) -> Vec<Record> {
        self.snapshot()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    /// Counts the records matching the filter.
    pub fn count_records(&self, filter: &Filter) -> usize {
        self.snapshot().iter().filter(|r| filter.matches(r)).count()
    }

    /// Deletes the records matching the filter.
    ///
    /// # Returns
    /// Number of records removed.
    ///
    /// # Performance
    /// - O(n) operation where n is number of records
    /// - One record list clone allocation, only when something is removed
    ///
    /// Callers hold the database write lock.
    pub(crate) fn delete_records(&self, filter: &Filter) -> usize {
        let current = self.snapshot();
        let removed = current.iter().filter(|r| filter.matches(r)).count();

        // Only swap if records were actually removed
        if removed > 0 {
            let kept = current
                .iter()
                .filter(|r| !filter.matches(r))
                .cloned()
                .collect();
            self.store_rows(kept);
        }

        removed
    }

    /// Returns each distinct value of a column once, in first-seen order.
    pub fn distinct_values(&self, column_name: &str) -> Result<Vec<Value>, DbError> {
        let index = self.column_index(column_name)?;
        let snapshot = self.snapshot();

        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        for value in snapshot.iter().filter_map(|r| r.value(index)) {
            if seen.insert(value) {
                distinct.push(value.clone());
            }
        }
        Ok(distinct)
    }
}
