//! Ordered column/value pairs used to build equality predicates.

use crate::types::Value;

/// Ordered collection of column name to value pairs.
///
/// Insertion order is preserved. Adding a column that is already present
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnValues {
    entries: Vec<(String, Value)>,
}

impl ColumnValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the value for a column.
    pub fn add_column(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Builder form of [`ColumnValues::add_column`].
    pub fn with_column(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_column(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Iterates pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
