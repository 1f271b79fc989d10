//! Lazy query results over a table snapshot.

use std::sync::Arc;

use crate::table::{Filter, Record};

/// Records of one table snapshot that satisfy a filter.
///
/// Matching happens during iteration. The snapshot is immutable, so the set
/// can be iterated any number of times with identical results, regardless of
/// writes made after the query.
#[derive(Debug, Clone)]
pub struct ResultSet {
    snapshot: Arc<Vec<Record>>,
    filter: Filter,
}

impl ResultSet {
    pub(crate) fn new(snapshot: Arc<Vec<Record>>, filter: Filter) -> Self {
        Self { snapshot, filter }
    }

    /// Iterates matching records from the start.
    pub fn iter(&self) -> ResultSetIter<'_> {
        ResultSetIter {
            records: self.snapshot.iter(),
            filter: &self.filter,
        }
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = ResultSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the records of a [`ResultSet`].
#[derive(Debug)]
pub struct ResultSetIter<'a> {
    records: std::slice::Iter<'a, Record>,
    filter: &'a Filter,
}

impl<'a> Iterator for ResultSetIter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.records.find(|r| filter.matches(r))
    }
}
