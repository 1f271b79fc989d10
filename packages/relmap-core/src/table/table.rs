//! Table schema and record storage.
//!
//! Each table has:
//! - Fixed schema with column definitions
//! - Copy-on-write record list published through `ArcSwap`
//! - Row id sequence generator

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::DbError;
use crate::types::Value;

use super::column::Column;
use super::record::Record;
use super::validation;

/// Table schema and record storage.
///
/// Readers take an `Arc` snapshot of the record list and never block.
/// Writers clone the current list, modify the clone, and swap it in
/// (last-writer-wins); `Database` serializes writers behind its write lock.
#[derive(Debug)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Column definitions in declaration order
    pub columns: Vec<Column>,
    /// Published record list
    rows: ArcSwap<Vec<Record>>,
    /// Next row id to assign (atomic counter)
    next_id: AtomicU64,
    /// Maximum number of records
    max_rows: usize,
}

impl Table {
    /// Creates a new table with the given name and column definitions.
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `columns` - Column definitions
    /// * `initial_capacity` - Initial record capacity (default: 1024)
    /// * `max_rows` - Maximum number of records the table may hold
    ///
    /// # Returns
    /// `Result<Table, DbError>` containing the created table or an error.
    pub fn create(
        name: String,
        columns: Vec<Column>,
        initial_capacity: Option<usize>,
        max_rows: usize,
    ) -> Result<Self, DbError> {
        validation::validate_columns(&name, &columns)?;

        let capacity = initial_capacity.unwrap_or(1024).min(max_rows);
        Ok(Self {
            name,
            columns,
            rows: ArcSwap::new(Arc::new(Vec::with_capacity(capacity))),
            next_id: AtomicU64::new(1), // Start IDs at 1
            max_rows,
        })
    }

    /// Rebuilds a table from persisted state.
    ///
    /// Every record is checked against the schema; a mismatch means the
    /// persisted data is corrupt.
    pub(crate) fn restore(
        name: String,
        columns: Vec<Column>,
        next_id: u64,
        records: Vec<Record>,
        max_rows: usize,
    ) -> Result<Self, DbError> {
        validation::validate_columns(&name, &columns)?;

        for record in &records {
            if record.values.len() != columns.len() {
                return Err(DbError::DataCorruption(format!(
                    "Record {} in table '{}' has {} values, schema has {} columns",
                    record.id,
                    name,
                    record.values.len(),
                    columns.len()
                )));
            }
            if let Some(column) = columns
                .iter()
                .zip(&record.values)
                .find_map(|(c, v)| (!c.accepts(v)).then_some(c))
            {
                return Err(DbError::DataCorruption(format!(
                    "Record {} in table '{}' holds an invalid value for column '{}'",
                    record.id, name, column.name
                )));
            }
        }

        let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Ok(Self {
            name,
            columns,
            rows: ArcSwap::new(Arc::new(records)),
            next_id: AtomicU64::new(next_id.max(max_id + 1)),
            max_rows,
        })
    }

    /// Returns the index of a column within the schema.
    pub fn column_index(&self, column_name: &str) -> Result<usize, DbError> {
        self.columns
            .iter()
            .position(|c| c.name == column_name)
            .ok_or_else(|| DbError::ColumnNotFound {
                table: self.name.clone(),
                column: column_name.to_string(),
            })
    }

    /// Returns the column definition for the given column name.
    pub fn get_column(&self, column_name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == column_name)
    }

    /// Returns the current next id value without incrementing.
    pub fn current_next_id(&self) -> u64 {
        self.next_id.load(Ordering::Acquire)
    }

    /// Returns the number of records currently stored.
    pub fn record_count(&self) -> usize {
        self.rows.load().len()
    }

    /// Returns an immutable snapshot of all records.
    ///
    /// The snapshot stays valid and unchanged after later writes.
    pub fn snapshot(&self) -> Arc<Vec<Record>> {
        self.rows.load_full()
    }

    /// Inserts a record from values given in schema order.
    ///
    /// NULL values take the column default; a NULL INTEGER primary key takes
    /// the assigned row id. An explicit INTEGER primary key becomes the row id.
    /// The sequence only advances once the record is stored.
    ///
    /// Callers hold the database write lock (see [`Database::write_table`]).
    ///
    /// # Returns
    /// `Result<u64, DbError>` containing the assigned row id or an error.
    ///
    /// [`Database::write_table`]: crate::database::Database::write_table
    pub(crate) fn insert_record(&self, values: Vec<Value>) -> Result<u64, DbError> {
        if self.record_count() >= self.max_rows {
            return Err(DbError::MemoryLimitExceeded {
                table: self.name.clone(),
                limit: self.max_rows,
            });
        }

        let rowid_index = self.columns.iter().position(Column::is_rowid_alias);
        let explicit_id = rowid_index
            .and_then(|i| values.get(i))
            .and_then(Value::as_integer);
        let row_id = match explicit_id {
            Some(v) if v < 0 => {
                return Err(DbError::TypeMismatch {
                    expected: "non-negative row id".to_string(),
                    got: v.to_string(),
                })
            }
            Some(v) => v,
            None => i64::try_from(self.current_next_id()).map_err(|_| {
                DbError::RowIdExhausted {
                    table: self.name.clone(),
                }
            })?,
        };
        let id = row_id as u64;

        let values = validation::prepare_values(&self.name, &self.columns, values, row_id)?;

        // Clone current records for modification
        let mut new_rows = Vec::clone(&self.rows.load());
        self.check_primary_key(&new_rows, id, &values)?;
        new_rows.push(Record::new(id, values));

        // Atomically swap (last-writer-wins semantics)
        self.rows.store(Arc::new(new_rows));
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);

        Ok(id)
    }

    /// Rejects a duplicate row id or primary key value.
    fn check_primary_key(&self, rows: &[Record], id: u64, values: &[Value]) -> Result<(), DbError> {
        let Some(pk_index) = self.columns.iter().position(|c| c.primary_key) else {
            return Ok(());
        };
        let pk_value = &values[pk_index];
        let duplicate = rows
            .iter()
            .any(|r| r.id == id || r.value(pk_index) == Some(pk_value));
        if duplicate {
            return Err(DbError::UniqueViolation {
                table: self.name.clone(),
                column: self.columns[pk_index].name.clone(),
                value: pk_value.to_string(),
            });
        }
        Ok(())
    }

    /// Replaces the published record list.
    pub(crate) fn store_rows(&self, rows: Vec<Record>) {
        self.rows.store(Arc::new(rows));
    }
}
