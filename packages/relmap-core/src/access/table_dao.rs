//! Column-keyed data access for a single table.

use std::sync::Arc;

use crate::database::Database;
use crate::error::DbError;
use crate::table::{Column, Record};
use crate::types::Value;

use super::{ColumnValues, ResultSet, Row, WhereClause};

/// Generic data access object bound to one table of a [`Database`].
///
/// The column list is captured at construction; tables have a fixed schema
/// for their lifetime.
#[derive(Debug, Clone)]
pub struct TableDao {
    db: Arc<Database>,
    table_name: String,
    columns: Arc<Vec<Column>>,
}

impl TableDao {
    /// Binds to an existing table.
    ///
    /// # Returns
    /// `Result<TableDao, DbError>`; fails with `TableNotFound` if absent.
    pub fn new(db: Arc<Database>, table_name: impl Into<String>) -> Result<Self, DbError> {
        let table_name = table_name.into();
        let columns = db.read_table(&table_name, |t| Ok(t.columns.clone()))?;
        Ok(Self {
            db,
            table_name,
            columns: Arc::new(columns),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Shared storage handle.
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Empty row bound to this table's schema.
    pub fn new_row(&self) -> Row {
        Row::empty(self.table_name.clone(), self.columns.clone())
    }

    /// Materializes a stored record as a row.
    pub fn get_row(&self, record: &Record) -> Row {
        Row::from_record(self.table_name.clone(), self.columns.clone(), record)
    }

    /// Inserts a row and records the assigned id on it.
    ///
    /// # Returns
    /// `Result<u64, DbError>` containing the assigned row id.
    pub fn create(&self, row: &mut Row) -> Result<u64, DbError> {
        let values = row.values().to_vec();
        let id = self
            .db
            .write_table(&self.table_name, |t| t.insert_record(values))?;
        row.set_id(id);
        Ok(id)
    }

    /// All records of the table.
    pub fn query_for_all(&self) -> Result<ResultSet, DbError> {
        self.query_for_field_values(&ColumnValues::new())
    }

    /// Records whose `column` equals `value`.
    pub fn query_for_all_eq(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<ResultSet, DbError> {
        let value = value.into();
        self.db.read_table(&self.table_name, |t| {
            let filter = t.compile_filter([(column, &value)])?;
            Ok(ResultSet::new(t.snapshot(), filter))
        })
    }

    /// Records matching every column/value pair.
    pub fn query_for_field_values(&self, values: &ColumnValues) -> Result<ResultSet, DbError> {
        self.db.read_table(&self.table_name, |t| {
            let filter = t.compile_filter(values.iter())?;
            Ok(ResultSet::new(t.snapshot(), filter))
        })
    }

    /// Number of records matching every column/value pair.
    pub fn count(&self, values: &ColumnValues) -> Result<usize, DbError> {
        self.db.read_table(&self.table_name, |t| {
            let filter = t.compile_filter(values.iter())?;
            Ok(t.count_records(&filter))
        })
    }

    /// Total number of records.
    pub fn count_all(&self) -> Result<usize, DbError> {
        self.db.read_table(&self.table_name, |t| Ok(t.record_count()))
    }

    /// Single equality clause for `column`.
    pub fn build_where_with_field_and_value(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> WhereClause {
        WhereClause::eq(column, value)
    }

    /// Positional arguments for a where clause.
    pub fn build_where_args<I>(&self, values: I) -> Vec<Value>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        values.into_iter().map(Into::into).collect()
    }

    /// Deletes records matching `clause`, binding `args` to its placeholders
    /// by position.
    ///
    /// # Returns
    /// `Result<usize, DbError>` containing the number of records deleted.
    /// Fails with `BindingMismatch` if the argument count differs from the
    /// placeholder count.
    pub fn delete_where(&self, clause: &WhereClause, args: &[Value]) -> Result<usize, DbError> {
        if clause.placeholder_count() != args.len() {
            return Err(DbError::BindingMismatch {
                placeholders: clause.placeholder_count(),
                args: args.len(),
            });
        }

        let deleted = self.db.write_table(&self.table_name, |t| {
            let filter = t.compile_filter(clause.columns().zip(args))?;
            Ok(t.delete_records(&filter))
        })?;
        tracing::debug!(
            "Deleted {} rows from {} where {}",
            deleted,
            self.table_name,
            clause
        );
        Ok(deleted)
    }

    /// Distinct values of one column (read-only projection).
    pub fn query_distinct(&self, column: &str) -> Result<Vec<Value>, DbError> {
        self.db
            .read_table(&self.table_name, |t| t.distinct_values(column))
    }
}
