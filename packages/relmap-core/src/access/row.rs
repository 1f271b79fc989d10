//! Column-addressable row.

use std::sync::Arc;

use crate::error::DbError;
use crate::table::{Column, Record};
use crate::types::Value;

/// A row of a specific table, addressable by column name.
///
/// Rows read from storage carry their row id; new rows have none until
/// they are inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    table: String,
    columns: Arc<Vec<Column>>,
    id: Option<u64>,
    values: Vec<Value>,
}

impl Row {
    /// Row with every value NULL.
    pub(crate) fn empty(table: String, columns: Arc<Vec<Column>>) -> Self {
        let values = vec![Value::Null; columns.len()];
        Self {
            table,
            columns,
            id: None,
            values,
        }
    }

    pub(crate) fn from_record(table: String, columns: Arc<Vec<Column>>, record: &Record) -> Self {
        Self {
            table,
            columns,
            id: Some(record.id),
            values: record.values.clone(),
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Values in schema order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c.name == column)
            .map(|i| &self.values[i])
    }

    /// Sets a column value after checking it fits the column type.
    ///
    /// NULL is always accepted here; NOT NULL is enforced on insert, where
    /// defaults and row id assignment apply.
    pub fn set_value(&mut self, column: &str, value: impl Into<Value>) -> Result<(), DbError> {
        let value = value.into();
        let index = self
            .columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| DbError::ColumnNotFound {
                table: self.table.clone(),
                column: column.to_string(),
            })?;
        let definition = &self.columns[index];
        if !value.is_null() && !definition.column_type.accepts(&value) {
            return Err(DbError::TypeMismatch {
                expected: format!("{} for column '{}'", definition.column_type, definition.name),
                got: value.type_name().to_string(),
            });
        }
        self.values[index] = value;
        Ok(())
    }
}
