//! Mapping row.

use std::sync::Arc;

use crate::access::Row;
use crate::error::MappingError;
use crate::types::{ColumnType, Value};

use super::MappingTable;

/// One base/related association, with a value per descriptor column.
///
/// Rows are transient: they come from a query or are built for an insert.
/// Nothing here enforces uniqueness of the (base, related) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRow {
    table: Arc<MappingTable>,
    id: Option<u64>,
    values: Vec<Value>,
}

impl MappingRow {
    /// Row with every value NULL.
    pub(crate) fn new(table: Arc<MappingTable>) -> Self {
        let values = vec![Value::Null; table.columns().len()];
        Self {
            table,
            id: None,
            values,
        }
    }

    /// Row built by pairing `column_types` and `values` positionally with
    /// the descriptor's columns.
    ///
    /// # Returns
    /// `Result<MappingRow, MappingError>`; fails with `ArgumentShape` when the
    /// two sequences differ in length, do not cover every descriptor column,
    /// declare a type other than the column's, or carry a value that does
    /// not fit its declared type.
    pub(crate) fn with_types(
        table: Arc<MappingTable>,
        column_types: &[ColumnType],
        values: Vec<Value>,
    ) -> Result<Self, MappingError> {
        if column_types.len() != values.len() {
            return Err(MappingError::ArgumentShape(format!(
                "{} column types but {} values",
                column_types.len(),
                values.len()
            )));
        }
        if values.len() != table.columns().len() {
            return Err(MappingError::ArgumentShape(format!(
                "mapping table '{}' has {} columns but {} values were given",
                table.table_name(),
                table.columns().len(),
                values.len()
            )));
        }

        for ((column, ty), value) in table.columns().iter().zip(column_types).zip(&values) {
            if column.column_type != *ty {
                return Err(MappingError::ArgumentShape(format!(
                    "column '{}' is {}, declared {}",
                    column.name, column.column_type, ty
                )));
            }
            if !value.is_null() && !ty.accepts(value) {
                return Err(MappingError::ArgumentShape(format!(
                    "value {} does not fit {} column '{}'",
                    value, ty, column.name
                )));
            }
        }

        Ok(Self {
            table,
            id: None,
            values,
        })
    }

    /// Re-keys a generic row by descriptor column name.
    ///
    /// Descriptor columns the row lacks read as NULL.
    pub(crate) fn from_row(table: Arc<MappingTable>, row: &Row) -> Self {
        let values = table
            .columns()
            .iter()
            .map(|c| row.value(&c.name).cloned().unwrap_or(Value::Null))
            .collect();
        Self {
            table,
            id: row.id(),
            values,
        }
    }

    /// Storage row id, once read from or written to storage.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Base id, `None` while unset.
    pub fn base_id(&self) -> Option<i64> {
        self.values[self.table.base_id_index()].as_integer()
    }

    pub fn set_base_id(&mut self, id: i64) {
        let index = self.table.base_id_index();
        self.values[index] = Value::Integer(id);
    }

    /// Related id, `None` while unset.
    pub fn related_id(&self) -> Option<i64> {
        self.values[self.table.related_id_index()].as_integer()
    }

    pub fn set_related_id(&mut self, id: i64) {
        let index = self.table.related_id_index();
        self.values[index] = Value::Integer(id);
    }

    pub fn value(&self, column: &str) -> Option<&Value> {
        self.table.column_index(column).map(|i| &self.values[i])
    }

    pub fn set_value(&mut self, column: &str, value: impl Into<Value>) -> Result<(), MappingError> {
        let value = value.into();
        let index = self.table.column_index(column).ok_or_else(|| {
            MappingError::ArgumentShape(format!(
                "mapping table '{}' has no column '{}'",
                self.table.table_name(),
                column
            ))
        })?;
        let definition = &self.table.columns()[index];
        if !value.is_null() && !definition.column_type.accepts(&value) {
            return Err(MappingError::ArgumentShape(format!(
                "value {} does not fit {} column '{}'",
                value, definition.column_type, column
            )));
        }
        self.values[index] = value;
        Ok(())
    }

    /// Values in descriptor column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}
