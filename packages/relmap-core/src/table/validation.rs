//! Validation methods for table schema and records.

use std::collections::HashSet;

use super::column::Column;
use crate::error::DbError;
use crate::types::Value;

/// Validates column names are unique and at most one primary key exists.
///
/// # Arguments
/// * `table` - Table name for error reporting
/// * `columns` - Column definitions to validate
///
/// # Returns
/// `Result<(), DbError>` indicating success or validation failure.
pub(crate) fn validate_columns(table: &str, columns: &[Column]) -> Result<(), DbError> {
    let mut seen_names = HashSet::new();
    for column in columns {
        if !seen_names.insert(column.name.as_str()) {
            return Err(DbError::ColumnAlreadyExists {
                table: table.to_string(),
                column: column.name.clone(),
            });
        }
        if let Some(default) = &column.default {
            if !column.accepts(default) {
                return Err(DbError::TypeMismatch {
                    expected: format!("{} default for column '{}'", column.column_type, column.name),
                    got: default.type_name().to_string(),
                });
            }
        }
    }

    if columns.iter().filter(|c| c.primary_key).count() > 1 {
        return Err(DbError::MultiplePrimaryKeys {
            table: table.to_string(),
        });
    }

    Ok(())
}

/// Applies defaults and row id assignment, then checks every value fits its column.
///
/// # Arguments
/// * `table` - Table name for error reporting
/// * `columns` - Column definitions in schema order
/// * `values` - Values in schema order
/// * `row_id` - Row id assigned to an INTEGER primary key left NULL
///
/// # Returns
/// `Result<Vec<Value>, DbError>` containing the values to store.
pub(crate) fn prepare_values(
    table: &str,
    columns: &[Column],
    values: Vec<Value>,
    row_id: i64,
) -> Result<Vec<Value>, DbError> {
    if values.len() != columns.len() {
        return Err(DbError::TypeMismatch {
            expected: format!("{} values", columns.len()),
            got: format!("{} values", values.len()),
        });
    }

    let mut prepared = Vec::with_capacity(values.len());
    for (column, value) in columns.iter().zip(values) {
        let value = match value {
            Value::Null if column.is_rowid_alias() => Value::Integer(row_id),
            Value::Null => column.default.clone().unwrap_or(Value::Null),
            other => other,
        };

        if value.is_null() && column.not_null {
            return Err(DbError::NullViolation {
                table: table.to_string(),
                column: column.name.clone(),
            });
        }
        if !column.accepts(&value) {
            return Err(DbError::TypeMismatch {
                expected: format!("{} for column '{}'", column.column_type, column.name),
                got: value.type_name().to_string(),
            });
        }
        prepared.push(value);
    }

    Ok(prepared)
}
