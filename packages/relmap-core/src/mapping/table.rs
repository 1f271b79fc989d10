//! Mapping table descriptor.

use std::collections::HashSet;

use crate::access::TableDao;
use crate::error::MappingError;
use crate::table::Column;
use crate::types::ColumnType;

/// Default base id column name.
pub const COLUMN_BASE_ID: &str = "base_id";
/// Default related id column name.
pub const COLUMN_RELATED_ID: &str = "related_id";

/// Immutable schema of a mapping table.
///
/// Invariant: the base id and related id columns are present in `columns`
/// and are `INTEGER` typed. Checked by every constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTable {
    table_name: String,
    columns: Vec<Column>,
    base_id_column: String,
    related_id_column: String,
    base_id_index: usize,
    related_id_index: usize,
}

impl MappingTable {
    /// Builds the standard mapping schema: `base_id` and `related_id`
    /// (both `INTEGER NOT NULL`) followed by `additional_columns`.
    pub fn create(
        table_name: impl Into<String>,
        additional_columns: Vec<Column>,
    ) -> Result<Self, MappingError> {
        let mut columns = Self::required_columns();
        columns.extend(additional_columns);
        Self::new(table_name, columns)
    }

    /// The columns every standard mapping table starts with.
    pub fn required_columns() -> Vec<Column> {
        vec![
            Column::new(COLUMN_BASE_ID, ColumnType::Integer).not_null(),
            Column::new(COLUMN_RELATED_ID, ColumnType::Integer).not_null(),
        ]
    }

    /// Descriptor over `columns` using the default id column names.
    pub fn new(table_name: impl Into<String>, columns: Vec<Column>) -> Result<Self, MappingError> {
        Self::with_columns(table_name, columns, COLUMN_BASE_ID, COLUMN_RELATED_ID)
    }

    /// Descriptor with explicitly named id columns.
    pub fn with_columns(
        table_name: impl Into<String>,
        columns: Vec<Column>,
        base_id_column: impl Into<String>,
        related_id_column: impl Into<String>,
    ) -> Result<Self, MappingError> {
        let table_name = table_name.into();
        let base_id_column = base_id_column.into();
        let related_id_column = related_id_column.into();

        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.name.as_str())) {
            return Err(MappingError::SchemaMismatch {
                table: table_name,
                column: dup.name.clone(),
                reason: "duplicate column".to_string(),
            });
        }
        if base_id_column == related_id_column {
            return Err(MappingError::SchemaMismatch {
                table: table_name,
                column: base_id_column,
                reason: "base and related id columns must differ".to_string(),
            });
        }

        let base_id_index = id_column_index(&table_name, &columns, &base_id_column)?;
        let related_id_index = id_column_index(&table_name, &columns, &related_id_column)?;

        Ok(Self {
            table_name,
            columns,
            base_id_column,
            related_id_column,
            base_id_index,
            related_id_index,
        })
    }

    /// Descriptor derived from an existing table's schema, with the default
    /// id column names.
    pub fn from_table_dao(dao: &TableDao) -> Result<Self, MappingError> {
        Self::new(dao.table_name(), dao.columns().to_vec())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn base_id_column(&self) -> &str {
        &self.base_id_column
    }

    pub fn related_id_column(&self) -> &str {
        &self.related_id_column
    }

    pub fn base_id_index(&self) -> usize {
        self.base_id_index
    }

    pub fn related_id_index(&self) -> usize {
        self.related_id_index
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column)
    }

    /// Checks every descriptor column exists in `stored` with the same type.
    pub(crate) fn validate_against(&self, stored: &[Column]) -> Result<(), MappingError> {
        for column in &self.columns {
            let found = stored.iter().find(|c| c.name == column.name).ok_or_else(|| {
                MappingError::SchemaMismatch {
                    table: self.table_name.clone(),
                    column: column.name.clone(),
                    reason: "column missing from stored table".to_string(),
                }
            })?;
            if found.column_type != column.column_type {
                return Err(MappingError::SchemaMismatch {
                    table: self.table_name.clone(),
                    column: column.name.clone(),
                    reason: format!(
                        "stored type {} differs from descriptor type {}",
                        found.column_type, column.column_type
                    ),
                });
            }
        }
        Ok(())
    }
}

fn id_column_index(table: &str, columns: &[Column], name: &str) -> Result<usize, MappingError> {
    let index = columns
        .iter()
        .position(|c| c.name == name)
        .ok_or_else(|| MappingError::SchemaMismatch {
            table: table.to_string(),
            column: name.to_string(),
            reason: "id column not in column list".to_string(),
        })?;
    if columns[index].column_type != ColumnType::Integer {
        return Err(MappingError::SchemaMismatch {
            table: table.to_string(),
            column: name.to_string(),
            reason: format!("id column must be INTEGER, found {}", columns[index].column_type),
        });
    }
    Ok(index)
}
