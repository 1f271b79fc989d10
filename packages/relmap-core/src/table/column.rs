//! Column definition within a table.

use serde::{Deserialize, Serialize};

use crate::types::{ColumnType, Value};

/// Column definition within a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Storage class
    pub column_type: ColumnType,
    /// Rejects NULL on insert
    #[serde(default)]
    pub not_null: bool,
    /// Primary key flag; an INTEGER primary key is assigned from the row id
    #[serde(default)]
    pub primary_key: bool,
    /// Value substituted for NULL on insert
    #[serde(default)]
    pub default: Option<Value>,
}

impl Column {
    /// Creates a nullable column with no default.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            not_null: false,
            primary_key: false,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Marks the column as primary key. Implies NOT NULL.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Returns `true` if this column auto-assigns row ids.
    pub fn is_rowid_alias(&self) -> bool {
        self.primary_key && self.column_type == ColumnType::Integer
    }

    /// Returns `true` if `value` may be stored in this column.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() {
            !self.not_null
        } else {
            self.column_type.accepts(value)
        }
    }
}
