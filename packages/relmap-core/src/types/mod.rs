//! Column types and cell values.

mod value;

pub use value::Value;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
    Boolean,
}

impl ColumnType {
    /// Type identifier used in schemas and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
            ColumnType::Boolean => "BOOLEAN",
        }
    }

    /// Returns `true` if a non-null value has this storage class.
    ///
    /// `Null` is never accepted here; nullability is a column property.
    pub fn accepts(&self, value: &Value) -> bool {
        value.column_type() == Some(*self)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
