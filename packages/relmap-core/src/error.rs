//! Storage and mapping error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone)]
pub enum DbError {
    /// Table not found
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    /// Table already exists
    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),

    /// Column not found in table
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Column already exists in table
    #[error("Column '{column}' already exists in table '{table}'")]
    ColumnAlreadyExists { table: String, column: String },

    /// More than one primary key column declared
    #[error("Table '{table}' declares more than one primary key")]
    MultiplePrimaryKeys { table: String },

    /// Type mismatch error
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    /// NULL written to a NOT NULL column
    #[error("Column '{column}' in table '{table}' does not accept NULL")]
    NullViolation { table: String, column: String },

    /// Duplicate primary key value
    #[error("Duplicate value {value} for primary key '{column}' in table '{table}'")]
    UniqueViolation {
        table: String,
        column: String,
        value: String,
    },

    /// Row id sequence has no ids left
    #[error("Table '{table}' has no row ids left")]
    RowIdExhausted { table: String },

    /// Where clause placeholders and bound arguments disagree
    #[error("Where clause has {placeholders} placeholders but {args} arguments were bound")]
    BindingMismatch { placeholders: usize, args: usize },

    /// Row limit exceeded for a table
    #[error("Row limit exceeded for table '{table}': limit {limit}")]
    MemoryLimitExceeded { table: String, limit: usize },

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error during persistence
    #[error("I/O error: {0}")]
    IoError(String),

    /// Data corruption detected
    #[error("Data corruption detected: {0}")]
    DataCorruption(String),
}

/// Mapping DAO errors.
#[derive(Error, Debug, Clone)]
pub enum MappingError {
    /// Descriptor disagrees with the stored table schema
    #[error("Mapping table '{table}' column '{column}': {reason}")]
    SchemaMismatch {
        table: String,
        column: String,
        reason: String,
    },

    /// Caller supplied arguments of the wrong shape
    #[error("Invalid argument shape: {0}")]
    ArgumentShape(String),

    /// Error raised by the storage layer
    #[error(transparent)]
    Storage(#[from] DbError),
}
