//! Database container managing named tables.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::StoreConfig;
use crate::error::DbError;
use crate::table::{Column, Table};

/// Database container holding all tables.
///
/// This is the shared storage handle: reads run under the map's read lock
/// and see lock-free table snapshots, writes run under the write lock.
#[derive(Debug)]
pub struct Database {
    /// Map of table name to table instance
    tables: RwLock<HashMap<String, Table>>,
    /// Store configuration
    config: StoreConfig,
}

impl Database {
    /// Creates a new empty database with default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a new empty database with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Creates a new table with the given name and column definitions.
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `columns` - Column definitions
    ///
    /// # Returns
    /// `Result<(), DbError>` indicating success or failure.
    pub fn create_table(&self, name: &str, columns: Vec<Column>) -> Result<(), DbError> {
        let mut tables = self.tables.write().map_err(|_| DbError::LockPoisoned)?;
        if tables.contains_key(name) {
            return Err(DbError::TableAlreadyExists(name.to_string()));
        }
        let table = Table::create(
            name.to_string(),
            columns,
            Some(self.config.initial_table_capacity),
            self.config.max_rows_per_table,
        )?;
        tables.insert(name.to_string(), table);
        tracing::info!("Created table {}", name);
        Ok(())
    }

    /// Adds an already built table, replacing nothing.
    pub(crate) fn insert_table(&self, table: Table) -> Result<(), DbError> {
        let mut tables = self.tables.write().map_err(|_| DbError::LockPoisoned)?;
        if tables.contains_key(&table.name) {
            return Err(DbError::TableAlreadyExists(table.name));
        }
        tables.insert(table.name.clone(), table);
        Ok(())
    }

    /// Deletes a table by name.
    pub fn delete_table(&self, name: &str) -> Result<(), DbError> {
        let mut tables = self.tables.write().map_err(|_| DbError::LockPoisoned)?;
        tables.remove(name).ok_or_else(|| DbError::TableNotFound {
            table: name.to_string(),
        })?;
        Ok(())
    }

    /// Runs a read-only closure against a table.
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `f` - Closure receiving the table
    ///
    /// # Returns
    /// `Result<R, DbError>` containing the closure's result.
    pub fn read_table<F, R>(&self, name: &str, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&Table) -> Result<R, DbError>,
    {
        let tables = self.tables.read().map_err(|_| DbError::LockPoisoned)?;
        let table = tables.get(name).ok_or_else(|| DbError::TableNotFound {
            table: name.to_string(),
        })?;
        f(table)
    }

    /// Runs a mutating closure against a table while holding the write lock.
    pub fn write_table<F, R>(&self, name: &str, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&Table) -> Result<R, DbError>,
    {
        let tables = self.tables.write().map_err(|_| DbError::LockPoisoned)?;
        let table = tables.get(name).ok_or_else(|| DbError::TableNotFound {
            table: name.to_string(),
        })?;
        f(table)
    }

    /// Executes a closure with every table, in name order.
    pub fn with_tables<F, R>(&self, f: F) -> Result<R, DbError>
    where
        F: FnOnce(&[&Table]) -> R,
    {
        let tables = self.tables.read().map_err(|_| DbError::LockPoisoned)?;
        let mut sorted: Vec<&Table> = tables.values().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(f(&sorted))
    }

    /// Returns `true` if a table with this name exists.
    pub fn has_table(&self, name: &str) -> Result<bool, DbError> {
        let tables = self.tables.read().map_err(|_| DbError::LockPoisoned)?;
        Ok(tables.contains_key(name))
    }

    /// Returns all table names, sorted.
    pub fn table_names(&self) -> Result<Vec<String>, DbError> {
        self.with_tables(|tables| tables.iter().map(|t| t.name.clone()).collect())
    }

    /// Returns the number of tables in the database.
    pub fn table_count(&self) -> Result<usize, DbError> {
        let tables = self.tables.read().map_err(|_| DbError::LockPoisoned)?;
        Ok(tables.len())
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
