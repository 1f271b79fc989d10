//! Snapshot persistence: save and load the whole database as JSON.

mod schema;

pub use schema::{SnapshotFile, TableSnapshot, SNAPSHOT_VERSION};

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crc32fast::Hasher;

use crate::config::StoreConfig;
use crate::database::Database;
use crate::error::DbError;
use crate::table::{Record, Table};

/// Saves and loads database snapshots under a data directory.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    /// Store configuration (data directory, snapshot file, limits)
    config: StoreConfig,
}

impl SnapshotManager {
    /// Creates a new snapshot manager with the given configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.config.snapshot_path()
    }

    /// Saves every table to the snapshot file.
    ///
    /// Writes a temporary file, syncs it, then renames it over the snapshot.
    ///
    /// # Returns
    /// `Result<(), DbError>` indicating success or failure.
    pub fn save(&self, db: &Database) -> Result<(), DbError> {
        let snapshot = build_snapshot(db)?;
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| DbError::SerializationError(e.to_string()))?;

        fs::create_dir_all(&self.config.data_dir)
            .map_err(|e| classify_io_error(e, "Failed to create data directory"))?;

        let final_path = self.snapshot_path();
        let temp_path = final_path.with_extension("json.tmp");

        let mut file = File::create(&temp_path)
            .map_err(|e| classify_io_error(e, "Failed to create temp file"))?;
        file.write_all(json.as_bytes())
            .map_err(|e| classify_io_error(e, "Failed to write snapshot"))?;
        file.sync_all()
            .map_err(|e| classify_io_error(e, "Failed to sync snapshot"))?;

        // Atomic rename
        fs::rename(&temp_path, &final_path)
            .map_err(|e| classify_io_error(e, "Failed to rename snapshot file"))?;

        tracing::info!(
            "Saved {} tables to {}",
            snapshot.tables.len(),
            final_path.display()
        );
        Ok(())
    }

    /// Loads the snapshot file into a new database.
    ///
    /// A missing snapshot file yields an empty database.
    ///
    /// # Returns
    /// `Result<Database, DbError>`; `DataCorruption` when a checksum or a
    /// record does not match.
    pub fn load(&self) -> Result<Database, DbError> {
        let path = self.snapshot_path();
        let db = Database::with_config(self.config.clone());

        if !path.exists() {
            tracing::info!("No snapshot at {}, starting empty", path.display());
            return Ok(db);
        }

        let snapshot = read_snapshot(&path)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(DbError::SerializationError(format!(
                "Unsupported snapshot version: {}",
                snapshot.version
            )));
        }

        for (name, table_snapshot) in snapshot.tables {
            let expected = snapshot.checksums.get(&name).copied().ok_or_else(|| {
                DbError::DataCorruption(format!("Missing checksum for table '{}'", name))
            })?;
            let actual = rows_checksum(&table_snapshot.rows)?;
            if actual != expected {
                tracing::warn!(
                    "Checksum mismatch for table {}: stored {}, computed {}",
                    name,
                    expected,
                    actual
                );
                return Err(DbError::DataCorruption(format!(
                    "Checksum mismatch for table '{}'",
                    name
                )));
            }

            let table = Table::restore(
                name,
                table_snapshot.columns,
                table_snapshot.next_id,
                table_snapshot.rows,
                self.config.max_rows_per_table,
            )?;
            db.insert_table(table)?;
        }

        tracing::info!(
            "Loaded {} tables from {}",
            db.table_count()?,
            path.display()
        );
        Ok(db)
    }
}

/// Captures every table's schema, sequence, and current records.
fn build_snapshot(db: &Database) -> Result<SnapshotFile, DbError> {
    let tables = db.with_tables(|tables| {
        tables
            .iter()
            .map(|t| {
                let snapshot = TableSnapshot {
                    columns: t.columns.clone(),
                    next_id: t.current_next_id(),
                    rows: Vec::clone(&t.snapshot()),
                };
                (t.name.clone(), snapshot)
            })
            .collect::<BTreeMap<_, _>>()
    })?;

    let mut checksums = BTreeMap::new();
    for (name, table) in &tables {
        checksums.insert(name.clone(), rows_checksum(&table.rows)?);
    }

    Ok(SnapshotFile {
        version: SNAPSHOT_VERSION,
        tables,
        checksums,
    })
}

fn read_snapshot(path: &Path) -> Result<SnapshotFile, DbError> {
    let mut file =
        File::open(path).map_err(|e| classify_io_error(e, "Failed to open snapshot file"))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| classify_io_error(e, "Failed to read snapshot file"))?;

    serde_json::from_str(&contents)
        .map_err(|e| DbError::SerializationError(format!("Failed to parse snapshot: {}", e)))
}

/// CRC32 over the compact JSON encoding of the rows.
fn rows_checksum(rows: &[Record]) -> Result<u32, DbError> {
    let bytes = serde_json::to_vec(rows).map_err(|e| DbError::SerializationError(e.to_string()))?;
    let mut hasher = Hasher::new();
    hasher.update(&bytes);
    Ok(hasher.finalize())
}

/// Classifies I/O errors into DbError variants.
fn classify_io_error(error: std::io::Error, context: &str) -> DbError {
    match error.kind() {
        ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
            DbError::DataCorruption(format!("{}: {}", context, error))
        }
        _ => DbError::IoError(format!("{}: {}", context, error)),
    }
}
