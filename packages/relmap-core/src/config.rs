//! Store configuration.

use std::path::PathBuf;

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Initial table capacity in records
    pub initial_table_capacity: usize,
    /// Maximum records per table (default: unlimited)
    pub max_rows_per_table: usize,
    /// Data directory for persistence
    pub data_dir: PathBuf,
    /// Snapshot file name inside `data_dir`
    pub snapshot_file: String,
}

impl StoreConfig {
    /// Returns a config rooted at the given data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_table_capacity: 1024,
            max_rows_per_table: usize::MAX,
            data_dir: PathBuf::from("./data"),
            snapshot_file: "snapshot.json".to_string(),
        }
    }
}
