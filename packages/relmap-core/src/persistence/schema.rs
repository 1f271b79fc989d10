//! Snapshot file structs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::table::{Column, Record};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot file format for persistence.
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Snapshot version
    pub version: u32,
    /// Table definitions and contents
    pub tables: BTreeMap<String, TableSnapshot>,
    /// CRC32 of each table's serialized rows
    #[serde(default)]
    pub checksums: BTreeMap<String, u32>,
}

/// One table in a snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Column definitions
    pub columns: Vec<Column>,
    /// Next row id to assign
    pub next_id: u64,
    /// Stored records
    pub rows: Vec<Record>,
}
