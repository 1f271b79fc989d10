//! Relation mapping data access over an in-memory relational store.
//!
//! Provides a copy-on-write table engine, a generic column-keyed table
//! access layer, a DAO for many-to-many mapping tables, and JSON snapshot
//! persistence.

pub mod access;
pub mod config;
pub mod database;
pub mod error;
pub mod mapping;
pub mod persistence;
pub mod table;
pub mod types;

pub use access::{ColumnValues, ResultSet, Row, TableDao, WhereClause};
pub use error::{DbError, MappingError};
pub use mapping::{MappingDao, MappingRef, MappingRow, MappingRows, MappingTable};
