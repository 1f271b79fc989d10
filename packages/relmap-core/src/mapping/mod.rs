//! Many-to-many mapping tables.
//!
//! A mapping table associates ids of a base table with ids of a related
//! table, one row per association. [`MappingDao`] translates relation
//! requests into generic [`TableDao`](crate::access::TableDao) calls.

mod dao;
mod reference;
mod row;
mod table;

pub use dao::{MappingDao, MappingRows};
pub use reference::MappingRef;
pub use row::MappingRow;
pub use table::{MappingTable, COLUMN_BASE_ID, COLUMN_RELATED_ID};
