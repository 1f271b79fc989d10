//! Id-or-row arguments.

use crate::error::MappingError;

use super::MappingRow;

/// An identifier given either directly or through a mapping row.
///
/// Base id parameters read a row's base id, related id parameters read its
/// related id; a raw id is used as is.
#[derive(Debug, Clone, Copy)]
pub enum MappingRef<'a> {
    Id(i64),
    Row(&'a MappingRow),
}

impl MappingRef<'_> {
    /// Resolves as a base id.
    pub fn base_id(&self) -> Result<i64, MappingError> {
        match self {
            MappingRef::Id(id) => Ok(*id),
            MappingRef::Row(row) => row
                .base_id()
                .ok_or_else(|| MappingError::ArgumentShape("mapping row has no base id".to_string())),
        }
    }

    /// Resolves as a related id.
    pub fn related_id(&self) -> Result<i64, MappingError> {
        match self {
            MappingRef::Id(id) => Ok(*id),
            MappingRef::Row(row) => row.related_id().ok_or_else(|| {
                MappingError::ArgumentShape("mapping row has no related id".to_string())
            }),
        }
    }
}

impl From<i64> for MappingRef<'_> {
    fn from(id: i64) -> Self {
        MappingRef::Id(id)
    }
}

impl From<i32> for MappingRef<'_> {
    fn from(id: i32) -> Self {
        MappingRef::Id(id as i64)
    }
}

impl From<u32> for MappingRef<'_> {
    fn from(id: u32) -> Self {
        MappingRef::Id(id as i64)
    }
}

impl<'a> From<&'a MappingRow> for MappingRef<'a> {
    fn from(row: &'a MappingRow) -> Self {
        MappingRef::Row(row)
    }
}
