//! Mapping table data access.

use std::sync::Arc;

use crate::access::{ColumnValues, ResultSet, TableDao, WhereClause};
use crate::error::MappingError;
use crate::table::Record;
use crate::types::{ColumnType, Value};

use super::{MappingRef, MappingRow, MappingTable};

/// Data access object for one mapping table.
///
/// Holds only the immutable descriptor and the generic table DAO (which
/// carries the shared storage handle). Every operation makes at most one
/// storage call.
#[derive(Debug, Clone)]
pub struct MappingDao {
    dao: TableDao,
    table: Arc<MappingTable>,
}

impl MappingDao {
    /// Binds a mapping DAO to a table.
    ///
    /// # Arguments
    /// * `dao` - Generic access to the stored mapping table
    /// * `table` - Descriptor; derived from the stored schema when `None`
    ///
    /// # Returns
    /// `Result<MappingDao, MappingError>`; fails with `SchemaMismatch` if a
    /// descriptor column is missing from the stored table or typed
    /// differently.
    pub fn new(dao: TableDao, table: Option<MappingTable>) -> Result<Self, MappingError> {
        let table = match table {
            Some(table) => table,
            None => Self::create_mapping_table(&dao)?,
        };
        table.validate_against(dao.columns())?;

        tracing::debug!(
            "Mapping DAO bound to {} (base: {}, related: {})",
            dao.table_name(),
            table.base_id_column(),
            table.related_id_column()
        );
        Ok(Self {
            dao,
            table: Arc::new(table),
        })
    }

    /// Derives a mapping descriptor from an existing table's schema.
    pub fn create_mapping_table(dao: &TableDao) -> Result<MappingTable, MappingError> {
        MappingTable::from_table_dao(dao)
    }

    /// The mapping table descriptor.
    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// The underlying generic table DAO.
    pub fn table_dao(&self) -> &TableDao {
        &self.dao
    }

    /// Empty mapping row bound to the descriptor.
    pub fn new_row(&self) -> MappingRow {
        MappingRow::new(self.table.clone())
    }

    /// Mapping row from column types and values paired positionally with the
    /// descriptor's columns.
    pub fn new_row_with_types(
        &self,
        column_types: &[ColumnType],
        values: Vec<Value>,
    ) -> Result<MappingRow, MappingError> {
        MappingRow::with_types(self.table.clone(), column_types, values)
    }

    /// Materializes one stored record as a mapping row.
    pub fn row_from_record(&self, record: &Record) -> MappingRow {
        MappingRow::from_row(self.table.clone(), &self.dao.get_row(record))
    }

    /// Inserts a mapping row and records the assigned id on it.
    ///
    /// # Returns
    /// `Result<u64, MappingError>` containing the storage row id.
    pub fn create(&self, row: &mut MappingRow) -> Result<u64, MappingError> {
        let mut stored = self.dao.new_row();
        for (column, value) in self.table.columns().iter().zip(row.values()) {
            stored.set_value(&column.name, value.clone())?;
        }
        let id = self.dao.create(&mut stored)?;
        row.set_id(id);

        tracing::debug!("Created mapping row {} in {}", id, self.dao.table_name());
        Ok(id)
    }

    /// Every mapping row.
    pub fn query_for_all(&self) -> Result<MappingRows, MappingError> {
        Ok(self.wrap(self.dao.query_for_all()?))
    }

    /// Total number of mapping rows.
    pub fn count(&self) -> Result<usize, MappingError> {
        Ok(self.dao.count_all()?)
    }

    /// Rows whose base id equals the given id or the row's base id.
    pub fn query_by_base_id<'a>(
        &self,
        base: impl Into<MappingRef<'a>>,
    ) -> Result<MappingRows, MappingError> {
        let base_id = base.into().base_id()?;
        tracing::debug!("Query {} by base id {}", self.dao.table_name(), base_id);
        let results = self
            .dao
            .query_for_all_eq(self.table.base_id_column(), base_id)?;
        Ok(self.wrap(results))
    }

    /// Rows whose related id equals the given id or the row's related id.
    pub fn query_by_related_id<'a>(
        &self,
        related: impl Into<MappingRef<'a>>,
    ) -> Result<MappingRows, MappingError> {
        let related_id = related.into().related_id()?;
        tracing::debug!("Query {} by related id {}", self.dao.table_name(), related_id);
        let results = self
            .dao
            .query_for_all_eq(self.table.related_id_column(), related_id)?;
        Ok(self.wrap(results))
    }

    /// Rows matching the base id and, when given, the related id.
    pub fn query_by_ids<'a>(
        &self,
        base: impl Into<MappingRef<'a>>,
        related: Option<MappingRef<'_>>,
    ) -> Result<MappingRows, MappingError> {
        let values = self.id_values(base.into(), related)?;
        let results = self.dao.query_for_field_values(&values)?;
        Ok(self.wrap(results))
    }

    /// Each distinct related id in the table, once. Order is unspecified.
    ///
    /// NULL related ids, possible only in tables without a NOT NULL
    /// constraint, are skipped.
    pub fn unique_related_ids(&self) -> Result<Vec<i64>, MappingError> {
        let values = self.dao.query_distinct(self.table.related_id_column())?;
        Ok(values.iter().filter_map(Value::as_integer).collect())
    }

    /// Number of rows matching the base id and, when given, the related id.
    pub fn count_by_ids<'a>(
        &self,
        base: impl Into<MappingRef<'a>>,
        related: Option<MappingRef<'_>>,
    ) -> Result<usize, MappingError> {
        let values = self.id_values(base.into(), related)?;
        Ok(self.dao.count(&values)?)
    }

    /// Deletes rows with the given base id.
    ///
    /// # Returns
    /// Number of rows deleted.
    pub fn delete_by_base_id<'a>(
        &self,
        base: impl Into<MappingRef<'a>>,
    ) -> Result<usize, MappingError> {
        let base_id = base.into().base_id()?;
        let clause = self
            .dao
            .build_where_with_field_and_value(self.table.base_id_column(), base_id);
        self.delete(&clause)
    }

    /// Deletes rows with the given related id.
    ///
    /// # Returns
    /// Number of rows deleted.
    pub fn delete_by_related_id<'a>(
        &self,
        related: impl Into<MappingRef<'a>>,
    ) -> Result<usize, MappingError> {
        let related_id = related.into().related_id()?;
        let clause = self
            .dao
            .build_where_with_field_and_value(self.table.related_id_column(), related_id);
        self.delete(&clause)
    }

    /// Deletes rows matching the base id and, when given, the related id.
    ///
    /// # Returns
    /// Number of rows deleted.
    pub fn delete_by_ids<'a>(
        &self,
        base: impl Into<MappingRef<'a>>,
        related: Option<MappingRef<'_>>,
    ) -> Result<usize, MappingError> {
        let base_id = base.into().base_id()?;
        let mut clause = self
            .dao
            .build_where_with_field_and_value(self.table.base_id_column(), base_id);
        if let Some(related) = related {
            let related_id = related.related_id()?;
            clause = clause.and(
                self.dao
                    .build_where_with_field_and_value(self.table.related_id_column(), related_id),
            );
        }
        self.delete(&clause)
    }

    /// Binds the clause's own values as its arguments, keeping them in
    /// placeholder order.
    fn delete(&self, clause: &WhereClause) -> Result<usize, MappingError> {
        let args = self.dao.build_where_args(clause.args());
        Ok(self.dao.delete_where(clause, &args)?)
    }

    /// Base id entry always, related id entry only when supplied.
    fn id_values(
        &self,
        base: MappingRef<'_>,
        related: Option<MappingRef<'_>>,
    ) -> Result<ColumnValues, MappingError> {
        let mut values = ColumnValues::new();
        values.add_column(self.table.base_id_column(), base.base_id()?);
        if let Some(related) = related {
            values.add_column(self.table.related_id_column(), related.related_id()?);
        }
        tracing::debug!("Match {} on {} column(s)", self.dao.table_name(), values.len());
        Ok(values)
    }

    fn wrap(&self, results: ResultSet) -> MappingRows {
        MappingRows {
            results,
            dao: self.dao.clone(),
            table: self.table.clone(),
        }
    }
}

/// Lazy, restartable sequence of mapping rows.
///
/// Backed by an immutable table snapshot: every `iter()` call starts over
/// and yields the same rows, unaffected by later writes.
#[derive(Debug, Clone)]
pub struct MappingRows {
    results: ResultSet,
    dao: TableDao,
    table: Arc<MappingTable>,
}

impl MappingRows {
    /// Iterates the rows from the start, materializing each on demand.
    pub fn iter(&self) -> impl Iterator<Item = MappingRow> + '_ {
        self.results
            .iter()
            .map(move |record| MappingRow::from_row(self.table.clone(), &self.dao.get_row(record)))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Materializes every row.
    pub fn collect_rows(&self) -> Vec<MappingRow> {
        self.iter().collect()
    }

    /// `(base id, related id)` of every row, in storage order.
    pub fn id_pairs(&self) -> Vec<(Option<i64>, Option<i64>)> {
        self.iter().map(|r| (r.base_id(), r.related_id())).collect()
    }
}
