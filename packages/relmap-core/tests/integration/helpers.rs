//! Shared fixtures.

use std::sync::Arc;

use relmap_core::database::Database;
use relmap_core::table::Column;
use relmap_core::types::ColumnType;
use relmap_core::{MappingDao, MappingTable, TableDao};

pub const TABLE: &str = "photo_tags";

/// Creates the standard mapping table (plus a `note` column) in `db`.
pub fn create_mapping_table(db: &Database, name: &str) -> anyhow::Result<MappingTable> {
    let schema = MappingTable::create(name, vec![Column::new("note", ColumnType::Text)])?;
    db.create_table(schema.table_name(), schema.columns().to_vec())?;
    Ok(schema)
}

/// Fresh store with an empty mapping table bound to a DAO.
pub fn mapping_dao() -> anyhow::Result<(Arc<Database>, MappingDao)> {
    let db = Arc::new(Database::new());
    let schema = create_mapping_table(&db, TABLE)?;
    let dao = MappingDao::new(TableDao::new(db.clone(), TABLE)?, Some(schema))?;
    Ok((db, dao))
}

/// Inserts one association per pair.
pub fn link_all(dao: &MappingDao, pairs: &[(i64, i64)]) -> anyhow::Result<()> {
    for &(base, related) in pairs {
        let mut row = dao.new_row();
        row.set_base_id(base);
        row.set_related_id(related);
        dao.create(&mut row)?;
    }
    Ok(())
}

/// Sorted `(base, related)` pairs currently stored.
pub fn stored_pairs(dao: &MappingDao) -> anyhow::Result<Vec<(i64, i64)>> {
    let mut pairs: Vec<_> = dao
        .query_for_all()?
        .iter()
        .filter_map(|r| Some((r.base_id()?, r.related_id()?)))
        .collect();
    pairs.sort();
    Ok(pairs)
}
