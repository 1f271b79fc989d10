//! Snapshot persistence round trips.

use std::fs;
use std::sync::Arc;

use ntest::timeout;
use tempfile::tempdir;

use relmap_core::config::StoreConfig;
use relmap_core::database::Database;
use relmap_core::persistence::SnapshotManager;
use relmap_core::{DbError, MappingDao, TableDao};

use super::helpers::{create_mapping_table, link_all, stored_pairs, TABLE};

#[timeout(5000)]
#[test]
fn test_mappings_survive_restart() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let config = StoreConfig::with_data_dir(temp_dir.path());
    let persistence = SnapshotManager::new(&config);

    {
        let db = Arc::new(Database::with_config(config.clone()));
        create_mapping_table(&db, TABLE)?;
        let dao = MappingDao::new(TableDao::new(db.clone(), TABLE)?, None)?;
        link_all(&dao, &[(1, 10), (1, 11), (2, 10)])?;
        dao.delete_by_ids(1, Some(11.into()))?;
        persistence.save(&db)?;
    }

    let db = Arc::new(persistence.load()?);
    let dao = MappingDao::new(TableDao::new(db, TABLE)?, None)?;
    assert_eq!(stored_pairs(&dao)?, vec![(1, 10), (2, 10)]);

    // Row ids keep counting after a reload.
    let mut row = dao.new_row();
    row.set_base_id(3);
    row.set_related_id(30);
    assert_eq!(dao.create(&mut row)?, 4);
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_save_replaces_previous_snapshot() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let config = StoreConfig::with_data_dir(temp_dir.path());
    let persistence = SnapshotManager::new(&config);

    let db = Arc::new(Database::with_config(config.clone()));
    create_mapping_table(&db, TABLE)?;
    let dao = MappingDao::new(TableDao::new(db.clone(), TABLE)?, None)?;

    link_all(&dao, &[(1, 10)])?;
    persistence.save(&db)?;
    link_all(&dao, &[(2, 20)])?;
    persistence.save(&db)?;

    let leftovers: Vec<_> = fs::read_dir(temp_dir.path())?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());

    let reloaded = Arc::new(persistence.load()?);
    let dao = MappingDao::new(TableDao::new(reloaded, TABLE)?, None)?;
    assert_eq!(dao.count()?, 2);
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_truncated_snapshot_fails_to_load() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let config = StoreConfig::with_data_dir(temp_dir.path());
    let persistence = SnapshotManager::new(&config);

    let db = Database::with_config(config.clone());
    create_mapping_table(&db, TABLE)?;
    persistence.save(&db)?;

    let path = persistence.snapshot_path();
    let contents = fs::read_to_string(&path)?;
    fs::write(&path, &contents[..contents.len() / 2])?;

    assert!(matches!(
        persistence.load(),
        Err(DbError::SerializationError(_))
    ));
    Ok(())
}
