//! Mapping DAO behaviour over a shared store.

use std::sync::Arc;

use ntest::timeout;

use relmap_core::database::Database;
use relmap_core::table::Column;
use relmap_core::types::{ColumnType, Value};
use relmap_core::{DbError, MappingDao, MappingError, MappingRef, MappingTable, TableDao};

use super::helpers::{create_mapping_table, link_all, mapping_dao, stored_pairs, TABLE};

#[timeout(1000)]
#[test]
fn test_link_query_count_delete_scenario() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 10), (1, 11), (2, 10)])?;

    let rows = dao.query_by_base_id(1)?;
    let mut related: Vec<_> = rows.iter().filter_map(|r| r.related_id()).collect();
    related.sort();
    assert_eq!(related, vec![10, 11]);

    assert_eq!(dao.count_by_ids(1, None)?, 2);
    assert_eq!(dao.count_by_ids(1, Some(10.into()))?, 1);

    let mut unique = dao.unique_related_ids()?;
    unique.sort();
    assert_eq!(unique, vec![10, 11]);

    assert_eq!(dao.delete_by_related_id(10)?, 2);
    assert_eq!(stored_pairs(&dao)?, vec![(1, 11)]);
    assert_eq!(dao.count()?, 1);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_query_by_base_id_matches_query_by_ids_without_related() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 10), (1, 11), (2, 10)])?;

    for base in [1, 2, 3] {
        let by_base = dao.query_by_base_id(base)?.id_pairs();
        assert_eq!(by_base, dao.query_by_ids(base, None)?.id_pairs());
        assert!(by_base.iter().all(|(b, _)| *b == Some(base)));
    }
    assert_eq!(dao.query_by_ids(1, None)?.len(), 2);
    assert!(dao.query_by_ids(3, None)?.is_empty());
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_count_by_ids_matches_query_by_ids_len() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 10), (1, 11), (2, 10)])?;

    for base in [1, 2, 3] {
        assert_eq!(
            dao.count_by_ids(base, None)?,
            dao.query_by_ids(base, None)?.len()
        );
        for related in [10, 11, 12] {
            assert_eq!(
                dao.count_by_ids(base, Some(related.into()))?,
                dao.query_by_ids(base, Some(related.into()))?.len()
            );
        }
    }
    assert_eq!(dao.count_by_ids(1, Some(11.into()))?, 1);
    assert_eq!(dao.count_by_ids(2, Some(11.into()))?, 0);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_row_and_id_arguments_are_equivalent() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 10), (1, 11), (2, 10), (3, 12)])?;

    let mut probe = dao.new_row();
    probe.set_base_id(1);
    probe.set_related_id(10);

    assert_eq!(
        dao.query_by_base_id(&probe)?.id_pairs(),
        dao.query_by_base_id(1)?.id_pairs()
    );
    assert_eq!(
        dao.query_by_related_id(&probe)?.id_pairs(),
        dao.query_by_related_id(10)?.id_pairs()
    );
    assert_eq!(
        dao.count_by_ids(&probe, Some(MappingRef::from(&probe)))?,
        dao.count_by_ids(1, Some(10.into()))?
    );
    assert_eq!(
        dao.query_by_ids(&probe, Some((&probe).into()))?.len(),
        1
    );
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_related_id_zero_is_applied() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 0), (1, 5), (2, 0)])?;

    assert_eq!(dao.count_by_ids(1, Some(0.into()))?, 1);
    assert_eq!(dao.count_by_ids(1, None)?, 2);
    assert_eq!(dao.query_by_ids(1, Some(0.into()))?.id_pairs(), vec![(Some(1), Some(0))]);

    assert_eq!(dao.delete_by_ids(1, Some(0.into()))?, 1);
    assert_eq!(stored_pairs(&dao)?, vec![(1, 5), (2, 0)]);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_delete_by_ids_without_related_removes_all_for_base() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 10), (1, 11), (2, 10)])?;

    assert_eq!(dao.delete_by_ids(1, None)?, 2);
    assert_eq!(stored_pairs(&dao)?, vec![(2, 10)]);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_deletes_with_no_match_return_zero() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 10)])?;

    assert_eq!(dao.delete_by_base_id(99)?, 0);
    assert_eq!(dao.delete_by_related_id(99)?, 0);
    assert_eq!(dao.delete_by_ids(1, Some(99.into()))?, 0);
    assert_eq!(dao.count()?, 1);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_empty_table_queries() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;

    assert!(dao.query_for_all()?.is_empty());
    assert!(dao.query_by_base_id(1)?.is_empty());
    assert!(dao.unique_related_ids()?.is_empty());
    assert_eq!(dao.count_by_ids(1, None)?, 0);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_duplicate_pairs_are_stored_separately() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 10), (1, 10)])?;

    assert_eq!(dao.count_by_ids(1, Some(10.into()))?, 2);
    assert_eq!(dao.unique_related_ids()?, vec![10]);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_result_set_is_restartable_snapshot() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    link_all(&dao, &[(1, 10), (1, 11)])?;

    let rows = dao.query_by_base_id(1)?;
    link_all(&dao, &[(1, 12)])?;

    let first = rows.id_pairs();
    let second = rows.id_pairs();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(dao.query_by_base_id(1)?.len(), 3);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_created_rows_carry_ids_and_extra_columns() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;

    let mut row = dao.new_row();
    row.set_base_id(4);
    row.set_related_id(40);
    row.set_value("note", "cover photo")?;
    let id = dao.create(&mut row)?;
    assert_eq!(row.id(), Some(id));

    let stored = dao.query_by_ids(4, Some(40.into()))?.collect_rows();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id(), Some(id));
    assert_eq!(stored[0].value("note"), Some(&Value::from("cover photo")));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_row_with_types() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    let types = [ColumnType::Integer, ColumnType::Integer, ColumnType::Text];

    let mut row = dao.new_row_with_types(
        &types,
        vec![Value::Integer(7), Value::Integer(70), Value::from("typed")],
    )?;
    dao.create(&mut row)?;
    assert_eq!(dao.count_by_ids(7, Some(70.into()))?, 1);

    let short = dao.new_row_with_types(&types[..2], vec![Value::Integer(7)]);
    assert!(matches!(short, Err(MappingError::ArgumentShape(_))));

    let wrong_type = dao.new_row_with_types(
        &[ColumnType::Integer, ColumnType::Text, ColumnType::Text],
        vec![Value::Integer(7), Value::from("x"), Value::Null],
    );
    assert!(matches!(wrong_type, Err(MappingError::ArgumentShape(_))));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_row_without_ids_is_rejected() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    let blank = dao.new_row();

    assert!(matches!(
        dao.query_by_base_id(&blank),
        Err(MappingError::ArgumentShape(_))
    ));
    assert!(matches!(
        dao.delete_by_related_id(&blank),
        Err(MappingError::ArgumentShape(_))
    ));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_insert_without_ids_violates_not_null() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    let mut blank = dao.new_row();

    assert!(matches!(
        dao.create(&mut blank),
        Err(MappingError::Storage(DbError::NullViolation { .. }))
    ));
    assert_eq!(blank.id(), None);

    // The failed insert does not consume a row id.
    link_all(&dao, &[(1, 10)])?;
    assert_eq!(dao.query_for_all()?.collect_rows()[0].id(), Some(1));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_descriptor_derived_from_stored_schema() -> anyhow::Result<()> {
    let db = Arc::new(Database::new());
    create_mapping_table(&db, TABLE)?;

    let dao = MappingDao::new(TableDao::new(db, TABLE)?, None)?;
    let names: Vec<_> = dao.table().columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["base_id", "related_id", "note"]);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_schema_mismatch_detected_on_bind() -> anyhow::Result<()> {
    let db = Arc::new(Database::new());
    db.create_table(
        "loose",
        vec![
            Column::new("base_id", ColumnType::Integer),
            Column::new("related_id", ColumnType::Text),
        ],
    )?;

    let derived = MappingDao::new(TableDao::new(db.clone(), "loose")?, None);
    assert!(matches!(derived, Err(MappingError::SchemaMismatch { .. })));

    let descriptor = MappingTable::create("loose", vec![])?;
    let explicit = MappingDao::new(TableDao::new(db, "loose")?, Some(descriptor));
    assert!(matches!(
        explicit,
        Err(MappingError::SchemaMismatch { column, .. }) if column == "related_id"
    ));
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_custom_id_column_names() -> anyhow::Result<()> {
    let db = Arc::new(Database::new());
    let columns = vec![
        Column::new("id", ColumnType::Integer).primary_key(),
        Column::new("user_id", ColumnType::Integer).not_null(),
        Column::new("group_id", ColumnType::Integer).not_null(),
    ];
    db.create_table("memberships", columns.clone())?;

    let descriptor = MappingTable::with_columns("memberships", columns, "user_id", "group_id")?;
    let dao = MappingDao::new(TableDao::new(db, "memberships")?, Some(descriptor))?;
    link_all(&dao, &[(1, 100), (2, 100), (2, 200)])?;

    assert_eq!(dao.count_by_ids(2, None)?, 2);
    let mut groups = dao.unique_related_ids()?;
    groups.sort();
    assert_eq!(groups, vec![100, 200]);
    assert_eq!(dao.delete_by_base_id(2)?, 2);
    Ok(())
}

#[timeout(1000)]
#[test]
fn test_two_daos_share_one_store() -> anyhow::Result<()> {
    let (db, first) = mapping_dao()?;
    let second = MappingDao::new(TableDao::new(db, TABLE)?, None)?;

    link_all(&first, &[(1, 10)])?;
    assert_eq!(second.count_by_ids(1, None)?, 1);

    second.delete_by_base_id(1)?;
    assert_eq!(first.count()?, 0);
    Ok(())
}
