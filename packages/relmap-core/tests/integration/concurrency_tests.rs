//! Concurrent readers and writers on one mapping table.

use std::thread;

use ntest::timeout;

use super::helpers::{link_all, mapping_dao};

#[timeout(5000)]
#[test]
fn test_parallel_writers_keep_every_row() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;

    let handles: Vec<_> = (0..4i64)
        .map(|base| {
            let dao = dao.clone();
            thread::spawn(move || {
                let pairs: Vec<_> = (0..50i64).map(|related| (base, related)).collect();
                link_all(&dao, &pairs)
            })
        })
        .collect();
    for handle in handles {
        handle.join().map_err(|_| anyhow::anyhow!("writer panicked"))??;
    }

    assert_eq!(dao.count()?, 200);
    for base in 0..4i64 {
        assert_eq!(dao.count_by_ids(base, None)?, 50);
    }
    assert_eq!(dao.unique_related_ids()?.len(), 50);
    Ok(())
}

#[timeout(5000)]
#[test]
fn test_readers_see_whole_snapshots_during_deletes() -> anyhow::Result<()> {
    let (_db, dao) = mapping_dao()?;
    let pairs: Vec<_> = (0..100i64).map(|i| (i % 10, i)).collect();
    link_all(&dao, &pairs)?;

    let writer = {
        let dao = dao.clone();
        thread::spawn(move || -> anyhow::Result<()> {
            for base in 0..10i64 {
                dao.delete_by_base_id(base)?;
            }
            Ok(())
        })
    };

    for _ in 0..50 {
        let rows = dao.query_for_all()?;
        // Deletes remove whole bases, so every snapshot holds a multiple of ten.
        assert_eq!(rows.len() % 10, 0);
        assert_eq!(rows.iter().count(), rows.len());
    }

    writer
        .join()
        .map_err(|_| anyhow::anyhow!("writer panicked"))??;
    assert_eq!(dao.count()?, 0);
    Ok(())
}
