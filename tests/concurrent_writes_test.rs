//! Writes racing on a WAL file database through a multi-connection pool.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use banner_keeper::adapters::sqlite::SqliteBannerRepository;
use banner_keeper::{BannerAdminService, BannerKey, BannerPatch, NewBanner};
use helpers::database::{row_count, setup_file_db};

const POOL_SIZE: u32 = 8;

fn admin_over(pool: sqlx::SqlitePool) -> Arc<BannerAdminService> {
    Arc::new(BannerAdminService::new(Arc::new(SqliteBannerRepository::new(pool))))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_all_commit() {
    let (_dir, pool) = setup_file_db(POOL_SIZE).await;
    let admin = admin_over(pool.clone());

    let mut ids = Vec::new();
    for feature_id in 0..8 {
        let created = admin
            .create_banner(NewBanner::new(feature_id, [1], "r0"))
            .await
            .expect("failed to create banner");
        ids.push(created.id);
    }

    let mut handles = Vec::new();
    for n in 0..160 {
        let admin = admin.clone();
        let id = ids[n % ids.len()];
        handles.push(tokio::spawn(async move {
            admin.update_banner(id, BannerPatch::new().content(format!("r{n}"))).await
        }));
    }

    let mut failures = Vec::new();
    for handle in handles {
        if let Err(err) = handle.await.expect("update task panicked") {
            failures.push(err.to_string());
        }
    }
    assert!(failures.is_empty(), "updates failed: {failures:?}");

    for (slot, feature_id) in (0..8).enumerate() {
        let found = admin.get_banner(BannerKey::new(feature_id, 1), None).await.unwrap();
        let written: HashSet<String> = (0..160).filter(|n| n % 8 == slot).map(|n| format!("r{n}")).collect();
        assert!(written.contains(&found.content), "unexpected content {}", found.content);
    }

    pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_retargets_keep_associations_consistent() {
    let (_dir, pool) = setup_file_db(POOL_SIZE).await;
    let admin = admin_over(pool.clone());
    let created = admin.create_banner(NewBanner::new(1, [1, 2], "c")).await.unwrap();
    let id = created.id;

    let mut handles = Vec::new();
    for n in 0..32_i64 {
        let admin = admin.clone();
        handles.push(tokio::spawn(async move {
            let patch = BannerPatch::new().feature_id(100 + n % 4).tag_ids([n % 3 + 1, 10]);
            admin.update_banner(id, patch).await
        }));
    }
    for handle in handles {
        handle.await.expect("update task panicked").expect("update failed");
    }

    let (feature_id,): (i64,) = sqlx::query_as("SELECT feature_id FROM banner WHERE id = ?")
        .bind(created.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    let found = admin.get_banner(BannerKey::new(feature_id, 10), None).await.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.tag_ids.len(), 2);

    let (stale,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM banner_feature_tags WHERE feature_id <> ?")
        .bind(feature_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stale, 0);
    assert_eq!(row_count(&pool, "banner_feature_tags").await, 2);

    pool.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_claims_have_one_winner() {
    let (_dir, pool) = setup_file_db(POOL_SIZE).await;
    let admin = admin_over(pool.clone());

    let mut handles = Vec::new();
    for n in 0..8 {
        let admin = admin.clone();
        handles.push(tokio::spawn(async move {
            admin.create_banner(NewBanner::new(5, [9], format!("c{n}"))).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.expect("create task panicked") {
            Ok(_) => winners += 1,
            Err(err) => assert!(err.is_conflict(), "expected conflict, got {err}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(row_count(&pool, "banner").await, 1);
    assert_eq!(row_count(&pool, "banner_feature_tags").await, 1);

    pool.close().await;
}
