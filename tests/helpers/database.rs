use std::sync::Arc;
use std::time::Duration;

use banner_keeper::adapters::cache::MokaContentCache;
use banner_keeper::adapters::sqlite::{
    create_initialized_test_pool, initialize_database, PoolConfig, SqliteBannerRepository,
};
use banner_keeper::{BannerAdminService, BannerRetrievalService};
use sqlx::SqlitePool;

/// Create an in-memory SQLite database for testing
///
/// Each call creates a completely isolated database instance with the
/// banner schema in place.
pub async fn setup_test_db() -> SqlitePool {
    create_initialized_test_pool()
        .await
        .expect("failed to create test database")
}

/// File-backed database with a multi-connection pool.
///
/// The directory must outlive the pool; dropping it removes the database file.
pub async fn setup_file_db(max_connections: u32) -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("banners.db").display());
    let config = PoolConfig {
        max_connections,
        ..PoolConfig::default()
    };
    let pool = initialize_database(&url, Some(config))
        .await
        .expect("failed to open file database");
    (dir, pool)
}

/// Teardown test database
pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}

/// Both services over one store and one in-process cache.
pub struct TestServices {
    pub pool: SqlitePool,
    pub cache: Arc<MokaContentCache>,
    pub retrieval: BannerRetrievalService,
    pub admin: BannerAdminService,
}

pub async fn setup_services(cache_expiration: Duration) -> TestServices {
    let pool = setup_test_db().await;
    let repository = Arc::new(SqliteBannerRepository::new(pool.clone()));
    let cache = Arc::new(MokaContentCache::new(cache_expiration));

    TestServices {
        retrieval: BannerRetrievalService::new(repository.clone(), cache.clone()),
        admin: BannerAdminService::new(repository),
        cache,
        pool,
    }
}

/// Rows in `table`, for checking that failed writes left nothing behind.
pub async fn row_count(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("failed to count rows");
    count
}
