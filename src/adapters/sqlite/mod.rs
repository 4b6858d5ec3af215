//! SQLite database adapters for the banner store.

pub mod banner_repository;
pub mod connection;
pub mod schema;
pub mod unit_of_work;

pub use banner_repository::SqliteBannerRepository;
pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use schema::{ensure_schema, SchemaError};
pub use unit_of_work::BannerUnitOfWork;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::errors::{BannerError, DomainResult};

/// Parse an RFC3339 datetime string from a SQLite row field.
pub fn parse_datetime(s: &str) -> DomainResult<DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| BannerError::internal("decode_banner_row", format!("malformed timestamp {s:?}: {e}")))
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),
}

/// Open a pool for `database_url` and create the schema if it is missing.
pub async fn initialize_database(database_url: &str, config: Option<PoolConfig>) -> Result<SqlitePool, DatabaseError> {
    let pool = if is_memory_url(database_url) {
        create_test_pool().await?
    } else {
        create_pool(database_url, config).await?
    };
    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Create an in-memory test pool with the banner schema in place.
pub async fn create_initialized_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

// Every connection to `sqlite::memory:` is a separate database, so these URLs
// get the single-connection pool.
fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let parsed = parse_datetime("2024-04-10T12:30:00+00:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-04-10T12:30:00+00:00");
        assert!(parse_datetime("yesterday").is_err());
    }

    #[tokio::test]
    async fn test_initialize_memory_database() {
        let pool = initialize_database("sqlite::memory:", None).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM banner")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
