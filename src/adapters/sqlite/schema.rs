//! Banner store schema.
//!
//! Every statement is `IF NOT EXISTS`, so applying the schema to an existing
//! database is a no-op.

use sqlx::{Executor, SqlitePool};
use thiserror::Error;

const BANNER_SCHEMA: &str = include_str!("../../../schema/banner.sql");

#[derive(Debug, Error)]
#[error("Failed to apply banner schema: {0}")]
pub struct SchemaError(#[source] pub sqlx::Error);

/// Create the banner tables and indexes when they are missing.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), SchemaError> {
    let mut tx = pool.begin().await.map_err(SchemaError)?;
    (&mut *tx).execute(BANNER_SCHEMA).await.map_err(SchemaError)?;
    tx.commit().await.map_err(SchemaError)?;
    tracing::debug!("Banner schema ready");
    Ok(())
}
