//! Transactional unit of work over the banner and association tables.
//!
//! Every multi-statement write goes through one [`BannerUnitOfWork`]; the banner
//! row and its `(feature, tag)` associations either commit together or not at all.

use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};
use tracing::warn;

use crate::domain::errors::{BannerError, DomainResult};
use crate::domain::models::NewBanner;

/// A scoped transaction handle passed through each step of a write sequence.
///
/// Dropping it without calling [`finish`](Self::finish) rolls the transaction back.
pub struct BannerUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl BannerUnitOfWork {
    pub async fn begin(pool: &SqlitePool) -> DomainResult<Self> {
        let tx = pool
            .begin()
            .await
            .map_err(|e| BannerError::from_store("begin_transaction", "banner store", e))?;
        Ok(Self { tx })
    }

    /// Insert the banner row and return its generated id.
    pub async fn insert_banner(&mut self, banner: &NewBanner, now: &str) -> DomainResult<i64> {
        let result = sqlx::query(
            r#"INSERT INTO banner (feature_id, content, is_active, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(banner.feature_id)
        .bind(&banner.content)
        .bind(banner.is_active)
        .bind(now)
        .bind(now)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| BannerError::from_store("insert_banner", format_args!("feature {}", banner.feature_id), e))?;

        Ok(result.last_insert_rowid())
    }

    /// Update the scalar columns of a banner row and return its feature after
    /// the update, or `None` when no such banner exists.
    ///
    /// This is the first statement of an update, so the transaction takes the
    /// write lock before it reads anything.
    pub async fn update_banner_columns(
        &mut self,
        id: i64,
        feature_id: Option<i64>,
        content: Option<String>,
        is_active: Option<bool>,
        now: &str,
    ) -> DomainResult<Option<i64>> {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE banner SET updated_at = ");
        builder.push_bind(now);
        if let Some(feature_id) = feature_id {
            builder.push(", feature_id = ").push_bind(feature_id);
        }
        if let Some(content) = content {
            builder.push(", content = ").push_bind(content);
        }
        if let Some(is_active) = is_active {
            builder.push(", is_active = ").push_bind(is_active);
        }
        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING feature_id");

        let row: Option<(i64,)> = builder
            .build_query_as::<(i64,)>()
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| BannerError::from_store("update_banner", format_args!("banner {id}"), e))?;
        Ok(row.map(|(feature_id,)| feature_id))
    }

    /// Bulk-insert one association per tag.
    pub async fn insert_associations(&mut self, banner_id: i64, feature_id: i64, tag_ids: &[i64]) -> DomainResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("INSERT INTO banner_feature_tags (banner_id, feature_id, tag_id) ");
        builder.push_values(tag_ids, |mut row, tag_id| {
            row.push_bind(banner_id).push_bind(feature_id).push_bind(*tag_id);
        });

        builder
            .build()
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                BannerError::from_store("insert_associations", format_args!("feature {feature_id}, tags {tag_ids:?}"), e)
            })?;
        Ok(())
    }

    /// Delete every association of a banner. Returns the number removed.
    pub async fn delete_associations(&mut self, banner_id: i64) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM banner_feature_tags WHERE banner_id = ?")
            .bind(banner_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| BannerError::from_store("delete_associations", format_args!("banner {banner_id}"), e))?;
        Ok(result.rows_affected())
    }

    /// Move the existing associations of a banner to another feature.
    pub async fn retarget_associations(&mut self, banner_id: i64, feature_id: i64) -> DomainResult<u64> {
        let result = sqlx::query("UPDATE banner_feature_tags SET feature_id = ? WHERE banner_id = ?")
            .bind(feature_id)
            .bind(banner_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                BannerError::from_store("retarget_associations", format_args!("banner {banner_id} to feature {feature_id}"), e)
            })?;
        Ok(result.rows_affected())
    }

    /// Delete the banner row itself. Returns the affected row count.
    pub async fn delete_banner_row(&mut self, id: i64) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM banner WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| BannerError::from_store("delete_banner", format_args!("banner {id}"), e))?;
        Ok(result.rows_affected())
    }

    /// Commit on success, roll back on failure, then hand `result` back.
    pub async fn finish<T>(self, result: DomainResult<T>) -> DomainResult<T> {
        match result {
            Ok(value) => {
                self.tx
                    .commit()
                    .await
                    .map_err(|e| BannerError::from_store("commit", "banner store", e))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed after write error");
                }
                Err(err)
            }
        }
    }
}
