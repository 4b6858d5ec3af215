//! SQLite implementation of the BannerRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use super::unit_of_work::BannerUnitOfWork;
use crate::domain::errors::{BannerError, DomainResult};
use crate::domain::models::banner::normalize_tags;
use crate::domain::models::{Banner, BannerFilter, BannerKey, BannerPatch, NewBanner};
use crate::domain::ports::BannerRepository;

/// Banner columns plus the full tag set of each banner, reconstructed with a
/// correlated lookup against the association table.
const SELECT_BANNER: &str = r#"SELECT b.id, b.feature_id, b.content, b.is_active, b.created_at, b.updated_at,
       (SELECT group_concat(t.tag_id) FROM banner_feature_tags t WHERE t.banner_id = b.id) AS tag_ids
  FROM banner b"#;

#[derive(Clone)]
pub struct SqliteBannerRepository {
    pool: SqlitePool,
}

impl SqliteBannerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn apply_patch(uow: &mut BannerUnitOfWork, id: i64, patch: BannerPatch, now: &str) -> DomainResult<()> {
        let BannerPatch {
            feature_id,
            tag_ids,
            content,
            is_active,
        } = patch.normalized();

        let Some(feature_after) = uow.update_banner_columns(id, feature_id, content, is_active, now).await? else {
            return Err(BannerError::NotFound(format!("banner {id}")));
        };

        match (feature_id, tag_ids) {
            (_, Some(tag_ids)) => {
                uow.delete_associations(id).await?;
                uow.insert_associations(id, feature_after, &tag_ids).await?;
            }
            (Some(feature_id), None) => {
                uow.retarget_associations(id, feature_id).await?;
            }
            (None, None) => {}
        }

        Ok(())
    }

    async fn remove(uow: &mut BannerUnitOfWork, id: i64) -> DomainResult<()> {
        let associations = uow.delete_associations(id).await?;
        if uow.delete_banner_row(id).await? == 0 {
            return Err(BannerError::NotFound(format!("banner {id}")));
        }
        debug!(banner_id = id, associations, "Deleted banner rows");
        Ok(())
    }
}

#[async_trait]
impl BannerRepository for SqliteBannerRepository {
    async fn get_banner(&self, key: BannerKey, is_active: Option<bool>) -> DomainResult<Banner> {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(SELECT_BANNER);
        builder
            .push(" JOIN banner_feature_tags bft ON bft.banner_id = b.id WHERE bft.feature_id = ")
            .push_bind(key.feature_id)
            .push(" AND bft.tag_id = ")
            .push_bind(key.tag_id);
        if let Some(is_active) = is_active {
            builder.push(" AND b.is_active = ").push_bind(is_active);
        }

        let row: Option<BannerRow> = builder
            .build_query_as::<BannerRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BannerError::from_store("get_banner", key, e))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(BannerError::NotFound(key.to_string())),
        }
    }

    async fn list_banners(&self, filter: BannerFilter) -> DomainResult<Vec<Banner>> {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(SELECT_BANNER);
        builder.push(" WHERE 1=1");
        if let Some(feature_id) = filter.feature_id {
            builder.push(" AND b.feature_id = ").push_bind(feature_id);
        }
        if let Some(tag_id) = filter.tag_id {
            builder
                .push(" AND EXISTS (SELECT 1 FROM banner_feature_tags f WHERE f.banner_id = b.id AND f.tag_id = ")
                .push_bind(tag_id)
                .push(")");
        }
        builder.push(" ORDER BY b.id LIMIT ");
        builder.push_bind(filter.limit.map_or(-1, i64::from));
        if let Some(offset) = filter.offset {
            builder.push(" OFFSET ").push_bind(i64::from(offset));
        }

        let rows: Vec<BannerRow> = builder
            .build_query_as::<BannerRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BannerError::from_store("list_banners", format_args!("{filter:?}"), e))?;

        rows.into_iter().map(Banner::try_from).collect()
    }

    async fn create_banner(&self, banner: NewBanner) -> DomainResult<Banner> {
        let banner = NewBanner {
            tag_ids: normalize_tags(banner.tag_ids),
            ..banner
        };
        let now = Utc::now();
        let stamp = now.to_rfc3339();

        let mut uow = BannerUnitOfWork::begin(&self.pool).await?;
        let result = async {
            let id = uow.insert_banner(&banner, &stamp).await?;
            uow.insert_associations(id, banner.feature_id, &banner.tag_ids).await?;
            Ok::<_, BannerError>(id)
        }
        .await;
        let id = uow.finish(result).await?;

        debug!(banner_id = id, feature_id = banner.feature_id, tags = ?banner.tag_ids, "Created banner");

        Ok(Banner {
            id,
            feature_id: banner.feature_id,
            tag_ids: banner.tag_ids,
            content: banner.content,
            is_active: banner.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_banner(&self, id: i64, patch: BannerPatch) -> DomainResult<()> {
        let stamp = Utc::now().to_rfc3339();
        let mut uow = BannerUnitOfWork::begin(&self.pool).await?;
        let result = Self::apply_patch(&mut uow, id, patch, &stamp).await;
        uow.finish(result).await
    }

    async fn delete_banner(&self, id: i64) -> DomainResult<()> {
        let mut uow = BannerUnitOfWork::begin(&self.pool).await?;
        let result = Self::remove(&mut uow, id).await;
        uow.finish(result).await
    }
}

#[derive(sqlx::FromRow)]
struct BannerRow {
    id: i64,
    feature_id: i64,
    content: String,
    is_active: i64,
    created_at: String,
    updated_at: String,
    tag_ids: Option<String>,
}

impl TryFrom<BannerRow> for Banner {
    type Error = BannerError;

    fn try_from(row: BannerRow) -> Result<Self, Self::Error> {
        let mut tag_ids = row
            .tag_ids
            .as_deref()
            .map(parse_tag_list)
            .transpose()?
            .unwrap_or_default();
        tag_ids.sort_unstable();

        Ok(Self {
            id: row.id,
            feature_id: row.feature_id,
            tag_ids,
            content: row.content,
            is_active: row.is_active != 0,
            created_at: super::parse_datetime(&row.created_at)?,
            updated_at: super::parse_datetime(&row.updated_at)?,
        })
    }
}

fn parse_tag_list(raw: &str) -> DomainResult<Vec<i64>> {
    raw.split(',')
        .map(|tag| {
            tag.trim()
                .parse::<i64>()
                .map_err(|e| BannerError::internal("decode_banner_row", format!("malformed tag id {tag:?}: {e}")))
        })
        .collect()
}
