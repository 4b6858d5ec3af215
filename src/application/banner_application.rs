//! Process-wide wiring of the store, the content cache and both services.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::adapters::cache::build_content_cache;
use crate::adapters::sqlite::{initialize_database, PoolConfig, SqliteBannerRepository};
use crate::domain::models::Config;
use crate::domain::ports::{BannerRepository, ContentCache};
use crate::services::{BannerAdminService, BannerRetrievalService};

/// Shared resources for one process.
///
/// Services hold their own `Arc`s to the repository and cache, so clones of
/// either service stay valid until [`BannerApplication::shutdown`] runs.
pub struct BannerApplication {
    pool: SqlitePool,
    cache: Arc<dyn ContentCache>,
    retrieval: Arc<BannerRetrievalService>,
    admin: Arc<BannerAdminService>,
}

impl BannerApplication {
    /// Open the database, create the schema if missing, connect the cache and build the services.
    pub async fn bootstrap(config: &Config) -> Result<Self> {
        let pool = initialize_database(&config.database.url, Some(PoolConfig::from(&config.database)))
            .await
            .with_context(|| format!("Failed to initialize database at {}", config.database.url))?;

        let cache = build_content_cache(&config.cache)
            .await
            .context("Failed to build content cache")?;

        Ok(Self::from_parts(pool, cache, config))
    }

    /// Wire services over an initialized pool and a cache.
    pub fn from_parts(pool: SqlitePool, cache: Arc<dyn ContentCache>, config: &Config) -> Self {
        let repository: Arc<dyn BannerRepository> = Arc::new(SqliteBannerRepository::new(pool.clone()));
        let timeout = config.requests.timeout();

        let retrieval = Arc::new(
            BannerRetrievalService::new(repository.clone(), cache.clone()).with_request_timeout(timeout),
        );
        let admin = Arc::new(BannerAdminService::new(repository).with_request_timeout(timeout));

        info!(
            cache_backend = ?config.cache.backend,
            cache_expiration_secs = config.cache.expiration_secs,
            request_timeout_ms = config.requests.timeout_ms,
            "Banner application ready"
        );

        Self {
            pool,
            cache,
            retrieval,
            admin,
        }
    }

    pub fn retrieval(&self) -> Arc<BannerRetrievalService> {
        Arc::clone(&self.retrieval)
    }

    pub fn admin(&self) -> Arc<BannerAdminService> {
        Arc::clone(&self.admin)
    }

    pub fn cache(&self) -> Arc<dyn ContentCache> {
        Arc::clone(&self.cache)
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Release the cache connection and close the pool.
    pub async fn shutdown(self) {
        self.cache.shutdown().await;
        self.pool.close().await;
        info!("Banner application shut down");
    }
}
