//! Redis-backed content cache shared between processes.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::key::cache_key;
use crate::domain::errors::{BannerError, DomainResult};
use crate::domain::models::BannerKey;
use crate::domain::ports::ContentCache;

pub struct RedisContentCache {
    connection: RwLock<Option<ConnectionManager>>,
    expiration: Duration,
}

impl RedisContentCache {
    /// Connect to `redis_url`; every `set` expires after `expiration`.
    pub async fn connect(redis_url: &str, expiration: Duration) -> DomainResult<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| BannerError::internal("cache_connect", format!("invalid redis url: {e}")))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| BannerError::internal("cache_connect", e.to_string()))?;

        info!(expiration_secs = expiration.as_secs(), "Connected to redis content cache");
        Ok(Self {
            connection: RwLock::new(Some(manager)),
            expiration,
        })
    }

    async fn connection(&self, operation: &'static str) -> DomainResult<ConnectionManager> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or_else(|| BannerError::internal(operation, "content cache is shut down"))
    }

    fn expiration_millis(&self) -> u64 {
        u64::try_from(self.expiration.as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl ContentCache for RedisContentCache {
    async fn get(&self, key: BannerKey) -> DomainResult<Option<String>> {
        let mut conn = self.connection("cache_get").await?;
        let redis_key = cache_key(key);
        redis::cmd("GET")
            .arg(&redis_key)
            .query_async::<Option<String>>(&mut conn)
            .await
            .map_err(|e| BannerError::internal("cache_get", format!("{redis_key}: {e}")))
    }

    async fn set(&self, key: BannerKey, content: &str) -> DomainResult<()> {
        let mut conn = self.connection("cache_set").await?;
        let redis_key = cache_key(key);
        redis::cmd("SET")
            .arg(&redis_key)
            .arg(content)
            .arg("PX")
            .arg(self.expiration_millis())
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| BannerError::internal("cache_set", format!("{redis_key}: {e}")))
    }

    async fn clear(&self) -> DomainResult<()> {
        let mut conn = self.connection("cache_clear").await?;
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| BannerError::internal("cache_clear", e.to_string()))
    }

    async fn ping(&self) -> DomainResult<()> {
        let mut conn = self.connection("cache_ping").await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| BannerError::internal("cache_ping", e.to_string()))
    }

    fn is_shared(&self) -> bool {
        true
    }

    async fn shutdown(&self) {
        if self.connection.write().await.take().is_some() {
            debug!("Redis content cache closed");
        }
    }
}
