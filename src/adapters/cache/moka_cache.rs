//! In-process content cache backed by moka.
//!
//! Every entry lives for the configured expiration and is then dropped; nothing
//! refreshes an entry's lifetime except a new `set`.

use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

use super::key::cache_key;
use crate::domain::errors::{BannerError, DomainResult};
use crate::domain::models::BannerKey;
use crate::domain::ports::ContentCache;

/// Maximum number of cached content entries.
const DEFAULT_MAX_CAPACITY: u64 = 10_000;

pub struct MokaContentCache {
    entries: Cache<String, String>,
    closed: AtomicBool,
}

impl MokaContentCache {
    /// Create a cache whose entries expire after `expiration`.
    pub fn new(expiration: Duration) -> Self {
        Self::with_capacity(expiration, DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(expiration: Duration, max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(expiration)
            .build();

        Self {
            entries,
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self, operation: &'static str) -> DomainResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BannerError::internal(operation, "content cache is shut down"));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentCache for MokaContentCache {
    async fn get(&self, key: BannerKey) -> DomainResult<Option<String>> {
        self.ensure_open("cache_get")?;
        Ok(self.entries.get(&cache_key(key)).await)
    }

    async fn set(&self, key: BannerKey, content: &str) -> DomainResult<()> {
        self.ensure_open("cache_set")?;
        self.entries.insert(cache_key(key), content.to_string()).await;
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.ensure_open("cache_clear")?;
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        Ok(())
    }

    async fn ping(&self) -> DomainResult<()> {
        self.ensure_open("cache_ping")
    }

    async fn shutdown(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.entries.invalidate_all();
            debug!("Content cache closed");
        }
    }
}
