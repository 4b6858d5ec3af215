//! Content cache adapters.
//!
//! Two backends behind the [`ContentCache`] port:
//! - [`MokaContentCache`] - in-process TTL cache
//! - [`RedisContentCache`] - shared Redis instance

pub mod key;
pub mod moka_cache;
pub mod redis_cache;

pub use key::cache_key;
pub use moka_cache::MokaContentCache;
pub use redis_cache::RedisContentCache;

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{CacheBackend, CacheConfig};
use crate::domain::ports::ContentCache;

/// Build the configured cache backend.
pub async fn build_content_cache(config: &CacheConfig) -> DomainResult<Arc<dyn ContentCache>> {
    let cache: Arc<dyn ContentCache> = match config.backend {
        CacheBackend::Memory => Arc::new(MokaContentCache::with_capacity(config.expiration(), config.max_capacity)),
        CacheBackend::Redis => Arc::new(RedisContentCache::connect(&config.redis_url, config.expiration()).await?),
    };
    Ok(cache)
}
