//! Cache-aside read path for banner content.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::with_deadline;
use crate::domain::errors::DomainResult;
use crate::domain::models::{BannerKey, Visibility};
use crate::domain::ports::{BannerRepository, ContentCache};

/// Decides per request whether to consult the content cache, how to fall back to
/// the store, and when to populate the cache afterwards.
pub struct BannerRetrievalService {
    repository: Arc<dyn BannerRepository>,
    cache: Arc<dyn ContentCache>,
    request_timeout: Option<Duration>,
}

impl BannerRetrievalService {
    pub fn new(repository: Arc<dyn BannerRepository>, cache: Arc<dyn ContentCache>) -> Self {
        Self {
            repository,
            cache,
            request_timeout: None,
        }
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Fetch the content of the banner claiming `key`.
    ///
    /// Only `ActiveOnly` reads without `bypass_cache` use the cache. A hit is
    /// returned as is until it expires; a miss reads the active banner from the
    /// store and writes its content back. Every other combination reads the
    /// store directly and never touches the cache.
    #[instrument(skip(self), fields(feature_id = key.feature_id, tag_id = key.tag_id))]
    pub async fn fetch_banner_content(
        &self,
        key: BannerKey,
        visibility: Visibility,
        bypass_cache: bool,
    ) -> DomainResult<String> {
        with_deadline(
            "fetch_banner_content",
            self.request_timeout,
            self.resolve_content(key, visibility, bypass_cache),
        )
        .await
    }

    async fn resolve_content(&self, key: BannerKey, visibility: Visibility, bypass_cache: bool) -> DomainResult<String> {
        if bypass_cache || !visibility.is_cache_eligible() {
            let banner = self.repository.get_banner(key, visibility.active_filter()).await?;
            return Ok(banner.content);
        }

        match self.cache.get(key).await {
            Ok(Some(content)) => {
                debug!("Content cache hit");
                return Ok(content);
            }
            Ok(None) => debug!("Content cache miss"),
            Err(err) => warn!(error = %err, "Content cache read failed, falling back to store"),
        }

        let banner = self.repository.get_banner(key, Some(true)).await?;
        self.cache.set(key, &banner.content).await?;
        Ok(banner.content)
    }
}
