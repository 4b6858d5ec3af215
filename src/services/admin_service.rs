//! Administrative banner operations.
//!
//! Reads here always hit the store; the content cache is never consulted or
//! modified. Writes are left to expire out of the cache on their own.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use super::with_deadline;
use crate::domain::errors::{DomainResult, ErrorKind};
use crate::domain::models::{Banner, BannerFilter, BannerKey, BannerPatch, NewBanner};
use crate::domain::ports::BannerRepository;

pub struct BannerAdminService {
    repository: Arc<dyn BannerRepository>,
    request_timeout: Option<Duration>,
}

impl BannerAdminService {
    pub fn new(repository: Arc<dyn BannerRepository>) -> Self {
        Self {
            repository,
            request_timeout: None,
        }
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Look up the banner claiming `key`, optionally constrained by active state.
    pub async fn get_banner(&self, key: BannerKey, is_active: Option<bool>) -> DomainResult<Banner> {
        with_deadline("get_banner", self.request_timeout, self.repository.get_banner(key, is_active)).await
    }

    /// List banners with their tag sets.
    pub async fn list_banners(&self, filter: BannerFilter) -> DomainResult<Vec<Banner>> {
        with_deadline("list_banners", self.request_timeout, self.repository.list_banners(filter)).await
    }

    /// Create a banner claiming `(feature_id, tag)` for every tag in the set.
    #[instrument(skip(self, banner), fields(feature_id = banner.feature_id, tags = ?banner.tag_ids))]
    pub async fn create_banner(&self, banner: NewBanner) -> DomainResult<Banner> {
        let banner = NewBanner::new(banner.feature_id, banner.tag_ids, banner.content).with_active(banner.is_active);
        let result = with_deadline("create_banner", self.request_timeout, self.repository.create_banner(banner)).await;
        match &result {
            Ok(created) => info!(banner_id = created.id, "Banner created"),
            Err(err) => log_write_failure("create_banner", err),
        }
        result
    }

    /// Apply a sparse patch to banner `id`.
    #[instrument(skip(self, patch), fields(banner_id = id))]
    pub async fn update_banner(&self, id: i64, patch: BannerPatch) -> DomainResult<()> {
        let patch = patch.normalized();
        let result = with_deadline("update_banner", self.request_timeout, self.repository.update_banner(id, patch)).await;
        match &result {
            Ok(()) => info!("Banner updated"),
            Err(err) => log_write_failure("update_banner", err),
        }
        result
    }

    /// Delete banner `id` together with its associations.
    #[instrument(skip(self), fields(banner_id = id))]
    pub async fn delete_banner(&self, id: i64) -> DomainResult<()> {
        let result = with_deadline("delete_banner", self.request_timeout, self.repository.delete_banner(id)).await;
        match &result {
            Ok(()) => info!("Banner deleted"),
            Err(err) => log_write_failure("delete_banner", err),
        }
        result
    }
}

fn log_write_failure(operation: &'static str, err: &crate::domain::errors::BannerError) {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::Conflict => info!(operation, kind = %err.kind(), error = %err, "Banner write rejected"),
        ErrorKind::Internal => warn!(operation, error = %err, "Banner write failed"),
    }
}
