//! Banner repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Banner, BannerFilter, BannerKey, BannerPatch, NewBanner};

/// Repository interface for banners and their feature/tag associations.
///
/// Implementations own the uniqueness of `(feature_id, tag_id)` pairs and run
/// every write as a single transaction.
#[async_trait]
pub trait BannerRepository: Send + Sync {
    /// Look up the banner claiming `key`, optionally constrained by active state.
    async fn get_banner(&self, key: BannerKey, is_active: Option<bool>) -> DomainResult<Banner>;

    /// List banners with their full tag sets.
    async fn list_banners(&self, filter: BannerFilter) -> DomainResult<Vec<Banner>>;

    /// Insert a banner and one association per tag.
    async fn create_banner(&self, banner: NewBanner) -> DomainResult<Banner>;

    /// Apply a sparse patch to an existing banner.
    async fn update_banner(&self, id: i64, patch: BannerPatch) -> DomainResult<()>;

    /// Remove a banner and all of its associations.
    async fn delete_banner(&self, id: i64) -> DomainResult<()>;
}
