//! Content cache port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::BannerKey;

/// Key-value projection of active banner content keyed by `(feature, tag)`.
///
/// Never authoritative: entries expire after a fixed, process-wide duration and
/// may be flushed at any time without affecting the store.
#[async_trait]
pub trait ContentCache: Send + Sync {
    /// Cached content for `key`, or `None` on a miss.
    async fn get(&self, key: BannerKey) -> DomainResult<Option<String>>;

    /// Store content for `key` with the configured expiration.
    async fn set(&self, key: BannerKey, content: &str) -> DomainResult<()>;

    /// Drop every entry.
    async fn clear(&self) -> DomainResult<()>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> DomainResult<()>;

    /// Whether entries are visible to other processes.
    ///
    /// An in-process cache lives only as long as the process that built it.
    fn is_shared(&self) -> bool {
        false
    }

    /// Release the underlying client. Safe to call more than once.
    async fn shutdown(&self);
}
