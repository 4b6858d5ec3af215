//! Service layer: the retrieval orchestrator and the admin-facing write path.

pub mod admin_service;
pub mod retrieval_service;

pub use admin_service::BannerAdminService;
pub use retrieval_service::BannerRetrievalService;

use std::future::Future;
use std::time::Duration;

use crate::domain::errors::{BannerError, DomainResult};

/// Run `operation` under an optional deadline.
///
/// On expiry the in-flight future is dropped, which aborts the pending store or
/// cache call; an open transaction is rolled back when its handle drops.
pub(crate) async fn with_deadline<T, F>(name: &'static str, timeout: Option<Duration>, operation: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| BannerError::internal(name, format!("timed out after {}ms", limit.as_millis())))?,
        None => operation.await,
    }
}
