//! Banner Keeper - feature/tag addressed banner store
//!
//! Banners are content documents addressed by a `(feature, tag)` pair. Reads
//! for end users go through an expiring content cache; administrative reads and
//! explicit "latest revision" reads go straight to the store. Writes run as
//! single transactions that keep every `(feature, tag)` pair claimed by at most
//! one banner.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Adapters** (`adapters`): SQLite store and content cache backends
//! - **Service Layer** (`services`): retrieval orchestration and admin writes
//! - **Application Layer** (`application`): process bootstrap and shutdown
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use banner_keeper::{BannerApplication, BannerKey, ConfigLoader, Visibility};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let app = BannerApplication::bootstrap(&config).await?;
//!     let content = app
//!         .retrieval()
//!         .fetch_banner_content(BannerKey::new(1, 2), Visibility::ActiveOnly, false)
//!         .await?;
//!     println!("{content}");
//!     app.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::BannerApplication;
pub use domain::models::{
    Banner, BannerFilter, BannerKey, BannerPatch, CacheBackend, Config, NewBanner, Role, Visibility,
};
pub use domain::ports::{BannerRepository, ContentCache};
pub use domain::{BannerError, DomainResult, ErrorKind};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{BannerAdminService, BannerRetrievalService};
