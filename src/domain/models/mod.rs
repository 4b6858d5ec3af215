//! Domain models for the banner store.

pub mod banner;
pub mod config;
pub mod visibility;

pub use banner::{Banner, BannerFilter, BannerKey, BannerPatch, NewBanner};
pub use config::{CacheBackend, CacheConfig, Config, DatabaseConfig, LoggingConfig, RequestConfig};
pub use visibility::{Role, Visibility};
