//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - BannerRepository: relational store for banners and their feature/tag associations
//! - ContentCache: expiring key-value projection of active banner content

pub mod banner_repository;
pub mod content_cache;

pub use banner_repository::BannerRepository;
pub use content_cache::ContentCache;
