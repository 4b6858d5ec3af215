//! CLI command implementations.

pub mod banner;
pub mod cache;
pub mod fetch;
