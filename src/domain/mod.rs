//! Domain layer for Banner Keeper
//!
//! This module contains core models, errors and the ports adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{BannerError, DomainResult, ErrorKind};
