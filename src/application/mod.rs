//! Application layer: process bootstrap and shutdown.

pub mod banner_application;

pub use banner_application::BannerApplication;
