//! `banner-keeper cache ...` commands.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::ports::ContentCache;

#[derive(Debug, Serialize)]
pub struct CacheOutput {
    pub success: bool,
    pub message: String,
}

impl CommandOutput for CacheOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

fn require_shared(cache: &dyn ContentCache) -> Result<()> {
    if !cache.is_shared() {
        bail!(
            "The memory cache backend only lives inside this process; \
             set cache.backend to redis to manage a shared cache"
        );
    }
    Ok(())
}

/// Handle cache flush command
pub async fn handle_flush(cache: Arc<dyn ContentCache>, json: bool) -> Result<()> {
    require_shared(cache.as_ref())?;
    cache.clear().await.context("Failed to flush content cache")?;

    output(
        &CacheOutput {
            success: true,
            message: "Content cache flushed.".to_string(),
        },
        json,
    );
    Ok(())
}

/// Handle cache ping command
pub async fn handle_ping(cache: Arc<dyn ContentCache>, json: bool) -> Result<()> {
    require_shared(cache.as_ref())?;
    cache.ping().await.context("Content cache is unreachable")?;

    output(
        &CacheOutput {
            success: true,
            message: "Content cache is reachable.".to_string(),
        },
        json,
    );
    Ok(())
}
