//! `banner-keeper fetch`: the end-user/admin read path.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{BannerKey, Role, Visibility};
use crate::services::BannerRetrievalService;

#[derive(Debug, Serialize)]
pub struct FetchOutput {
    pub feature_id: i64,
    pub tag_id: i64,
    pub role: Role,
    pub use_last_revision: bool,
    pub content: String,
}

impl CommandOutput for FetchOutput {
    fn to_human(&self) -> String {
        self.content.clone()
    }

    // The content document is emitted as is when it parses as JSON.
    fn to_json(&self) -> serde_json::Value {
        let content = serde_json::from_str(&self.content)
            .unwrap_or_else(|_| serde_json::Value::String(self.content.clone()));
        serde_json::json!({
            "feature_id": self.feature_id,
            "tag_id": self.tag_id,
            "role": self.role,
            "use_last_revision": self.use_last_revision,
            "content": content,
        })
    }
}

pub async fn execute(
    service: &BannerRetrievalService,
    key: BannerKey,
    role: Role,
    use_last_revision: bool,
    json: bool,
) -> Result<()> {
    let content = service
        .fetch_banner_content(key, Visibility::for_role(role), use_last_revision)
        .await
        .with_context(|| format!("Failed to fetch banner content for {key} as {}", role.as_str()))?;

    output(
        &FetchOutput {
            feature_id: key.feature_id,
            tag_id: key.tag_id,
            role,
            use_last_revision,
            content,
        },
        json,
    );
    Ok(())
}
