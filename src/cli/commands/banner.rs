//! `banner-keeper banner ...` commands.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::table::format_banner_table;
use crate::domain::models::{Banner, BannerFilter, BannerKey, BannerPatch, NewBanner};
use crate::services::BannerAdminService;

#[derive(Debug, Serialize)]
pub struct BannerOutput {
    #[serde(flatten)]
    pub banner: Banner,
}

impl CommandOutput for BannerOutput {
    fn to_human(&self) -> String {
        let banner = &self.banner;
        let mut lines = vec![
            "Banner Details:".to_string(),
            format!("  ID: {}", banner.id),
            format!("  Feature: {}", banner.feature_id),
            format!("  Tags: {:?}", banner.tag_ids),
            format!("  Active: {}", banner.is_active),
            format!("  Created at: {}", banner.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
            format!("  Updated at: {}", banner.updated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        ];
        lines.push("\nContent:".to_string());
        lines.push(banner.content.clone());
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct BannerListOutput {
    pub banners: Vec<Banner>,
    pub total: usize,
}

impl CommandOutput for BannerListOutput {
    fn to_human(&self) -> String {
        if self.banners.is_empty() {
            return "No banners found.".to_string();
        }
        format!(
            "Banners:\n{}\n\nShowing {} banner(s)",
            format_banner_table(&self.banners),
            self.total
        )
    }
}

#[derive(Debug, Serialize)]
pub struct BannerMutationOutput {
    pub success: bool,
    pub banner_id: i64,
    pub message: String,
}

impl CommandOutput for BannerMutationOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}

/// Handle banner get command
pub async fn handle_get(
    service: &BannerAdminService,
    key: BannerKey,
    active: Option<bool>,
    json: bool,
) -> Result<()> {
    let banner = service
        .get_banner(key, active)
        .await
        .with_context(|| format!("Failed to retrieve banner for {key}"))?;

    output(&BannerOutput { banner }, json);
    Ok(())
}

/// Handle banner list command
pub async fn handle_list(service: &BannerAdminService, filter: BannerFilter, json: bool) -> Result<()> {
    let banners = service.list_banners(filter).await.context("Failed to list banners")?;

    let total = banners.len();
    output(&BannerListOutput { banners, total }, json);
    Ok(())
}

/// Handle banner create command
pub async fn handle_create(service: &BannerAdminService, banner: NewBanner, json: bool) -> Result<()> {
    let created = service.create_banner(banner).await.context("Failed to create banner")?;

    output(
        &BannerMutationOutput {
            success: true,
            banner_id: created.id,
            message: format!(
                "Banner created successfully!\n  Banner ID: {}\n  Feature: {}\n  Tags: {:?}",
                created.id, created.feature_id, created.tag_ids
            ),
        },
        json,
    );
    Ok(())
}

/// Handle banner update command
pub async fn handle_update(service: &BannerAdminService, id: i64, patch: BannerPatch, json: bool) -> Result<()> {
    if patch.is_empty() {
        anyhow::bail!("Nothing to update. Pass at least one of --feature-id, --tag-ids, --clear-tags, --content, --active");
    }

    service
        .update_banner(id, patch)
        .await
        .with_context(|| format!("Failed to update banner {id}"))?;

    output(
        &BannerMutationOutput {
            success: true,
            banner_id: id,
            message: format!("Banner {id} updated."),
        },
        json,
    );
    Ok(())
}

/// Handle banner delete command
pub async fn handle_delete(service: &BannerAdminService, id: i64, json: bool) -> Result<()> {
    service
        .delete_banner(id)
        .await
        .with_context(|| format!("Failed to delete banner {id}"))?;

    output(
        &BannerMutationOutput {
            success: true,
            banner_id: id,
            message: format!("Banner {id} deleted."),
        },
        json,
    );
    Ok(())
}
