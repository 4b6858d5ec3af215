//! Table output formatting for banner listings using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::cli::output::truncate;
use crate::domain::models::Banner;

const CONTENT_PREVIEW_LEN: usize = 48;

/// Format banners as a table
pub fn format_banner_table(banners: &[Banner]) -> String {
    let use_colors = supports_color();
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Tags").add_attribute(Attribute::Bold),
        Cell::new("Active").add_attribute(Attribute::Bold),
        Cell::new("Content").add_attribute(Attribute::Bold),
        Cell::new("Updated").add_attribute(Attribute::Bold),
    ]);

    for banner in banners {
        let tags = if banner.tag_ids.is_empty() {
            "-".to_string()
        } else {
            banner.tag_ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
        };

        let active = if banner.is_active { "yes" } else { "no" };
        let active_cell = if use_colors {
            Cell::new(active).fg(if banner.is_active { Color::Green } else { Color::DarkGrey })
        } else {
            Cell::new(active)
        };

        table.add_row(vec![
            Cell::new(banner.id),
            Cell::new(banner.feature_id),
            Cell::new(tags),
            active_cell,
            Cell::new(truncate(&banner.content, CONTENT_PREVIEW_LEN)),
            Cell::new(banner.updated_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]);
    }

    table.to_string()
}

/// Check if the terminal supports colors
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM"), Ok(term) if term == "dumb")
}
