//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::models::Role;

#[derive(Parser)]
#[command(name = "banner-keeper")]
#[command(about = "Banner Keeper - feature/tag banner store with a content cache", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to .banner-keeper/config.yaml and local.yaml)
    #[arg(short, long, global = true, env = "BANNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Banner management commands
    #[command(subcommand)]
    Banner(BannerCommands),

    /// Fetch banner content the way an end user or admin would see it
    Fetch {
        /// Feature identifier
        #[arg(long)]
        feature_id: i64,

        /// Tag identifier
        #[arg(long)]
        tag_id: i64,

        /// Caller role
        #[arg(long, value_enum, default_value = "user")]
        role: RoleArg,

        /// Skip the content cache and read the latest stored revision
        #[arg(long)]
        use_last_revision: bool,
    },

    /// Content cache commands
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Subcommand)]
pub enum BannerCommands {
    /// Show the banner claiming a feature/tag pair
    Get {
        #[arg(long)]
        feature_id: i64,

        #[arg(long)]
        tag_id: i64,

        /// Only match banners in this active state
        #[arg(long)]
        active: Option<bool>,
    },

    /// List banners
    List {
        /// Filter by feature
        #[arg(long)]
        feature_id: Option<i64>,

        /// Filter by claimed tag
        #[arg(long)]
        tag_id: Option<i64>,

        /// Maximum number of banners to display
        #[arg(short, long)]
        limit: Option<u32>,

        /// Number of banners to skip
        #[arg(short, long)]
        offset: Option<u32>,
    },

    /// Create a banner
    Create {
        #[arg(long)]
        feature_id: i64,

        /// Tags claimed under the feature (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tag_ids: Vec<i64>,

        /// Banner content document
        #[arg(long)]
        content: String,

        /// Create the banner inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Update fields of a banner; omitted fields stay unchanged
    Update {
        /// Banner ID
        id: i64,

        #[arg(long)]
        feature_id: Option<i64>,

        /// Replacement tag set (comma-separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "clear_tags")]
        tag_ids: Option<Vec<i64>>,

        /// Drop every tag the banner claims
        #[arg(long)]
        clear_tags: bool,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a banner and its tag claims
    Delete {
        /// Banner ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Drop every cached banner content entry (redis backend only)
    Flush,

    /// Check the cache backend is reachable (redis backend only)
    Ping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Self::User,
            RoleArg::Admin => Self::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::parse_from([
            "banner-keeper",
            "fetch",
            "--feature-id",
            "4",
            "--tag-id",
            "7",
            "--role",
            "admin",
            "--use-last-revision",
        ]);

        match cli.command {
            Commands::Fetch {
                feature_id,
                tag_id,
                role,
                use_last_revision,
            } => {
                assert_eq!((feature_id, tag_id), (4, 7));
                assert_eq!(Role::from(role), Role::Admin);
                assert!(use_last_revision);
            }
            _ => panic!("expected fetch command"),
        }
    }

    #[test]
    fn test_parse_update_tag_list() {
        let cli = Cli::parse_from(["banner-keeper", "--json", "banner", "update", "3", "--tag-ids", "1,2,2"]);
        assert!(cli.json);

        match cli.command {
            Commands::Banner(BannerCommands::Update { id, tag_ids, clear_tags, .. }) => {
                assert_eq!(id, 3);
                assert_eq!(tag_ids, Some(vec![1, 2, 2]));
                assert!(!clear_tags);
            }
            _ => panic!("expected banner update command"),
        }
    }

    #[test]
    fn test_clear_tags_conflicts_with_tag_ids() {
        let result = Cli::try_parse_from([
            "banner-keeper",
            "banner",
            "update",
            "3",
            "--tag-ids",
            "1",
            "--clear-tags",
        ]);
        assert!(result.is_err());
    }
}
