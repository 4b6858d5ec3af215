//! Banner Keeper CLI entry point.

use anyhow::Result;
use clap::Parser;

use banner_keeper::application::BannerApplication;
use banner_keeper::cli::commands::{banner, cache, fetch};
use banner_keeper::cli::{handle_error, BannerCommands, CacheCommands, Cli, Commands};
use banner_keeper::domain::models::{BannerFilter, BannerKey, BannerPatch, NewBanner};
use banner_keeper::infrastructure::config::ConfigLoader;
use banner_keeper::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    let app = BannerApplication::bootstrap(&config).await?;
    let result = dispatch(&app, cli.command, cli.json).await;
    app.shutdown().await;
    result
}

async fn dispatch(app: &BannerApplication, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Fetch {
            feature_id,
            tag_id,
            role,
            use_last_revision,
        } => {
            fetch::execute(
                &app.retrieval(),
                BannerKey::new(feature_id, tag_id),
                role.into(),
                use_last_revision,
                json,
            )
            .await
        }
        Commands::Banner(command) => dispatch_banner(app, command, json).await,
        Commands::Cache(CacheCommands::Flush) => cache::handle_flush(app.cache(), json).await,
        Commands::Cache(CacheCommands::Ping) => cache::handle_ping(app.cache(), json).await,
    }
}

async fn dispatch_banner(app: &BannerApplication, command: BannerCommands, json: bool) -> Result<()> {
    let service = app.admin();
    match command {
        BannerCommands::Get {
            feature_id,
            tag_id,
            active,
        } => banner::handle_get(&service, BannerKey::new(feature_id, tag_id), active, json).await,
        BannerCommands::List {
            feature_id,
            tag_id,
            limit,
            offset,
        } => {
            let filter = BannerFilter {
                feature_id,
                tag_id,
                limit,
                offset,
            };
            banner::handle_list(&service, filter, json).await
        }
        BannerCommands::Create {
            feature_id,
            tag_ids,
            content,
            inactive,
        } => {
            let new_banner = NewBanner::new(feature_id, tag_ids, content).with_active(!inactive);
            banner::handle_create(&service, new_banner, json).await
        }
        BannerCommands::Update {
            id,
            feature_id,
            tag_ids,
            clear_tags,
            content,
            active,
        } => {
            let patch = BannerPatch {
                feature_id,
                tag_ids: if clear_tags { Some(Vec::new()) } else { tag_ids },
                content,
                is_active: active,
            };
            banner::handle_update(&service, id, patch, json).await
        }
        BannerCommands::Delete { id } => banner::handle_delete(&service, id, json).await,
    }
}
