//! acct - account and profile CLI
//!
//! # Examples
//!
//! ```bash
//! # Walk through anonymous sign-in and provider linking
//! acct demo --pretty
//!
//! # Inspect and edit a stored profile
//! acct profile show <user-id>
//! acct profile add-preference <user-id> dark-mode
//!
//! # Load the catalog feed
//! acct product import products.json
//! ```

mod cli;
mod commands;
mod product_commands;
mod profile_commands;

use crate::{
    cli::Cli, commands::Commands, product_commands::ProductCommands,
    profile_commands::ProfileCommands,
};

use acct_app::{AppError, Result as AppErrorResult, logger, run_demo};
use acct_config::Config;
use acct_core::{FavoriteItem, ProductArray};
use acct_db::{ProductRepository, ProfileStore, open_pool};

use std::process::ExitCode;

use clap::Parser;
use log::info;
use serde_json::{Value, json};
use sqlx::SqlitePool;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match startup().await {
        Ok((config, pool)) => run(cli.command, &config, pool).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error [{}]: {}", e.error_code(), e);
            ExitCode::FAILURE
        }
    }
}

async fn startup() -> AppErrorResult<(Config, SqlitePool)> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting acct v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let pool = open_pool(&config.database_path()?).await?;
    Ok((config, pool))
}

async fn run(command: Commands, config: &Config, pool: SqlitePool) -> AppErrorResult<Value> {
    match command {
        Commands::Demo => Ok(serde_json::to_value(run_demo(pool, &config.auth).await?)?),

        Commands::Profile { action } => {
            let store = ProfileStore::new(pool);
            match action {
                ProfileCommands::Show { user_id } => {
                    Ok(serde_json::to_value(store.get_profile(&user_id).await?)?)
                }
                ProfileCommands::SetPremium {
                    user_id,
                    is_premium,
                } => {
                    store.set_premium(&user_id, is_premium).await?;
                    Ok(serde_json::to_value(store.get_profile(&user_id).await?)?)
                }
                ProfileCommands::AddPreference { user_id, value } => {
                    store.add_preference(&user_id, &value).await?;
                    Ok(serde_json::to_value(store.get_profile(&user_id).await?)?)
                }
                ProfileCommands::RemovePreference { user_id, value } => {
                    store.remove_preference(&user_id, &value).await?;
                    Ok(serde_json::to_value(store.get_profile(&user_id).await?)?)
                }
                ProfileCommands::SetFavorite {
                    user_id,
                    id,
                    title,
                    popular,
                } => {
                    let item = FavoriteItem::new(id, title, popular);
                    store.set_favorite_item(&user_id, &item).await?;
                    Ok(serde_json::to_value(store.get_profile(&user_id).await?)?)
                }
                ProfileCommands::ClearFavorite { user_id } => {
                    store.clear_favorite_item(&user_id).await?;
                    Ok(serde_json::to_value(store.get_profile(&user_id).await?)?)
                }
                ProfileCommands::Delete { user_id } => {
                    store.delete_profile(&user_id).await?;
                    Ok(json!({ "deleted": user_id }))
                }
            }
        }

        Commands::Product { action } => {
            let repo = ProductRepository::new(pool);
            match action {
                ProductCommands::Import { file } => {
                    let raw = tokio::fs::read_to_string(&file)
                        .await
                        .map_err(|e| AppError::io(file.display().to_string(), e))?;
                    let feed: ProductArray = serde_json::from_str(&raw)?;
                    let imported = repo.import(&feed).await?;
                    Ok(json!({ "imported": imported }))
                }
                ProductCommands::List => Ok(serde_json::to_value(repo.find_all().await?)?),
                ProductCommands::Get { id } => Ok(serde_json::to_value(repo.get(id).await?)?),
            }
        }
    }
}
