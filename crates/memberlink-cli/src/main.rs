//! memberlink - CLI tool for forum-to-CRM profile link synchronization.
//!
//! This is a thin wrapper over the memberlink libraries, intended for
//! manual synchronization runs and directory inspection.

mod cli;
mod commands;
mod config;
mod output;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use memberlink_crm::CrmDirectory;
use memberlink_forum::ForumClient;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Sync(args) => {
            let directory = build_directory(cli.config.as_deref())?;
            commands::sync::run(&directory, args).await
        }
        Commands::View(args) => {
            let directory = build_directory(cli.config.as_deref())?;
            commands::view::run(&directory, args).await
        }
        Commands::Scan(args) => {
            let directory = build_directory(cli.config.as_deref())?;
            commands::scan::run(&directory, args).await
        }
        Commands::Avatar(args) => commands::avatar::run(args).await,
    }
}

fn build_directory(config_path: Option<&Path>) -> Result<CrmDirectory<ForumClient>> {
    let config = config::load(config_path)?;
    let forum = ForumClient::new(config.forum.base_uri.clone());
    Ok(CrmDirectory::new(config.crm, forum))
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
