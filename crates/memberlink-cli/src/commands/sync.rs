//! Sync command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use memberlink_core::traits::{Forum, UserDirectory};
use memberlink_crm::CrmDirectory;

use crate::output;

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// E-mail address to reconcile
    #[arg(long)]
    pub email: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run<F: Forum>(directory: &CrmDirectory<F>, args: SyncArgs) -> Result<()> {
    let written = directory
        .sync_profile_url(&args.email)
        .await
        .context("Failed to sync profile URL")?;

    if written.is_empty() {
        eprintln!("{}", "Already in sync; nothing written.".dimmed());
        return Ok(());
    }

    for user in &written {
        if args.pretty {
            output::json_pretty(user)?;
        } else {
            output::json(user)?;
        }
    }

    output::success(&format!("Updated {} record(s)", written.len()));
    Ok(())
}
