//! View command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use memberlink_core::traits::{Forum, UserDirectory};
use memberlink_core::user::ViewQuery;
use memberlink_crm::CrmDirectory;

use crate::output;

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Directory-assigned id
    #[arg(long)]
    pub id: Option<String>,

    /// External (forum-side) user id
    #[arg(long)]
    pub user_id: Option<String>,

    /// E-mail address
    #[arg(long)]
    pub email: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run<F: Forum>(directory: &CrmDirectory<F>, args: ViewArgs) -> Result<()> {
    let query = ViewQuery {
        id: args.id,
        user_id: args.user_id,
        email: args.email,
    };

    let users = directory
        .view(&query)
        .await
        .context("Failed to view users")?;

    if users.is_empty() {
        eprintln!("{}", "No users found.".dimmed());
        return Ok(());
    }

    for user in &users {
        if args.pretty {
            output::json_pretty(user)?;
        } else {
            output::json(user)?;
        }
    }

    Ok(())
}
