//! Scan command implementation.

use anyhow::{Context, Result};
use clap::Args;

use memberlink_core::traits::{Forum, UserDirectory};
use memberlink_crm::CrmDirectory;

use crate::output;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Print every record as JSON instead of just the count
    #[arg(long)]
    pub full: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run<F: Forum>(directory: &CrmDirectory<F>, args: ScanArgs) -> Result<()> {
    let users = directory
        .all_users()
        .await
        .context("Failed to scan the directory")?;

    if args.full {
        for user in users.iter() {
            if args.pretty {
                output::json_pretty(user)?;
            } else {
                output::json(user)?;
            }
        }
    }

    output::field("Total users", &users.len().to_string());
    Ok(())
}
