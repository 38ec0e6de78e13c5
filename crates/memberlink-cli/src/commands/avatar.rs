//! Avatar command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use memberlink_core::traits::AvatarProvider;
use memberlink_forum::Gravatar;

#[derive(Args, Debug)]
pub struct AvatarArgs {
    /// E-mail address to look up
    #[arg(long)]
    pub email: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 5)]
    pub timeout_seconds: u64,
}

pub async fn run(args: AvatarArgs) -> Result<()> {
    let gravatar = Gravatar::new();
    let url = gravatar
        .avatar_url(&args.email, Duration::from_secs(args.timeout_seconds))
        .await
        .context("Failed to look up avatar")?;

    match url {
        Some(url) => println!("{}", url),
        None => eprintln!("{}", "No avatar found.".dimmed()),
    }

    Ok(())
}
