//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{avatar::AvatarArgs, scan::ScanArgs, sync::SyncArgs, view::ViewArgs};

/// Forum-to-CRM profile link synchronization tool.
#[derive(Parser, Debug)]
#[command(name = "memberlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile the forum profile URL into the CRM records for an email
    Sync(SyncArgs),

    /// Look up CRM users by id, external user id, or email
    View(ViewArgs),

    /// Fetch the full directory and report its size
    Scan(ScanArgs),

    /// Look up the Gravatar avatar URL for an email
    Avatar(AvatarArgs),
}
