//! Config file loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use memberlink_core::types::ApiUrl;

/// The on-disk configuration file.
///
/// ```json
/// {
///   "crm": { "access_token": "...", "page_size": 50 },
///   "forum": { "base_uri": "https://forum.example.com/" }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// CRM client options.
    pub crm: memberlink_crm::Config,
    /// Forum collaborator options.
    pub forum: ForumSection,
}

#[derive(Debug, Deserialize)]
pub struct ForumSection {
    /// Forum base URL used to build canonical profile URLs.
    pub base_uri: ApiUrl,
}

/// Load the configuration from an explicit path or the platform default.
pub fn load(path: Option<&Path>) -> Result<FileConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_path()?,
    };

    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

fn default_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "memberlink").context("Could not determine config directory")?;

    Ok(dirs.config_dir().join("config.json"))
}
