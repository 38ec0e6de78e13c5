//! CRM client configuration.

use serde::Deserialize;

use memberlink_core::types::ApiUrl;

/// Configuration for the CRM directory client.
///
/// Deserializable from a config file; every option except the access
/// token has the remote's conventional default.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL for all CRM calls.
    #[serde(default = "default_api_uri")]
    pub api_uri: ApiUrl,

    /// Bearer credential for all CRM calls.
    pub access_token: String,

    /// Attribute key used to store the canonical profile URL.
    #[serde(default = "default_profile_url_property_name")]
    pub profile_url_property_name: String,

    /// TTL of the full-directory cache, in minutes.
    #[serde(default = "default_caching_timeout_minutes")]
    pub caching_timeout_minutes: u64,

    /// Page size requested from the listing endpoint.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum concurrent page fetches per burst.
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,

    /// Pause between bursts, in seconds.
    #[serde(default = "default_burst_delay_seconds")]
    pub burst_delay_seconds: u64,
}

impl Config {
    /// Create a configuration with the given credentials and every other
    /// option at its default.
    pub fn new(api_uri: ApiUrl, access_token: impl Into<String>) -> Self {
        Self {
            api_uri,
            access_token: access_token.into(),
            profile_url_property_name: default_profile_url_property_name(),
            caching_timeout_minutes: default_caching_timeout_minutes(),
            page_size: default_page_size(),
            burst_size: default_burst_size(),
            burst_delay_seconds: default_burst_delay_seconds(),
        }
    }
}

fn default_api_uri() -> ApiUrl {
    ApiUrl::new("https://api.intercom.io/").expect("default API URL is valid")
}

fn default_profile_url_property_name() -> String {
    "forums_member".to_string()
}

fn default_caching_timeout_minutes() -> u64 {
    30
}

fn default_page_size() -> u32 {
    50
}

fn default_burst_size() -> u32 {
    50
}

fn default_burst_delay_seconds() -> u64 {
    10
}
