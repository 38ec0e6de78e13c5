//! Gravatar avatar provider.

use std::time::Duration;

use async_trait::async_trait;
use md5::{Digest, Md5};
use serde::Deserialize;
use tracing::{instrument, warn};

use memberlink_core::Result;
use memberlink_core::traits::AvatarProvider;
use memberlink_core::types::ApiUrl;

const GRAVATAR_BASE: &str = "https://www.gravatar.com/";

/// Gravatar profile response.
#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url: Option<String>,
}

/// Avatar provider backed by the Gravatar profile API.
///
/// Shares the email-hash addressing scheme with the rest of the Gravatar
/// ecosystem: MD5 of the trimmed, lowercased address, hex-encoded, as a
/// path segment.
#[derive(Debug, Clone)]
pub struct Gravatar {
    client: reqwest::Client,
    base: ApiUrl,
}

impl Gravatar {
    /// Create a provider against the public Gravatar service.
    pub fn new() -> Self {
        let base = ApiUrl::new(GRAVATAR_BASE).expect("gravatar base URL is valid");
        Self::with_base(base)
    }

    /// Create a provider against an alternative base URL (for tests).
    pub fn with_base(base: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("memberlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// The hex-encoded MD5 hash Gravatar addresses a profile by.
    pub fn email_hash(email: &str) -> String {
        let normalized = email.trim().to_lowercase();
        hex::encode(Md5::digest(normalized.as_bytes()))
    }
}

impl Default for Gravatar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvatarProvider for Gravatar {
    #[instrument(skip(self))]
    async fn avatar_url(&self, email: &str, timeout: Duration) -> Result<Option<String>> {
        let hash = Self::email_hash(email);
        let url = self.base.endpoint(&format!("{}.json", hash));

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en")
            .timeout(timeout)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "gravatar request failed");
                return Ok(None);
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // Non-existent Gravatars are common, hence not logged.
            return Ok(None);
        }

        if !status.is_success() {
            warn!(status = %status, "gravatar request rejected");
            return Ok(None);
        }

        match response.json::<Profile>().await {
            Ok(profile) => Ok(profile.entry.into_iter().next().and_then(|e| e.thumbnail_url)),
            Err(e) => {
                warn!(error = %e, "gravatar response unreadable");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_trims_and_lowercases() {
        // Known vector from the Gravatar documentation.
        assert_eq!(
            Gravatar::email_hash(" MyEmailAddress@example.com "),
            "0bc83cb571cd1c50ba6f3e8a78ef1346"
        );
    }

    #[test]
    fn hash_is_hex_of_md5() {
        let hash = Gravatar::email_hash("a@x.com");
        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
