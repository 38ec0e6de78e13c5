//! Forum API client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use memberlink_core::Result;
use memberlink_core::error::{ApiError, Error};
use memberlink_core::traits::{Forum, ForumUser};
use memberlink_core::types::ApiUrl;

/// Forum user lookup response.
#[derive(Debug, Deserialize)]
struct UserResponse {
    profile: Option<ProfileSection>,
}

#[derive(Debug, Deserialize)]
struct ProfileSection {
    name: Option<String>,
}

/// HTTP client for the forum the directory records link back to.
///
/// Resolves a member's public profile slug by email and builds the
/// canonical profile URL from it.
#[derive(Debug, Clone)]
pub struct ForumClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl ForumClient {
    /// Create a new forum client for the given base URL.
    pub fn new(base: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("memberlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the forum base URL.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }
}

#[async_trait]
impl Forum for ForumClient {
    #[instrument(skip(self), fields(base = %self.base))]
    async fn user_by_email(&self, email: &str) -> Result<Option<ForumUser>> {
        let url = self.base.endpoint("api/users");
        debug!(email, "forum user lookup");

        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(crate::classify)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(Error::Api(ApiError::new(status.as_u16(), None, None)));
        }

        let body: UserResponse = response.json().await.map_err(crate::classify)?;
        let slug = body.profile.and_then(|p| p.name);

        Ok(slug.map(|slug| ForumUser { slug }))
    }

    fn profile_url(&self, slug: &str) -> String {
        self.base.endpoint(&format!("profile/{}/", slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_url_from_slug() {
        let base = ApiUrl::new("https://forum.example.com/").unwrap();
        let forum = ForumClient::new(base);
        assert_eq!(
            forum.profile_url("alice"),
            "https://forum.example.com/profile/alice/"
        );
    }
}
