//! Forum collaborator trait.

use async_trait::async_trait;

use crate::Result;

/// A forum user, as much of it as profile sync needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumUser {
    /// Public profile slug, used as the last path segment of the
    /// canonical profile URL.
    pub slug: String,
}

/// The forum the directory records link back to.
#[async_trait]
pub trait Forum: Send + Sync {
    /// Look up a forum user by email. Absent is a normal outcome.
    async fn user_by_email(&self, email: &str) -> Result<Option<ForumUser>>;

    /// Build the canonical profile URL for a profile slug.
    fn profile_url(&self, slug: &str) -> String;
}
