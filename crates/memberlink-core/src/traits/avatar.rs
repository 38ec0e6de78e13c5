//! Avatar provider trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// A provider of avatar image URLs keyed by email address.
#[async_trait]
pub trait AvatarProvider: Send + Sync {
    /// Resolve the avatar URL for an email address, if one exists.
    ///
    /// `timeout` bounds the whole remote call; a missing avatar is a
    /// normal absent result.
    async fn avatar_url(&self, email: &str, timeout: Duration) -> Result<Option<String>>;
}
