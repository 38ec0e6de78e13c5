//! User directory trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::user::{DirectoryUser, ViewQuery};

/// A CRM user directory.
///
/// One concrete HTTP-backed implementation exists; the trait is the seam
/// that lets the CLI and tests run against a mock directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve users matching the query.
    ///
    /// Lookup priority when several fields are set: `id`, then `user_id`,
    /// then `email`; only one path executes. A unique email yields one
    /// record; an email shared by several records yields all of them.
    /// A record that does not exist yields an empty Vec, not an error.
    async fn view(&self, query: &ViewQuery) -> Result<Vec<DirectoryUser>>;

    /// The full, flattened user set of the directory.
    ///
    /// Served from a short-lived cache; a miss triggers a paginated scan
    /// of the whole listing. The snapshot is shared, not copied per call.
    async fn all_users(&self) -> Result<Arc<Vec<DirectoryUser>>>;

    /// Create or update a user record.
    ///
    /// A record without `id` creates (or matches by email / `user_id`)
    /// on the remote side; a record with `id` updates.
    async fn create_or_update(&self, user: &DirectoryUser) -> Result<DirectoryUser>;

    /// Reconcile the canonical forum profile URL into every directory
    /// record matching the email.
    ///
    /// Returns exactly the records that were written. An empty Vec means
    /// everything already matched: an idempotent no-op, not an error.
    async fn sync_profile_url(&self, email: &str) -> Result<Vec<DirectoryUser>>;
}
