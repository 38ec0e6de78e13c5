//! HTTP-backed CRM user directory.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use memberlink_core::Result;
use memberlink_core::error::{Error, InvalidInputError};
use memberlink_core::traits::{Forum, UserDirectory};
use memberlink_core::user::{DirectoryUser, ViewQuery};

use crate::cache::DirectoryCache;
use crate::client::CrmClient;
use crate::config::Config;
use crate::scan::DirectoryScan;

const USERS_ENDPOINT: &str = "users";

#[derive(Debug, Serialize)]
struct UserIdQuery<'a> {
    user_id: &'a str,
}

#[derive(Debug, Serialize)]
struct EmailQuery<'a> {
    email: &'a str,
}

/// The CRM contact directory, backed by the remote HTTP API.
///
/// Owns the transport client, the full-directory cache, and the forum
/// collaborator used to compute canonical profile URLs.
pub struct CrmDirectory<F> {
    client: CrmClient,
    config: Config,
    cache: DirectoryCache,
    forum: F,
}

impl<F: Forum> CrmDirectory<F> {
    /// Create a directory client from configuration and a forum collaborator.
    pub fn new(config: Config, forum: F) -> Self {
        let client = CrmClient::new(config.api_uri.clone(), config.access_token.clone());
        let cache = DirectoryCache::new(Duration::from_secs(config.caching_timeout_minutes * 60));

        Self {
            client,
            config,
            cache,
            forum,
        }
    }

    /// The attribute key the canonical profile URL is stored under.
    pub fn profile_url_property(&self) -> &str {
        &self.config.profile_url_property_name
    }

    /// Compute the canonical profile URL for an email via the forum.
    ///
    /// An absent forum user or a failed forum lookup both degrade to an
    /// absent URL with a warning; neither aborts the sync.
    async fn canonical_profile_url(&self, email: &str) -> Option<String> {
        match self.forum.user_by_email(email).await {
            Ok(Some(user)) => Some(self.forum.profile_url(&user.slug)),
            Ok(None) => {
                warn!(email, "no forum user for address; profile URL unavailable");
                None
            }
            Err(e) => {
                warn!(email, error = %e, "forum lookup failed; profile URL unavailable");
                None
            }
        }
    }

    /// Single-record remote lookup shared by the id and user_id paths.
    ///
    /// 404 is a normal empty result, never logged as an error. Any other
    /// failure of the single request is logged and yields an empty result;
    /// only burst scans propagate fetch failures.
    fn lookup_one(&self, result: Result<DirectoryUser>) -> Vec<DirectoryUser> {
        match result {
            Ok(user) => vec![user],
            Err(Error::Api(e)) if e.is_not_found() => Vec::new(),
            Err(e) => {
                warn!(error = %e, "lookup failed; treating as absent");
                Vec::new()
            }
        }
    }

    /// Email lookup with the ambiguity fallback.
    ///
    /// The listing endpoint answers a filter-by-email query with a single
    /// record, or rejects it when several records share the address. In
    /// the ambiguous case the full (cached) directory is filtered locally
    /// by exact, case-sensitive equality.
    async fn lookup_by_email(&self, email: &str) -> Result<Vec<DirectoryUser>> {
        let query = EmailQuery { email };
        match self
            .client
            .get_query::<_, DirectoryUser>(USERS_ENDPOINT, &query)
            .await
        {
            Ok(user) => Ok(vec![user]),
            Err(Error::Api(e)) if e.is_not_found() => Ok(Vec::new()),
            Err(Error::Api(e)) if e.is_ambiguous_match() => {
                debug!(email, "ambiguous email filter; falling back to full directory");
                let all = self.all_users().await?;
                Ok(all.iter().filter(|u| u.email == email).cloned().collect())
            }
            Err(e) => {
                warn!(email, error = %e, "lookup failed; treating as absent");
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl<F: Forum> UserDirectory for CrmDirectory<F> {
    #[instrument(skip(self, query))]
    async fn view(&self, query: &ViewQuery) -> Result<Vec<DirectoryUser>> {
        query.validate()?;

        if let Some(id) = populated(&query.id) {
            let result = self.client.get(&format!("{}/{}", USERS_ENDPOINT, id)).await;
            Ok(self.lookup_one(result))
        } else if let Some(user_id) = populated(&query.user_id) {
            let result = self
                .client
                .get_query(USERS_ENDPOINT, &UserIdQuery { user_id })
                .await;
            Ok(self.lookup_one(result))
        } else if let Some(email) = populated(&query.email) {
            self.lookup_by_email(email).await
        } else {
            Err(InvalidInputError::EmptyQuery.into())
        }
    }

    #[instrument(skip(self))]
    async fn all_users(&self) -> Result<Arc<Vec<DirectoryUser>>> {
        if let Some(users) = self.cache.get() {
            debug!(count = users.len(), "serving directory from cache");
            return Ok(users);
        }

        // Concurrent misses each run their own scan; the slot write is a
        // full-snapshot replacement, so the race costs duplicate work,
        // never an inconsistent snapshot.
        let scan = DirectoryScan::new(
            &self.client,
            self.config.page_size,
            self.config.burst_size,
            Duration::from_secs(self.config.burst_delay_seconds),
        );
        let users = scan.run().await?;

        info!(count = users.len(), "directory scan cached");
        Ok(self.cache.store(users))
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_or_update(&self, user: &DirectoryUser) -> Result<DirectoryUser> {
        // Attribute constraints hold by construction of AttributeMap, so
        // nothing invalid can reach this point. Absent fields are omitted
        // from the body; the remote creates without `id`, updates with it.
        self.client.post(USERS_ENDPOINT, user).await
    }

    #[instrument(skip(self))]
    async fn sync_profile_url(&self, email: &str) -> Result<Vec<DirectoryUser>> {
        if email.is_empty() {
            return Err(InvalidInputError::EmptyEmail.into());
        }

        let profile_url = self.canonical_profile_url(email).await;
        let matches = self.view(&ViewQuery::by_email(email)).await?;

        let Some(profile_url) = profile_url else {
            // Nothing to reconcile without a canonical URL; the attribute
            // cannot be set to an absent value.
            return Ok(Vec::new());
        };

        let property = self.profile_url_property().to_string();
        let mut written = Vec::new();

        for user in matches {
            if user.string_attribute(&property) == Some(profile_url.as_str()) {
                continue;
            }

            let mut update = DirectoryUser::with_email(email);
            update.id = user.id.clone();
            update
                .custom_attributes
                .insert(property.clone(), profile_url.clone())?;

            written.push(self.create_or_update(&update).await?);
        }

        if written.is_empty() {
            debug!(email, "profile URL already in sync");
        } else {
            info!(email, count = written.len(), "profile URL reconciled");
        }

        Ok(written)
    }
}

impl<F: Forum + 'static> CrmDirectory<F> {
    /// Fire-and-forget profile sync, for callers whose own outcome must
    /// not depend on it.
    ///
    /// The task runs detached with the log as its only error sink.
    pub fn spawn_sync_profile_url(
        self: &Arc<Self>,
        email: impl Into<String>,
    ) -> tokio::task::JoinHandle<()> {
        let directory = Arc::clone(self);
        let email = email.into();

        tokio::spawn(async move {
            if let Err(e) = directory.sync_profile_url(&email).await {
                error!(email = %email, error = %e, "background profile sync failed");
            }
        })
    }
}

fn populated(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}
