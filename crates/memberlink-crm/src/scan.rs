//! Paginated full-directory scan under a request-burst rate limit.

use std::time::Duration;

use futures_util::future::try_join_all;
use serde::Serialize;
use tracing::{debug, instrument};

use memberlink_core::Result;
use memberlink_core::listing::{UserListing, burst_spans};
use memberlink_core::user::DirectoryUser;

use crate::client::CrmClient;

const USERS_ENDPOINT: &str = "users";

#[derive(Debug, Serialize)]
struct PageQuery {
    per_page: u32,
    page: u32,
}

/// Burst-scheduled scanner over the directory's listing endpoint.
pub(crate) struct DirectoryScan<'a> {
    client: &'a CrmClient,
    page_size: u32,
    burst_size: u32,
    burst_delay: Duration,
}

impl<'a> DirectoryScan<'a> {
    pub(crate) fn new(
        client: &'a CrmClient,
        page_size: u32,
        burst_size: u32,
        burst_delay: Duration,
    ) -> Self {
        Self {
            client,
            page_size,
            burst_size,
            burst_delay,
        }
    }

    /// Fetch the entire directory, page 1 first to learn the page count,
    /// then the remaining pages in bounded concurrent bursts.
    ///
    /// Any failed page fetch aborts the whole scan: the caller caches the
    /// result as the complete directory, so a partial set must never be
    /// returned as a success.
    #[instrument(skip(self))]
    pub(crate) async fn run(&self) -> Result<Vec<DirectoryUser>> {
        let first = self.fetch_listing(1).await?;
        // The count from page 1 is authoritative for the whole scan.
        let total_pages = first.total_pages();
        let total_count = first.total_count;

        let mut users = first.users;

        let spans = burst_spans(total_pages, self.burst_size);
        let burst_count = spans.len();
        debug!(total_pages, burst_count, "scanning directory");

        for (index, span) in spans.into_iter().enumerate() {
            let fetches = span.pages().map(|page| self.fetch_page_users(page));
            let pages = try_join_all(fetches).await?;

            for page_users in pages {
                users.extend(page_users);
            }

            // Coarse backpressure against remote throttling; no pause
            // after the final burst.
            if index + 1 < burst_count {
                tokio::time::sleep(self.burst_delay).await;
            }
        }

        debug!(
            fetched = users.len(),
            expected = total_count,
            "directory scan complete"
        );

        Ok(users)
    }

    async fn fetch_page_users(&self, page: u32) -> Result<Vec<DirectoryUser>> {
        Ok(self.fetch_listing(page).await?.users)
    }

    async fn fetch_listing(&self, page: u32) -> Result<UserListing> {
        let query = PageQuery {
            per_page: self.page_size,
            page,
        };
        self.client.get_query(USERS_ENDPOINT, &query).await
    }
}
