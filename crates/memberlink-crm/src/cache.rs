//! Short-lived cache of the full directory user set.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::Instant;

use memberlink_core::user::DirectoryUser;

/// A cached full-directory snapshot.
struct CacheEntry {
    users: Arc<Vec<DirectoryUser>>,
    expires_at: Instant,
}

/// A single-slot, time-expiring cache of the full user set.
///
/// Population is deliberately not serialized: two callers that both
/// observe a miss each perform their own scan, and the later `store`
/// simply replaces the slot with an equally valid snapshot. Duplicate
/// work is tolerated; a torn or partial snapshot is impossible because
/// the slot is only ever replaced whole.
pub(crate) struct DirectoryCache {
    slot: RwLock<Option<CacheEntry>>,
    ttl: Duration,
}

impl DirectoryCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// The cached snapshot, if present and not expired.
    pub(crate) fn get(&self) -> Option<Arc<Vec<DirectoryUser>>> {
        let slot = self.slot.read().unwrap();
        slot.as_ref()
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| Arc::clone(&entry.users))
    }

    /// Replace the slot with a fresh snapshot and return it.
    pub(crate) fn store(&self, users: Vec<DirectoryUser>) -> Arc<Vec<DirectoryUser>> {
        let users = Arc::new(users);
        let entry = CacheEntry {
            users: Arc::clone(&users),
            expires_at: Instant::now() + self.ttl,
        };

        *self.slot.write().unwrap() = Some(entry);
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = DirectoryCache::new(Duration::from_secs(60));
        cache.store(vec![DirectoryUser::with_email("a@x.com")]);

        assert!(cache.get().is_some());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(cache.get().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn store_replaces_expired_entry() {
        let cache = DirectoryCache::new(Duration::from_secs(60));
        cache.store(vec![]);
        tokio::time::advance(Duration::from_secs(61)).await;

        let users = cache.store(vec![DirectoryUser::with_email("b@x.com")]);
        assert_eq!(users.len(), 1);
        assert!(cache.get().is_some());
    }

    #[test]
    fn empty_cache_misses() {
        let cache = DirectoryCache::new(Duration::from_secs(60));
        assert!(cache.get().is_none());
    }
}
