//! Memoized window selection.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

use crate::domain::services::{VisibleWindowSelector, WindowQuery, WindowSelection};
use crate::domain::snapshot::StateSnapshot;

/// Default number of (snapshot version, query) pairs to keep.
pub const DEFAULT_CACHE_SIZE: usize = 32;

/// An observably transparent cache around [`VisibleWindowSelector`].
///
/// Entries are keyed by the snapshot version and the full query, so a
/// repeated selection against an unchanged store is served without
/// recomputation while any store mutation naturally misses. Results are
/// identical to the uncached selector for every input.
pub struct MemoizedWindowSelector {
    cache: Mutex<LruCache<(u64, WindowQuery), WindowSelection>>,
    hits: std::sync::atomic::AtomicU64,
    misses: std::sync::atomic::AtomicU64,
}

impl MemoizedWindowSelector {
    /// Creates a cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            hits: std::sync::atomic::AtomicU64::new(0),
            misses: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Creates a cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }

    /// Selects the visible window, reusing the cached result when the
    /// snapshot version and query both match a previous call.
    #[must_use]
    pub fn select(&self, snapshot: &StateSnapshot, query: &WindowQuery) -> WindowSelection {
        let key = (snapshot.version(), query.clone());
        let mut cache = self.cache.lock();

        if let Some(selection) = cache.get(&key) {
            self.hits
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            trace!(version = key.0, "window selection served from cache");
            return selection.clone();
        }

        let selection = VisibleWindowSelector::select(snapshot, query);
        cache.put(key, selection.clone());
        self.misses
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        selection
    }

    /// Number of cache hits since creation.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Number of cache misses since creation.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoizedWindowSelector {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChannelChunk, Message, MessageId, UserProfile};
    use chrono::Utc;

    fn snapshot() -> StateSnapshot {
        let mut snap = StateSnapshot::new(UserProfile::new(7_u64, "alice"));
        snap.put_message(Message::new(1_u64, 100_u64, 9_u64, "hi", Utc::now()));
        snap.set_chunks(
            100_u64,
            vec![ChannelChunk::new(vec![MessageId(1)]).at_newest().at_oldest()],
        );
        snap
    }

    #[test]
    fn test_cached_result_matches_uncached() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64);
        let memo = MemoizedWindowSelector::with_default_capacity();

        let direct = VisibleWindowSelector::select(&snap, &query);
        let first = memo.select(&snap, &query);
        let second = memo.select(&snap, &query);

        assert_eq!(first, direct);
        assert_eq!(second, direct);
        assert_eq!(memo.hits(), 1);
        assert_eq!(memo.misses(), 1);
    }

    #[test]
    fn test_mutation_invalidates_by_version() {
        let mut snap = snapshot();
        let query = WindowQuery::recent(100_u64);
        let memo = MemoizedWindowSelector::with_default_capacity();

        let before = memo.select(&snap, &query);
        snap.put_message(Message::new(2_u64, 100_u64, 9_u64, "more", Utc::now()));
        snap.set_chunks(
            100_u64,
            vec![
                ChannelChunk::new(vec![MessageId(1), MessageId(2)])
                    .at_newest()
                    .at_oldest(),
            ],
        );
        let after = memo.select(&snap, &query);

        assert_ne!(before.message_ids, after.message_ids);
        assert_eq!(memo.misses(), 2);
    }

    #[test]
    fn test_distinct_queries_cached_separately() {
        let snap = snapshot();
        let memo = MemoizedWindowSelector::with_default_capacity();

        let _ = memo.select(&snap, &WindowQuery::recent(100_u64));
        let _ = memo.select(&snap, &WindowQuery::recent(200_u64));

        assert_eq!(memo.len(), 2);
        assert_eq!(memo.misses(), 2);
    }

    #[test]
    fn test_capacity_bound() {
        let snap = snapshot();
        let memo = MemoizedWindowSelector::new(1);

        let _ = memo.select(&snap, &WindowQuery::recent(100_u64));
        let _ = memo.select(&snap, &WindowQuery::recent(200_u64));

        assert_eq!(memo.len(), 1);
    }
}
