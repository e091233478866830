use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// How long a search result set is served from memory.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Result set of one search term.
///
/// Entries are immutable once stored; a refresh swaps in a new `Arc`.
#[derive(Debug)]
struct CacheEntry {
    urls: Arc<[String]>,
    fetched_at: Instant,
}

/// In-memory cache of GIF search results, keyed by search term.
///
/// Staleness is checked on lookup; stale entries are never evicted, only
/// overwritten by the next refresh. Reads and writes each take the lock once,
/// so two concurrent misses for the same term both fetch and the later
/// write wins.
pub struct GifCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for GifCache {
    fn default() -> Self {
        Self::new(FRESHNESS_WINDOW)
    }
}

impl GifCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Cached URLs for `term` if the entry is younger than the freshness
    /// window. An empty cached set is returned as such.
    pub async fn fresh(&self, term: &str) -> Option<Arc<[String]>> {
        let entries = self.entries.read().await;
        let entry = entries.get(term)?;

        if entry.fetched_at.elapsed() < self.ttl {
            Some(Arc::clone(&entry.urls))
        } else {
            None
        }
    }

    /// Replaces the entry for `term`, stamping it with the current time.
    pub async fn store(&self, term: &str, urls: Vec<String>) -> Arc<[String]> {
        let urls: Arc<[String]> = urls.into();
        let entry = CacheEntry {
            urls: Arc::clone(&urls),
            fetched_at: Instant::now(),
        };

        self.entries.write().await.insert(term.to_string(), entry);
        urls
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
