//! Per-connection read cache.
//!
//! Memoizes parsed read results keyed by `(path, format, read options)`.
//! Entries carry the TTL the read was made with; expired entries are
//! dropped on lookup. Thread-safe via internal mutex.

use files_connection_formats::{Format, ReadOptions, ReadResult};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Maximum number of cached read results per connection.
pub(crate) const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub path: String,
    pub format: Format,
    pub options: ReadOptions,
}

#[derive(Debug)]
struct CacheEntry {
    value: Arc<ReadResult>,
    inserted_at: Instant,
    ttl: Option<Duration>,
}

impl CacheEntry {
    fn expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => self.inserted_at.elapsed() >= ttl,
            None => false,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ReadCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
}

impl ReadCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up a cached result, dropping it if its TTL has passed.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<ReadResult>> {
        let mut entries = self.entries.lock().expect("read cache lock");
        match entries.get(key) {
            Some(entry) if entry.expired() => {
                entries.pop(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Store a result. `ttl = None` caches until evicted.
    pub fn put(&self, key: CacheKey, value: Arc<ReadResult>, ttl: Option<Duration>) {
        let mut entries = self.entries.lock().expect("read cache lock");
        entries.put(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(path: &str) -> CacheKey {
        CacheKey {
            path: path.to_string(),
            format: Format::Text,
            options: ReadOptions::default(),
        }
    }

    fn value(text: &str) -> Arc<ReadResult> {
        Arc::new(ReadResult::Text(text.to_string()))
    }

    #[test]
    fn test_hit_returns_same_object() {
        let cache = ReadCache::new(8);
        let stored = value("hello");
        cache.put(key("a.txt"), stored.clone(), None);

        let hit = cache.get(&key("a.txt")).unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
    }

    #[test]
    fn test_miss_on_different_options() {
        let cache = ReadCache::new(8);
        cache.put(key("a.txt"), value("hello"), None);

        let other = CacheKey {
            format: Format::Csv,
            ..key("a.txt")
        };
        assert!(cache.get(&other).is_none());
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = ReadCache::new(8);
        cache.put(key("a.txt"), value("hello"), Some(Duration::from_millis(20)));

        assert!(cache.get(&key("a.txt")).is_some());
        std::thread::sleep(Duration::from_millis(40));
        assert!(cache.get(&key("a.txt")).is_none());
    }

    #[test]
    fn test_capacity_eviction() {
        let cache = ReadCache::new(1);
        cache.put(key("a.txt"), value("a"), None);
        cache.put(key("b.txt"), value("b"), None);

        assert!(cache.get(&key("a.txt")).is_none());
        assert!(cache.get(&key("b.txt")).is_some());
    }
}
