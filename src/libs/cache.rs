//! Time-to-live memoization for collaborator queries.
//!
//! The tracking server is queried from several independent scheduler loops,
//! so query results are memoized behind a small TTL cache: a cached value is
//! served until `ttl` has elapsed since its last refresh, after which the
//! caller is expected to fetch a fresh value and `put` it back. Fetching
//! happens outside the cache lock; two racing callers may both refresh the
//! same key, which costs one redundant query and nothing else.
//!
//! The clock is injectable so tests can advance time without sleeping.
//!
//! ## Usage
//!
//! ```rust
//! use nag::libs::cache::TtlCache;
//! use chrono::Duration;
//!
//! let cache: TtlCache<String, u64> = TtlCache::new(Duration::seconds(60));
//! assert_eq!(cache.get(&"key".to_string()), None);
//! cache.put("key".to_string(), 42);
//! assert_eq!(cache.get(&"key".to_string()), Some(42));
//! ```

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// A source of "now", injectable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock: `Utc::now()`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry<V> {
    refreshed: DateTime<Utc>,
    value: V,
}

/// A keyed cache whose entries expire a fixed duration after their last
/// refresh.
pub struct TtlCache<K, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates a cache backed by the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock. Tests use this to simulate
    /// the passage of time.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key` if it is still fresh.
    ///
    /// A value is fresh while the elapsed time since its last refresh does
    /// not exceed the TTL; a missing or expired entry yields `None`.
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.lock();
        let entry = entries.get(key)?;
        if self.clock.now() - entry.refreshed > self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Stores `value` under `key`, stamping it with the current time.
    pub fn put(&self, key: K, value: V) {
        let mut entries = self.entries.lock();
        entries.insert(
            key,
            CacheEntry {
                refreshed: self.clock.now(),
                value,
            },
        );
    }
}
