//! Memoized canonical forms.
//!
//! Canonical reduction is pure but not free; repeated candidates show up
//! constantly during bulk enumeration. Memoization here is explicit: an
//! LRU cache keyed by content fingerprint, never a mutable field hidden
//! inside an otherwise-const accessor. The fingerprint covers the
//! underlying cell, so a changed cell identity is automatically a
//! different key.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;

use crate::engine::EngineError;
use crate::fingerprint::content_hash;

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
}

struct CacheInner<T> {
    entries: LruCache<u64, T>,
    stats: CacheStats,
}

/// LRU-bounded memoization of canonical-form computation.
///
/// Internally synchronized; this is an implementation detail of the
/// wrapper, not a concurrency guarantee of the pipeline.
pub struct CanonicalCache<T> {
    inner: Mutex<CacheInner<T>>,
}

impl<T: Clone + Serialize> CanonicalCache<T> {
    /// Create a cache bounded to `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(CacheInner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Return the memoized canonical form of `object`, computing it with
    /// `compute` on a miss. Errors are not cached.
    pub fn get_or_compute<F>(&self, object: &T, compute: F) -> Result<T, EngineError>
    where
        F: FnOnce() -> Result<T, EngineError>,
    {
        let key = content_hash(object);
        {
            let mut inner = self.inner.lock();
            if let Some(cached) = inner.entries.get(&key) {
                let cached = cached.clone();
                inner.stats.hits += 1;
                return Ok(cached);
            }
            inner.stats.misses += 1;
        }
        // Compute outside the lock; reduction can be expensive.
        let computed = compute()?;
        self.inner.lock().entries.put(key, computed.clone());
        Ok(computed)
    }

    /// Hit/miss counters so far.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// True iff nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached entries, keeping the counters.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cell::Cell;
    use crate::types::config::Config;

    fn config(volume: usize, occupation: &[u8]) -> Config {
        Config::new(Cell::of_volume(volume), occupation.to_vec())
    }

    #[test]
    fn test_second_lookup_hits() {
        let cache = CanonicalCache::new(16);
        let object = config(4, &[0, 1, 0, 2]);

        let first = cache.get_or_compute(&object, || object.canonical_record()).unwrap();
        let second = cache.get_or_compute(&object, || object.canonical_record()).unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_distinct_cells_are_distinct_keys() {
        let cache = CanonicalCache::new(16);
        let small = config(2, &[1, 0]);
        let large = config(4, &[1, 0, 1, 0]);

        cache.get_or_compute(&small, || small.canonical_record()).unwrap();
        cache.get_or_compute(&large, || large.canonical_record()).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache: CanonicalCache<Config> = CanonicalCache::new(16);
        let object = config(3, &[0, 1, 2]);

        let err = cache.get_or_compute(&object, || Err(EngineError::EmptyActionRange));
        assert!(err.is_err());
        assert!(cache.is_empty());

        let ok = cache.get_or_compute(&object, || object.canonical_record());
        assert!(ok.is_ok());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let cache = CanonicalCache::new(1);
        let a = config(2, &[0, 1]);
        let b = config(2, &[1, 1]);

        cache.get_or_compute(&a, || a.canonical_record()).unwrap();
        cache.get_or_compute(&b, || b.canonical_record()).unwrap();
        cache.get_or_compute(&a, || a.canonical_record()).unwrap();

        assert_eq!(cache.stats(), CacheStats { hits: 0, misses: 3 });
    }
}
