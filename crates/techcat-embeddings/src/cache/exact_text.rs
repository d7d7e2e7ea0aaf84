//! Exact-text embedding cache using moka.
//!
//! Keyed by the blake3 hash of the exact input text. Write-once per key:
//! the first vector stored for a text is the one every later lookup sees.
//! The cache has no capacity bound and never evicts, so a prefetched text
//! stays readable for the rest of the run.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use moka::sync::Cache;

const MAX_PREALLOCATED: u64 = 1 << 20;

/// Hit/miss counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: u64,
}

pub struct ExactTextCache {
    cache: Cache<String, Arc<Vec<f32>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ExactTextCache {
    /// Create a new cache sized for roughly `expected_entries` texts.
    /// The size is a preallocation hint, not a limit.
    pub fn new(expected_entries: u64) -> Self {
        let initial = usize::try_from(expected_entries.min(MAX_PREALLOCATED)).unwrap_or(0);
        Self {
            cache: Cache::builder().initial_capacity(initial).build(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, text: &str) -> Option<Arc<Vec<f32>>> {
        let found = self.cache.get(&Self::key(text));
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Presence check that does not touch the hit/miss counters.
    pub fn contains(&self, text: &str) -> bool {
        self.cache.contains_key(&Self::key(text))
    }

    /// Store an embedding unless one is already cached for this text.
    /// Returns the vector that ends up cached.
    pub fn insert(&self, text: &str, embedding: Vec<f32>) -> Arc<Vec<f32>> {
        self.cache.get_with(Self::key(text), || Arc::new(embedding))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache = ExactTextCache::new(100);
        cache.insert("solid-state battery", vec![1.0, 2.0, 3.0]);
        assert_eq!(
            cache.get("solid-state battery").as_deref(),
            Some(&vec![1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn keys_are_exact_text() {
        let cache = ExactTextCache::new(100);
        cache.insert("Battery", vec![1.0]);
        assert!(cache.get("battery").is_none());
        assert!(cache.get("Battery ").is_none());
    }

    #[test]
    fn first_write_wins() {
        let cache = ExactTextCache::new(100);
        cache.insert("rotor", vec![1.0]);
        let kept = cache.insert("rotor", vec![2.0]);
        assert_eq!(*kept, vec![1.0]);
    }

    #[test]
    fn size_hint_does_not_evict() {
        let cache = ExactTextCache::new(4);
        for i in 0..64 {
            cache.insert(&format!("text {i}"), vec![i as f32]);
        }
        for i in 0..64 {
            assert_eq!(
                cache.get(&format!("text {i}")).as_deref(),
                Some(&vec![i as f32])
            );
        }
    }

    #[test]
    fn counts_hits_and_misses() {
        let cache = ExactTextCache::new(100);
        cache.insert("a", vec![1.0]);
        cache.get("a");
        cache.get("b");
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
