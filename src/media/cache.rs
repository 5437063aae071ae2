// SPDX-License-Identifier: MPL-2.0
//! Decoded image cache shared by every tile.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used images are evicted first
//! - **Source-keyed**: Entries are indexed by the raw source string
//! - **Count-bounded**: At most `max_images` decoded pictures are kept
//!
//! A hit lets a tile become ready without going through `Loading`.

use crate::media::ImageData;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub insertions: u64,
}

impl CacheStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache of decoded images.
#[derive(Debug)]
pub struct ImageCache {
    cache: LruCache<String, Arc<ImageData>>,
    stats: CacheStats,
}

impl ImageCache {
    /// Creates a cache holding at most `max_images` entries (at least one).
    #[must_use]
    pub fn new(max_images: usize) -> Self {
        let capacity = NonZeroUsize::new(max_images).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Looks up `key`, marking it as recently used.
    pub fn get(&mut self, key: &str) -> Option<Arc<ImageData>> {
        match self.cache.get(key) {
            Some(image) => {
                self.stats.hits += 1;
                Some(Arc::clone(image))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, image: Arc<ImageData>) {
        let key = key.into();
        let replaced = self.cache.contains(&key);
        if self.cache.push(key, image).is_some() && !replaced {
            self.stats.evictions += 1;
        }
        self.stats.insertions += 1;
    }

    /// Drops `key` from the cache. Returns `true` if it was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.cache.pop(key).is_some()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

/// Cache handle shared between the UI thread and load tasks.
#[derive(Debug, Clone)]
pub struct SharedImageCache(Arc<Mutex<ImageCache>>);

impl SharedImageCache {
    #[must_use]
    pub fn new(max_images: usize) -> Self {
        Self(Arc::new(Mutex::new(ImageCache::new(max_images))))
    }

    /// Locks the cache. A poisoned lock is recovered, since the cache holds
    /// no invariant a panicking writer could break.
    pub fn lock(&self) -> MutexGuard<'_, ImageCache> {
        self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
