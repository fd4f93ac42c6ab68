//! Client-side query cache.
//!
//! Results are keyed by `(kind, page)`. Invalidation marks every entry of a
//! kind stale and bumps the kind's generation; stale entries stay readable
//! until a re-fetch replaces them. A value fetched under an older generation
//! than the current one is stored stale.

use std::collections::HashMap;

/// Cache key kind for button pages.
pub const BUTTONS_KIND: &str = "buttons";

/// Identifies one cached query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: &'static str,
    pub page: u32,
}

impl QueryKey {
    pub fn buttons(page: u32) -> Self {
        Self {
            kind: BUTTONS_KIND,
            page,
        }
    }
}

/// A cached value and whether it must be re-fetched before being trusted.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stale: bool,
    /// Generation the value was requested under
    pub generation: u64,
}

/// Query results keyed by [`QueryKey`].
#[derive(Debug)]
pub struct QueryCache<V> {
    entries: HashMap<QueryKey, CacheEntry<V>>,
    generations: HashMap<&'static str, u64>,
    invalidations: u64,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            generations: HashMap::new(),
            invalidations: 0,
        }
    }
}

impl<V> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    /// Whether `key` holds a value that does not need a re-fetch.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|entry| !entry.stale)
    }

    /// Current generation of `kind`; starts at 0.
    pub fn generation(&self, kind: &str) -> u64 {
        self.generations.get(kind).copied().unwrap_or(0)
    }

    /// Store a value fetched under `generation`.
    ///
    /// # Returns
    /// * `bool` - Whether the value was stored
    ///
    /// # Details
    /// A value older than the entry already cached is dropped. A value older
    /// than the kind's current generation is stored stale.
    pub fn insert(&mut self, key: QueryKey, value: V, generation: u64) -> bool {
        if self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.generation > generation)
        {
            return false;
        }
        let stale = generation < self.generation(key.kind);
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stale,
                generation,
            },
        );
        true
    }

    /// Mark every entry of `kind` stale and start a new generation.
    ///
    /// # Returns
    /// * `usize` - Number of entries marked
    pub fn invalidate(&mut self, kind: &'static str) -> usize {
        self.invalidations += 1;
        *self.generations.entry(kind).or_insert(0) += 1;
        let mut marked = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.kind == kind {
                entry.stale = true;
                marked += 1;
            }
        }
        marked
    }

    /// Total number of `invalidate` calls since creation.
    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }
}
