//! In-memory query embedding cache using moka.
//!
//! Keys are blake3 hashes of the query text. Entries idle for an hour are evicted.

use std::time::Duration;

use moka::sync::Cache;

/// Memoizes single-query embeddings so repeated searches skip the network.
pub struct QueryCache {
    cache: Cache<String, Vec<f32>>,
}

impl QueryCache {
    /// Create a cache holding at most `max_entries` vectors.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();

        Self { cache }
    }

    /// Cache key for a query.
    pub fn key(query: &str) -> String {
        blake3::hash(query.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, query: &str) -> Option<Vec<f32>> {
        self.cache.get(&Self::key(query))
    }

    pub fn insert(&self, query: &str, embedding: Vec<f32>) {
        self.cache.insert(Self::key(query), embedding);
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
