// src/api/cache.rs
//! In-memory LRU cache for GET responses.
//!
//! Keys are the endpoint path plus its sorted query pairs, so two requests
//! differing only in query order share an entry. Request bodies are never
//! part of a key, which is why only GET responses are stored here.

use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use std::num::NonZeroUsize;

/// Hit, miss and size counters of a client's response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheInfo {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub capacity: usize,
}

struct CacheState {
    entries: LruCache<String, Value>,
    hits: u64,
    misses: u64,
}

pub struct ResponseCache {
    state: Mutex<CacheState>,
}

impl ResponseCache {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn key(path: &str, query: &[(String, String)]) -> String {
        if query.is_empty() {
            return path.to_string();
        }
        let mut pairs: Vec<String> = query
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        pairs.sort();
        format!("{}?{}", path, pairs.join("&"))
    }

    /// Looks up a response, counting the hit or miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut state = self.state.lock();
        match state.entries.get(key).cloned() {
            Some(value) => {
                state.hits += 1;
                log::debug!("Cache hit: {}", key);
                Some(value)
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    pub fn put(&self, key: String, value: Value) {
        self.state.lock().entries.put(key, value);
    }

    pub fn remove(&self, key: &str) {
        self.state.lock().entries.pop(key);
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
    }

    pub fn info(&self) -> CacheInfo {
        let state = self.state.lock();
        CacheInfo {
            hits: state.hits,
            misses: state.misses,
            size: state.entries.len(),
            capacity: state.entries.cap().get(),
        }
    }
}
