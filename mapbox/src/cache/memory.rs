//! In-memory tile cache.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::cache::types::{CacheError, CacheKey};
use crate::cache::TileCache;

/// In-memory cache for fetched tiles.
///
/// Unbounded; intended for tests and short-lived compositing runs where
/// the same tile is fetched more than once. Use [`super::DiskCache`] for
/// anything persistent.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached tiles.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TileCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: CacheKey, data: Vec<u8>) -> Result<(), CacheError> {
        self.entries.lock().unwrap().insert(key, data);
        Ok(())
    }

    fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}
