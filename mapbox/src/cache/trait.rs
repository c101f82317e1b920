//! Cache trait definition for dependency injection.

use crate::cache::types::{CacheError, CacheKey};

/// Cache abstraction for raw tile bytes.
///
/// Implementations store the encoded bytes exactly as fetched from the
/// API; decoding stays with the raster client. Object-safe so a client
/// can hold an `Arc<dyn TileCache>`.
///
/// # Example
///
/// ```
/// use mapbox::cache::{CacheKey, MemoryCache, TileCache};
/// use mapbox::coord::TileCoord;
///
/// fn fetch_with_cache(cache: &dyn TileCache, key: &CacheKey) -> Vec<u8> {
///     if let Some(data) = cache.get(key) {
///         return data;
///     }
///     let data = vec![1, 2, 3]; // downloaded bytes
///     cache.put(key.clone(), data.clone()).ok();
///     data
/// }
///
/// let cache = MemoryCache::new();
/// let key = CacheKey::new("mapbox.satellite", TileCoord::new(15, 9, 4), "jpg90", false);
/// assert_eq!(fetch_with_cache(&cache, &key), vec![1, 2, 3]);
/// ```
pub trait TileCache: Send + Sync {
    /// Get cached bytes for the given key.
    fn get(&self, key: &CacheKey) -> Option<Vec<u8>>;

    /// Store bytes in the cache.
    fn put(&self, key: CacheKey, data: Vec<u8>) -> Result<(), CacheError>;

    /// Check if a key exists in the cache.
    fn contains(&self, key: &CacheKey) -> bool;
}
