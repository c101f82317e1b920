//! Tile byte cache
//!
//! Pluggable caching for fetched raster tiles: a persistent per-file disk
//! cache and an in-memory cache, behind the [`TileCache`] trait so the
//! raster client takes either (or none).

mod disk;
mod memory;
mod r#trait;
mod types;

pub use disk::DiskCache;
pub use memory::MemoryCache;
pub use r#trait::TileCache;
pub use types::{CacheError, CacheKey};
