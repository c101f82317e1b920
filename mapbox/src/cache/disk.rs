//! Persistent file-per-tile disk cache.

use std::fs;
use std::path::PathBuf;

use crate::cache::types::{CacheError, CacheKey};
use crate::cache::TileCache;

/// Disk cache storing each tile as a file under
/// `<root>/<map_id>/<zoom>/<x>/<y>[@2x].<format>`.
///
/// The layout is derived entirely from the key, so no index is kept and
/// the cache survives process restarts for free.
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Create a disk cache rooted at `root`, creating the directory if
    /// needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root)?;
        }
        Ok(Self { root })
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Remove every cached file under the root.
    pub fn clear(&self) -> Result<(), CacheError> {
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

impl TileCache for DiskCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<u8>> {
        match fs::read(self.path_for(key)) {
            Ok(data) => {
                tracing::trace!(key = %key.tile, map = %key.map_id, "disk cache hit");
                Some(data)
            }
            Err(_) => None,
        }
    }

    fn put(&self, key: CacheKey, data: Vec<u8>) -> Result<(), CacheError> {
        let path = self.path_for(&key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &data)?;
        Ok(())
    }

    fn contains(&self, key: &CacheKey) -> bool {
        self.path_for(key).exists()
    }
}
