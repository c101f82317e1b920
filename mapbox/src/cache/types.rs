//! Cache key and error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::coord::TileCoord;

/// Cache key uniquely identifying a fetched raster tile.
///
/// Includes every request parameter that changes the returned bytes:
/// map ID, tile coordinates, format, and the high-DPI flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Map ID (e.g. "mapbox.satellite")
    pub map_id: String,
    /// Tile coordinates (wrapped into the grid)
    pub tile: TileCoord,
    /// Format segment of the request URL (e.g. "jpg90")
    pub format: String,
    /// Whether the @2x variant was requested
    pub high_dpi: bool,
}

impl CacheKey {
    pub fn new(
        map_id: impl Into<String>,
        tile: TileCoord,
        format: impl Into<String>,
        high_dpi: bool,
    ) -> Self {
        Self {
            map_id: map_id.into(),
            tile: tile.wrapped(),
            format: format.into(),
            high_dpi,
        }
    }

    /// Relative path of this key on disk:
    /// `<map_id>/<zoom>/<x>/<y>[@2x].<format>`.
    pub fn relative_path(&self) -> PathBuf {
        let scale = if self.high_dpi { "@2x" } else { "" };
        PathBuf::from(&self.map_id)
            .join(self.tile.zoom.to_string())
            .join(self.tile.x.to_string())
            .join(format!("{}{}.{}", self.tile.y, scale, self.format))
    }
}

/// Cache-related errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error during cache operations
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}
