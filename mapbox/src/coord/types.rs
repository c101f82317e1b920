//! Coordinate type definitions

use std::fmt;

use thiserror::Error;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range. Longitudes past the antimeridian (up to 360°)
/// are accepted so that regions crossing it stay contiguous.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 360.0;

/// Zoom levels supported by Mapbox raster tiles
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 22;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude, positive north
    pub latitude: f64,
    /// Longitude, positive east
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Tile coordinates in the Web Mercator / slippy map system.
///
/// `x` may exceed the grid width when the tile lies east of the
/// antimeridian in an unwrapped rectangle; [`TileCoord::wrapped`]
/// folds it back into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Column (east-west), 0 at west
    pub x: u32,
    /// Row (north-south), 0 at north
    pub y: u32,
    /// Zoom level (0-22)
    pub zoom: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    /// Number of tiles along one axis at this tile's zoom level.
    #[inline]
    pub fn grid_size(&self) -> u32 {
        1u32 << self.zoom
    }

    /// Folds an unwrapped column back into the tile grid.
    #[inline]
    pub fn wrapped(&self) -> TileCoord {
        TileCoord {
            x: self.x % self.grid_size(),
            y: self.y,
            zoom: self.zoom,
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is outside the Web Mercator range
    #[error("Invalid latitude: {0} (must be between {MIN_LAT} and {MAX_LAT})")]
    InvalidLatitude(f64),
    /// Longitude is outside the accepted range
    #[error("Invalid longitude: {0} (must be between {MIN_LON} and {MAX_LON})")]
    InvalidLongitude(f64),
    /// Zoom level is outside the supported range
    #[error("Invalid zoom level: {0} (must be between {MIN_ZOOM} and {MAX_ZOOM})")]
    InvalidZoom(u8),
}
