//! Raster tile API types and errors

use thiserror::Error;

use crate::client;
use crate::coord::CoordError;

/// Mapbox map ID for the classic raster tiles API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapId {
    Streets,
    StreetsBasic,
    Outdoors,
    Light,
    Dark,
    Satellite,
    SatelliteStreets,
    TerrainRgb,
    /// Any other map ID, e.g. a custom style tileset
    Custom(String),
}

impl MapId {
    /// URL segment for this map ID.
    pub fn as_str(&self) -> &str {
        match self {
            MapId::Streets => "mapbox.streets",
            MapId::StreetsBasic => "mapbox.streets-basic",
            MapId::Outdoors => "mapbox.outdoors",
            MapId::Light => "mapbox.light",
            MapId::Dark => "mapbox.dark",
            MapId::Satellite => "mapbox.satellite",
            MapId::SatelliteStreets => "mapbox.streets-satellite",
            MapId::TerrainRgb => "mapbox.terrain-rgb",
            MapId::Custom(id) => id,
        }
    }
}

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raster tile image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFormat {
    Png,
    Png32,
    Png64,
    Png128,
    Png256,
    PngRaw,
    Jpg70,
    Jpg80,
    Jpg90,
}

impl TileFormat {
    /// Format segment of the tile URL.
    pub fn as_str(self) -> &'static str {
        match self {
            TileFormat::Png => "png",
            TileFormat::Png32 => "png32",
            TileFormat::Png64 => "png64",
            TileFormat::Png128 => "png128",
            TileFormat::Png256 => "png256",
            TileFormat::PngRaw => "pngraw",
            TileFormat::Jpg70 => "jpg70",
            TileFormat::Jpg80 => "jpg80",
            TileFormat::Jpg90 => "jpg90",
        }
    }
}

/// Errors that can occur fetching, stitching, or drawing tiles.
#[derive(Debug, Error)]
pub enum RasterError {
    /// API request failed
    #[error(transparent)]
    Client(#[from] client::Error),

    /// Coordinate conversion failed
    #[error(transparent)]
    Coord(#[from] CoordError),

    /// Returned bytes could not be decoded as an image
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// File I/O failure while loading or saving an image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A draw target lies entirely outside the tile
    #[error("point ({x}, {y}) lies outside tile {tile} ({width}x{height} px)")]
    OutOfBounds {
        x: i64,
        y: i64,
        tile: crate::coord::TileCoord,
        width: u32,
        height: u32,
    },
}
