//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator tile and pixel coordinates used by the Mapbox raster
//! tile API.

mod types;

pub use types::{
    CoordError, Location, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Pixel size of a standard Mapbox raster tile.
pub const TILE_SIZE: u32 = 256;

/// Projects a location into the Web Mercator plane, normalized so that the
/// world spans 0..1 on both axes. Longitudes past 180° project past 1.0 on
/// the x axis rather than wrapping, keeping antimeridian-crossing
/// rectangles contiguous.
fn mercator_normalized(location: Location) -> (f64, f64) {
    let x = (location.longitude + 180.0) / 360.0;

    let lat_rad = location.latitude * PI / 180.0;
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0;

    (x, y)
}

fn validate(location: Location, zoom: u8) -> Result<(), CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&location.latitude) {
        return Err(CoordError::InvalidLatitude(location.latitude));
    }
    if !(MIN_LON..=MAX_LON).contains(&location.longitude) {
        return Err(CoordError::InvalidLongitude(location.longitude));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }
    Ok(())
}

/// Converts a geographic location to tile coordinates.
///
/// The returned column is unwrapped: a longitude past the antimeridian
/// yields `x >= 2^zoom`. Use [`TileCoord::wrapped`] before building a
/// request for such a tile.
#[inline]
pub fn to_tile_coords(location: Location, zoom: u8) -> Result<TileCoord, CoordError> {
    validate(location, zoom)?;

    let n = 2.0_f64.powi(zoom as i32);
    let (nx, ny) = mercator_normalized(location);

    let x = (nx * n).floor() as u32;
    // Latitude exactly at the mercator bound lands on the grid edge
    let y = ((ny * n).floor() as u32).min((n as u32) - 1);

    Ok(TileCoord { x, y, zoom })
}

/// Converts tile coordinates back to the location of the tile's
/// northwest corner.
#[inline]
pub fn tile_to_location(tile: &TileCoord) -> Location {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let longitude = tile.x as f64 / n * 360.0 - 180.0;

    let y = tile.y as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let latitude = lat_rad * 180.0 / PI;

    Location {
        latitude,
        longitude,
    }
}

/// Projects a location to fractional pixel coordinates on the world bitmap
/// at the given zoom, where each tile is `tile_size` pixels across.
///
/// Used to place markers: the pixel position of a location inside a tile is
/// this value minus the tile's own pixel origin.
#[inline]
pub fn to_global_pixel(
    location: Location,
    zoom: u8,
    tile_size: u32,
) -> Result<(f64, f64), CoordError> {
    validate(location, zoom)?;

    let total = 2.0_f64.powi(zoom as i32) * tile_size as f64;
    let (nx, ny) = mercator_normalized(location);

    Ok((nx * total, ny * total))
}

/// Computes the normalized (min, max) tile rectangle enclosing two
/// locations at the given zoom. Both corners are inclusive.
pub fn enclosing_tiles(
    a: Location,
    b: Location,
    zoom: u8,
) -> Result<(TileCoord, TileCoord), CoordError> {
    let ta = to_tile_coords(a, zoom)?;
    let tb = to_tile_coords(b, zoom)?;

    let min = TileCoord {
        x: ta.x.min(tb.x),
        y: ta.y.min(tb.y),
        zoom,
    };
    let max = TileCoord {
        x: ta.x.max(tb.x),
        y: ta.y.max(tb.y),
        zoom,
    };

    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_york_city_at_zoom_16() {
        // New York City: 40.7128°N, 74.0060°W
        let result = to_tile_coords(Location::new(40.7128, -74.0060), 16);
        assert!(result.is_ok(), "Valid coordinates should not error");

        let tile = result.unwrap();
        assert_eq!(tile.x, 19295);
        assert_eq!(tile.y, 24640);
        assert_eq!(tile.zoom, 16);
    }

    #[test]
    fn test_invalid_latitude() {
        let result = to_tile_coords(Location::new(90.0, 0.0), 10);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), CoordError::InvalidLatitude(_)));
    }

    #[test]
    fn test_invalid_zoom() {
        let result = to_tile_coords(Location::new(0.0, 0.0), 23);
        assert!(matches!(result.unwrap_err(), CoordError::InvalidZoom(23)));
    }

    #[test]
    fn test_longitude_past_antimeridian_is_unwrapped() {
        // 183.4°E at zoom 6 projects just past the east edge of the grid
        let tile = to_tile_coords(Location::new(-34.2186101, 183.4015517), 6).unwrap();
        assert_eq!(tile.x, 64, "Column should be unwrapped past the grid");
        assert_eq!(tile.wrapped().x, 0, "Wrapped column folds back to the west");
        assert_eq!(tile.y, 38);
    }

    #[test]
    fn test_tile_to_location_northwest_corner() {
        let tile = TileCoord::new(19295, 24640, 16);
        let location = tile_to_location(&tile);

        // Should be close to NYC but not exact (northwest corner of tile)
        assert!(
            (location.latitude - 40.713).abs() < 0.01,
            "Latitude should be close to 40.713"
        );
        assert!(
            (location.longitude - (-74.007)).abs() < 0.01,
            "Longitude should be close to -74.007"
        );
    }

    #[test]
    fn test_roundtrip_conversion() {
        let original = Location::new(51.5074, -0.1278); // London

        for zoom in [0, 5, 10, 15, 22] {
            let tile = to_tile_coords(original, zoom).unwrap();
            let converted = tile_to_location(&tile);

            // Tolerance is the size of one tile at this zoom level, since
            // tile_to_location returns the northwest corner
            let tile_degrees = 360.0 / 2.0_f64.powi(zoom as i32);

            assert!(
                (converted.latitude - original.latitude).abs() < tile_degrees,
                "Zoom {}: lat diff {} exceeds tile size {}",
                zoom,
                (converted.latitude - original.latitude).abs(),
                tile_degrees
            );
            assert!(
                (converted.longitude - original.longitude).abs() < tile_degrees,
                "Zoom {}: lon diff {} exceeds tile size {}",
                zoom,
                (converted.longitude - original.longitude).abs(),
                tile_degrees
            );
        }
    }

    #[test]
    fn test_global_pixel_at_origin() {
        // Null island at zoom 0 sits at the center of the single tile
        let (px, py) = to_global_pixel(Location::new(0.0, 0.0), 0, 256).unwrap();
        assert!((px - 128.0).abs() < 1e-9);
        assert!((py - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_global_pixel_matches_tile_grid() {
        // The pixel position divided by the tile size is the tile index
        let location = Location::new(-36.8485, 174.7633); // Auckland
        let zoom = 4;

        let (px, py) = to_global_pixel(location, zoom, 256).unwrap();
        let tile = to_tile_coords(location, zoom).unwrap();

        assert_eq!((px / 256.0).floor() as u32, tile.x);
        assert_eq!((py / 256.0).floor() as u32, tile.y);
    }

    #[test]
    fn test_enclosing_tiles_normalizes_corners() {
        // Corners given in either order produce the same rectangle
        let a = Location::new(-45.942805, 166.568500);
        let b = Location::new(-34.2186101, 183.4015517);

        let (min, max) = enclosing_tiles(a, b, 6).unwrap();
        let (min2, max2) = enclosing_tiles(b, a, 6).unwrap();

        assert_eq!(min, min2);
        assert_eq!(max, max2);
        assert_eq!(min, TileCoord::new(61, 38, 6));
        assert_eq!(max, TileCoord::new(64, 41, 6));
    }

    #[test]
    fn test_enclosing_tiles_single_tile() {
        let loc = Location::new(51.5074, -0.1278);
        let (min, max) = enclosing_tiles(loc, loc, 10).unwrap();
        assert_eq!(min, max);
    }
}
