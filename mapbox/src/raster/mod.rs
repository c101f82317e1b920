//! Raster tile client
//!
//! Fetches raster map tiles from the `v4` tiles API, caches the raw bytes
//! through a pluggable [`TileCache`], and composites grids of tiles into a
//! single image for marker drawing.

mod io;
mod tile;
mod types;

pub use io::{load_image, save_jpeg, save_png};
pub use tile::{Anchor, HAlign, Tile, VAlign, CENTER};
pub use types::{MapId, RasterError, TileFormat};

use std::io::Cursor;
use std::sync::Arc;

use image::{imageops, ImageReader, RgbaImage};

use crate::cache::{CacheKey, TileCache};
use crate::client::{Client, HttpTransport, ReqwestTransport};
use crate::coord::{self, CoordError, Location, TileCoord, MAX_ZOOM, TILE_SIZE};

/// Client for the raster tiles API.
///
/// # Example
///
/// ```no_run
/// use mapbox::client::Client;
/// use mapbox::coord::TileCoord;
/// use mapbox::raster::{MapId, RasterClient, TileFormat};
///
/// let client = Client::from_env()?;
/// let raster = RasterClient::new(client);
///
/// let tile = raster.get_tile(
///     &MapId::Satellite,
///     TileCoord::new(15, 9, 4),
///     TileFormat::Jpg90,
///     true,
/// )?;
/// # Ok::<(), mapbox::raster::RasterError>(())
/// ```
pub struct RasterClient<T: HttpTransport = ReqwestTransport> {
    client: Client<T>,
    cache: Option<Arc<dyn TileCache>>,
}

impl<T: HttpTransport> RasterClient<T> {
    pub fn new(client: Client<T>) -> Self {
        Self {
            client,
            cache: None,
        }
    }

    /// Routes fetched tile bytes through `cache`.
    pub fn set_cache(&mut self, cache: Arc<dyn TileCache>) {
        self.cache = Some(cache);
    }

    /// Builder form of [`Self::set_cache`].
    pub fn with_cache(mut self, cache: Arc<dyn TileCache>) -> Self {
        self.set_cache(cache);
        self
    }

    /// Pixel size of tiles fetched with the given DPI flag.
    pub fn tile_size(high_dpi: bool) -> u32 {
        if high_dpi {
            TILE_SIZE * 2
        } else {
            TILE_SIZE
        }
    }

    /// Request path for one tile: `v4/{map}/{z}/{x}/{y}[@2x].{format}`.
    fn tile_path(map: &MapId, tile: TileCoord, format: TileFormat, high_dpi: bool) -> String {
        let tile = tile.wrapped();
        let scale = if high_dpi { "@2x" } else { "" };
        format!(
            "v4/{}/{}/{}/{}{}.{}",
            map.as_str(),
            tile.zoom,
            tile.x,
            tile.y,
            scale,
            format.as_str()
        )
    }

    /// Fetches the raw encoded bytes of one tile, consulting the cache
    /// first and writing fetched bytes through to it.
    pub fn get_tile_bytes(
        &self,
        map: &MapId,
        tile: TileCoord,
        format: TileFormat,
        high_dpi: bool,
    ) -> Result<Vec<u8>, RasterError> {
        // Caller-supplied coordinates bypass the geographic conversions,
        // so the zoom bound is enforced here too
        if tile.zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(tile.zoom).into());
        }

        let key = CacheKey::new(map.as_str(), tile, format.as_str(), high_dpi);

        if let Some(cache) = &self.cache {
            if let Some(data) = cache.get(&key) {
                tracing::debug!(tile = %key.tile, map = %map, "tile cache hit");
                return Ok(data);
            }
        }

        let data = self
            .client
            .get(&Self::tile_path(map, tile, format, high_dpi), &[])?;
        tracing::debug!(tile = %key.tile, map = %map, bytes = data.len(), "tile fetched");

        if let Some(cache) = &self.cache {
            if let Err(error) = cache.put(key, data.clone()) {
                // A broken cache should not fail the fetch
                tracing::warn!(error = %error, "failed to cache tile");
            }
        }

        Ok(data)
    }

    /// Fetches one tile and decodes it to RGBA.
    pub fn get_tile(
        &self,
        map: &MapId,
        tile: TileCoord,
        format: TileFormat,
        high_dpi: bool,
    ) -> Result<RgbaImage, RasterError> {
        let data = self.get_tile_bytes(map, tile, format, high_dpi)?;

        let image = ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .decode()?
            .to_rgba8();

        Ok(image)
    }

    /// Fetches the grid of tiles enclosing two locations at a zoom level.
    ///
    /// The grid is row-major from the northwest corner; feed it to
    /// [`TileGrid::stitch`] or [`TileGrid::into_tile`] to composite.
    pub fn get_enclosing_tiles(
        &self,
        map: &MapId,
        a: Location,
        b: Location,
        zoom: u8,
        format: TileFormat,
        high_dpi: bool,
    ) -> Result<TileGrid, RasterError> {
        let (min, max) = coord::enclosing_tiles(a, b, zoom)?;

        tracing::info!(
            min = %min,
            max = %max,
            columns = max.x - min.x + 1,
            rows = max.y - min.y + 1,
            "fetching enclosing tiles"
        );

        let mut rows = Vec::with_capacity((max.y - min.y + 1) as usize);
        for y in min.y..=max.y {
            let mut row = Vec::with_capacity((max.x - min.x + 1) as usize);
            for x in min.x..=max.x {
                row.push(self.get_tile(map, TileCoord::new(x, y, zoom), format, high_dpi)?);
            }
            rows.push(row);
        }

        Ok(TileGrid {
            origin: min,
            tile_size: Self::tile_size(high_dpi),
            rows,
        })
    }
}

/// A fetched grid of tiles, pinned to the world grid by its northwest
/// tile coordinate.
pub struct TileGrid {
    origin: TileCoord,
    tile_size: u32,
    rows: Vec<Vec<RgbaImage>>,
}

impl TileGrid {
    /// Northwest tile of the grid.
    pub fn origin(&self) -> TileCoord {
        self.origin
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of tile columns.
    pub fn columns(&self) -> u32 {
        self.rows.first().map_or(0, |row| row.len() as u32)
    }

    /// Number of tile rows.
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Stitches the grid into one image, placing each tile at
    /// `(column * tile_size, row * tile_size)` on the canvas.
    pub fn stitch(&self) -> RgbaImage {
        let mut canvas = RgbaImage::new(
            self.columns() * self.tile_size,
            self.row_count() * self.tile_size,
        );

        for (row_index, row) in self.rows.iter().enumerate() {
            for (col_index, tile_image) in row.iter().enumerate() {
                let x = col_index as u32 * self.tile_size;
                let y = row_index as u32 * self.tile_size;
                imageops::replace(&mut canvas, tile_image, x.into(), y.into());
            }
        }

        canvas
    }

    /// Stitches the grid and pins the composite to its origin tile, ready
    /// for marker drawing.
    pub fn into_tile(self) -> Tile {
        let image = self.stitch();
        Tile::new(self.origin, self.tile_size, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockTransport;
    use image::{ImageFormat, Rgba};

    fn png_bytes(color: Rgba<u8>, size: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(size, size, color);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png)
            .expect("Failed to encode PNG");
        buffer.into_inner()
    }

    fn raster(mock: MockTransport) -> RasterClient<MockTransport> {
        RasterClient::new(Client::with_transport("test-token", mock).unwrap())
    }

    #[test]
    fn test_tile_url_construction() {
        let mock = MockTransport::always(200, png_bytes(Rgba([0, 0, 0, 255]), 4));
        let client = raster(mock);

        client
            .get_tile(&MapId::Satellite, TileCoord::new(15, 9, 4), TileFormat::Jpg90, false)
            .unwrap();

        let requested = client.client.transport().requested();
        assert_eq!(
            requested[0],
            "https://api.mapbox.com/v4/mapbox.satellite/4/15/9.jpg90?access_token=test-token"
        );
    }

    #[test]
    fn test_tile_url_high_dpi() {
        let mock = MockTransport::always(200, png_bytes(Rgba([0, 0, 0, 255]), 4));
        let client = raster(mock);

        client
            .get_tile(&MapId::Streets, TileCoord::new(0, 0, 0), TileFormat::Png, true)
            .unwrap();

        let requested = client.client.transport().requested();
        assert_eq!(
            requested[0],
            "https://api.mapbox.com/v4/mapbox.streets/0/0/0@2x.png?access_token=test-token"
        );
    }

    #[test]
    fn test_unwrapped_column_is_wrapped_in_url() {
        let mock = MockTransport::always(200, png_bytes(Rgba([0, 0, 0, 255]), 4));
        let client = raster(mock);

        // Column 64 at zoom 6 wraps to 0
        client
            .get_tile(&MapId::Satellite, TileCoord::new(64, 38, 6), TileFormat::Jpg90, false)
            .unwrap();

        let requested = client.client.transport().requested();
        assert!(requested[0].contains("/6/0/38.jpg90"));
    }

    #[test]
    fn test_get_tile_rejects_out_of_range_zoom() {
        let mock = MockTransport::always(200, png_bytes(Rgba([0, 0, 0, 255]), 4));
        let client = raster(mock);

        // Zoom levels past the grid must fail before any URL is built
        for zoom in [23, 31, 40] {
            let result = client.get_tile(
                &MapId::Satellite,
                TileCoord::new(0, 0, zoom),
                TileFormat::Jpg90,
                false,
            );
            assert!(matches!(
                result,
                Err(RasterError::Coord(CoordError::InvalidZoom(z))) if z == zoom
            ));
        }
        assert!(client.client.transport().requested().is_empty());
    }

    #[test]
    fn test_undecodable_tile_bytes_error() {
        let mock = MockTransport::always(200, b"not an image".to_vec());
        let client = raster(mock);

        let result = client.get_tile(
            &MapId::Satellite,
            TileCoord::new(1, 1, 2),
            TileFormat::Jpg90,
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cache_short_circuits_network() {
        let mock = MockTransport::always(200, png_bytes(Rgba([1, 2, 3, 255]), 4));
        let cache = Arc::new(crate::cache::MemoryCache::new());
        let client = raster(mock).with_cache(cache.clone());

        let tile = TileCoord::new(15, 9, 4);
        client
            .get_tile(&MapId::Satellite, tile, TileFormat::Jpg90, false)
            .unwrap();
        client
            .get_tile(&MapId::Satellite, tile, TileFormat::Jpg90, false)
            .unwrap();

        // Second fetch came from cache
        assert_eq!(client.client.transport().requested().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_enclosing_grid_dimensions() {
        let mock = MockTransport::always(200, png_bytes(Rgba([5, 5, 5, 255]), 256));
        let client = raster(mock);

        let a = Location::new(-45.942805, 166.568500);
        let b = Location::new(-34.2186101, 183.4015517);

        let grid = client
            .get_enclosing_tiles(&MapId::Satellite, a, b, 6, TileFormat::Jpg90, false)
            .unwrap();

        assert_eq!(grid.origin(), TileCoord::new(61, 38, 6));
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.row_count(), 4);
        assert_eq!(client.client.transport().requested().len(), 16);
    }

    #[test]
    fn test_stitch_places_tiles_on_grid() {
        let colors = [
            Rgba([255, 0, 0, 255]),
            Rgba([0, 255, 0, 255]),
            Rgba([0, 0, 255, 255]),
            Rgba([255, 255, 0, 255]),
        ];

        let grid = TileGrid {
            origin: TileCoord::new(0, 0, 1),
            tile_size: 8,
            rows: vec![
                vec![
                    RgbaImage::from_pixel(8, 8, colors[0]),
                    RgbaImage::from_pixel(8, 8, colors[1]),
                ],
                vec![
                    RgbaImage::from_pixel(8, 8, colors[2]),
                    RgbaImage::from_pixel(8, 8, colors[3]),
                ],
            ],
        };

        let stitched = grid.stitch();
        assert_eq!(stitched.dimensions(), (16, 16));
        assert_eq!(stitched.get_pixel(0, 0), &colors[0]);
        assert_eq!(stitched.get_pixel(15, 0), &colors[1]);
        assert_eq!(stitched.get_pixel(0, 15), &colors[2]);
        assert_eq!(stitched.get_pixel(15, 15), &colors[3]);
    }

    #[test]
    fn test_into_tile_pins_composite_to_origin() {
        let grid = TileGrid {
            origin: TileCoord::new(3, 4, 5),
            tile_size: 8,
            rows: vec![vec![RgbaImage::new(8, 8), RgbaImage::new(8, 8)]],
        };

        let tile = grid.into_tile();
        assert_eq!(tile.coord(), TileCoord::new(3, 4, 5));
        assert_eq!(tile.size(), 8);
        assert_eq!(tile.image().dimensions(), (16, 8));
    }
}
