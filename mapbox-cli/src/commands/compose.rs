//! Compose command: fetch a region of tiles, stitch them, drop markers,
//! and save the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mapbox::cache::DiskCache;
use mapbox::client::Client;
use mapbox::coord::Location;
use mapbox::raster::{self, Anchor, MapId, RasterClient, TileFormat};

use crate::error::CliError;

/// Parameters of a compose run.
pub struct ComposeArgs {
    pub map: MapId,
    pub southwest: Location,
    pub northeast: Location,
    pub zoom: u8,
    pub format: TileFormat,
    pub high_dpi: bool,
    pub cache_dir: Option<PathBuf>,
    pub marker: Option<PathBuf>,
    pub marker_locations: Vec<Location>,
    pub output: PathBuf,
}

/// Parses a "lat,lon" pair.
pub fn parse_location(value: &str) -> Result<Location, CliError> {
    let mut parts = value.splitn(2, ',');
    let latitude = parts
        .next()
        .and_then(|part| part.trim().parse::<f64>().ok());
    let longitude = parts
        .next()
        .and_then(|part| part.trim().parse::<f64>().ok());

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Location::new(latitude, longitude)),
        _ => Err(CliError::Argument(format!(
            "expected \"lat,lon\", got \"{}\"",
            value
        ))),
    }
}

pub fn run(token: &str, args: &ComposeArgs) -> Result<(), CliError> {
    let client = Client::new(token)?;
    let mut raster = RasterClient::new(client);

    if let Some(dir) = &args.cache_dir {
        let cache = DiskCache::new(dir.clone()).map_err(|e| CliError::Argument(e.to_string()))?;
        raster.set_cache(Arc::new(cache));
    }

    let grid = raster.get_enclosing_tiles(
        &args.map,
        args.southwest,
        args.northeast,
        args.zoom,
        args.format,
        args.high_dpi,
    )?;

    println!(
        "Fetched {}x{} tiles at zoom {} (origin {})",
        grid.columns(),
        grid.row_count(),
        args.zoom,
        grid.origin()
    );

    let mut composite = grid.into_tile();

    if let Some(marker_path) = &args.marker {
        let marker = raster::load_image(marker_path)?;
        for location in &args.marker_locations {
            composite.draw_location(&marker, *location, Anchor::pin())?;
        }
    }

    save(composite.image(), &args.output)?;
    println!("Saved {}", args.output.display());
    Ok(())
}

/// Saves by extension: `.png` keeps alpha, everything else gets JPEG.
fn save(image: &image::RgbaImage, path: &Path) -> Result<(), CliError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => raster::save_png(image, path)?,
        _ => raster::save_jpeg(image, path)?,
    }
    Ok(())
}
