//! mapbox - Client library for the Mapbox web API
//!
//! Wraps the tilesets publishing workflow (source upload, create, publish,
//! job-status polling) and the raster tiles API, including compositing of
//! downloaded tiles into a single image and marker overlays placed by
//! geographic-to-pixel transforms.
//!
//! # Example
//!
//! ```no_run
//! use mapbox::client::Client;
//! use mapbox::coord::Location;
//! use mapbox::raster::{self, Anchor, MapId, RasterClient, TileFormat};
//!
//! let raster = RasterClient::new(Client::from_env()?);
//!
//! let sw = Location::new(-45.9428, 166.5685);
//! let ne = Location::new(-34.2186, 183.4016);
//!
//! let grid = raster.get_enclosing_tiles(
//!     &MapId::Satellite, sw, ne, 6, TileFormat::Jpg90, false,
//! )?;
//! let mut composite = grid.into_tile();
//!
//! let marker = raster::load_image("marker.png".as_ref())?;
//! composite.draw_location(&marker, Location::new(-41.2865, 174.7762), Anchor::pin())?;
//!
//! raster::save_jpeg(composite.image(), "map.jpg".as_ref())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod client;
pub mod coord;
pub mod raster;
pub mod tileset;

/// Version of the mapbox library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
