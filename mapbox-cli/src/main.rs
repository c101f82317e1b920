//! mapbox CLI - Command-line interface
//!
//! This binary drives the tileset publishing workflow and the raster tile
//! compositor from the command line.

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use mapbox::raster::{MapId, TileFormat};

mod commands;
mod error;

use commands::compose::{parse_location, ComposeArgs};
use error::CliError;

#[derive(Debug, Clone, ValueEnum)]
enum MapChoice {
    /// Satellite imagery
    Satellite,
    /// Classic street map
    Streets,
    /// Satellite with street overlays
    SatelliteStreets,
    /// Outdoors terrain map
    Outdoors,
    /// Light monochrome basemap
    Light,
    /// Dark monochrome basemap
    Dark,
}

impl From<MapChoice> for MapId {
    fn from(choice: MapChoice) -> Self {
        match choice {
            MapChoice::Satellite => MapId::Satellite,
            MapChoice::Streets => MapId::Streets,
            MapChoice::SatelliteStreets => MapId::SatelliteStreets,
            MapChoice::Outdoors => MapId::Outdoors,
            MapChoice::Light => MapId::Light,
            MapChoice::Dark => MapId::Dark,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum FormatChoice {
    /// JPEG at 90% quality
    Jpg90,
    /// JPEG at 80% quality
    Jpg80,
    /// JPEG at 70% quality
    Jpg70,
    /// PNG, full color
    Png,
}

impl From<FormatChoice> for TileFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Jpg90 => TileFormat::Jpg90,
            FormatChoice::Jpg80 => TileFormat::Jpg80,
            FormatChoice::Jpg70 => TileFormat::Jpg70,
            FormatChoice::Png => TileFormat::Png,
        }
    }
}

#[derive(Parser)]
#[command(name = "mapbox")]
#[command(about = "Mapbox tileset publishing and raster tile compositing", long_about = None)]
#[command(version = mapbox::VERSION)]
struct Cli {
    /// Mapbox access token (falls back to MAPBOX_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a line-delimited GeoJSON file as a tileset source
    Upload {
        /// Mapbox account username
        #[arg(long)]
        username: String,
        /// Tileset ID
        #[arg(long)]
        tileset: String,
        /// Path to the source file
        source: PathBuf,
    },
    /// Create a tileset from a recipe file
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        tileset: String,
        /// Path to the recipe JSON
        recipe: PathBuf,
    },
    /// Queue a publish job for a tileset
    Publish {
        #[arg(long)]
        username: String,
        #[arg(long)]
        tileset: String,
        /// Poll until the job finishes
        #[arg(long)]
        wait: bool,
    },
    /// Show the status of the most recent job
    Status {
        #[arg(long)]
        username: String,
        #[arg(long)]
        tileset: String,
    },
    /// Fetch, stitch, and save the tiles enclosing a region
    Compose {
        /// Southwest corner as "lat,lon"
        #[arg(long)]
        southwest: String,
        /// Northeast corner as "lat,lon"
        #[arg(long)]
        northeast: String,
        /// Zoom level
        #[arg(long, default_value = "10")]
        zoom: u8,
        /// Map to fetch tiles from
        #[arg(long, value_enum, default_value = "satellite")]
        map: MapChoice,
        /// Tile format
        #[arg(long, value_enum, default_value = "jpg90")]
        format: FormatChoice,
        /// Request @2x (512px) tiles
        #[arg(long)]
        high_dpi: bool,
        /// Directory for the on-disk tile cache
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        /// Marker image to pin at each --at location
        #[arg(long)]
        marker: Option<PathBuf>,
        /// Marker location as "lat,lon"; repeatable
        #[arg(long = "at")]
        marker_locations: Vec<String>,
        /// Output image path (.png keeps alpha, anything else is JPEG)
        #[arg(long, default_value = "composite.jpg")]
        output: PathBuf,
    },
}

fn token_from(cli: &Cli) -> Result<String, CliError> {
    if let Some(token) = &cli.token {
        return Ok(token.clone());
    }
    env::var(mapbox::client::TOKEN_ENV).map_err(|_| CliError::MissingToken)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let token = token_from(&cli)?;

    match cli.command {
        Command::Upload {
            username,
            tileset,
            source,
        } => commands::tileset::upload(&token, &username, &tileset, &source),
        Command::Create {
            username,
            tileset,
            recipe,
        } => commands::tileset::create(&token, &username, &tileset, &recipe),
        Command::Publish {
            username,
            tileset,
            wait,
        } => commands::tileset::publish(&token, &username, &tileset, wait),
        Command::Status { username, tileset } => {
            commands::tileset::status(&token, &username, &tileset)
        }
        Command::Compose {
            southwest,
            northeast,
            zoom,
            map,
            format,
            high_dpi,
            cache_dir,
            marker,
            marker_locations,
            output,
        } => {
            let marker_locations = marker_locations
                .iter()
                .map(|value| parse_location(value))
                .collect::<Result<Vec<_>, _>>()?;

            let args = ComposeArgs {
                map: map.into(),
                southwest: parse_location(&southwest)?,
                northeast: parse_location(&northeast)?,
                zoom,
                format: format.into(),
                high_dpi,
                cache_dir,
                marker,
                marker_locations,
                output,
            };
            commands::compose::run(&token, &args)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        error.exit();
    }
}
