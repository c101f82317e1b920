//! CLI error handling with user-friendly messages.

use std::fmt;
use std::process;

use mapbox::client::Error as ClientError;
use mapbox::raster::RasterError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// No access token given on the command line or in the environment
    MissingToken,
    /// Malformed command-line value (locations, zoom)
    Argument(String),
    /// API client failure
    Client(ClientError),
    /// Tile fetch / compositing failure
    Raster(RasterError),
}

impl CliError {
    /// Exit the process with an appropriate error message.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::MissingToken => {
                eprintln!();
                eprintln!("Provide a token with --token or set MAPBOX_TOKEN.");
                eprintln!("Tokens are managed at https://account.mapbox.com/access-tokens/");
            }
            CliError::Client(ClientError::Unauthorized) => {
                eprintln!();
                eprintln!("The token was rejected. Check that it has the tilesets scopes.");
            }
            CliError::Client(ClientError::RateLimitExceeded) => {
                eprintln!();
                eprintln!("Rate limited. Wait a moment before retrying.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingToken => write!(f, "no Mapbox access token found"),
            CliError::Argument(msg) => write!(f, "invalid argument: {}", msg),
            CliError::Client(err) => write!(f, "{}", err),
            CliError::Raster(err) => write!(f, "{}", err),
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        CliError::Client(err)
    }
}

impl From<RasterError> for CliError {
    fn from(err: RasterError) -> Self {
        CliError::Raster(err)
    }
}
