//! Tileset resource client
//!
//! Builds the `tilesets/v1` endpoint URLs for a `{username, tileset_id}`
//! pair and drives the upload → create → publish → status workflow,
//! including the fixed-interval status poll for asynchronous jobs.

mod types;

pub use types::{JobStatus, PublishResponse, StatusResponse, UploadResponse};

use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::client::{ApiMessage, Client, Error, HttpTransport, ReqwestTransport};

const API_NAME: &str = "tilesets";
const API_VERSION: &str = "v1";

/// Interval between job status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Client for one tileset resource.
///
/// # Example
///
/// ```no_run
/// use mapbox::client::Client;
/// use mapbox::tileset::{JobStatus, TilesetClient, DEFAULT_POLL_INTERVAL};
///
/// let client = Client::from_env()?;
/// let tileset = TilesetClient::new(client, "my-user", "my-tiles");
///
/// tileset.upload_source("points.ldgeojson".as_ref())?;
/// tileset.create("tileset-recipe.json".as_ref())?;
/// tileset.publish()?;
///
/// let status = tileset.wait_for_job(DEFAULT_POLL_INTERVAL)?;
/// if status.status == JobStatus::Failed {
///     eprintln!("publish failed: {}", status.latest_job);
/// }
/// # Ok::<(), mapbox::client::Error>(())
/// ```
pub struct TilesetClient<T: HttpTransport = ReqwestTransport> {
    client: Client<T>,
    username: String,
    tileset_id: String,
}

impl<T: HttpTransport> TilesetClient<T> {
    /// Creates a tileset client scoped to `username` and `tileset_id`.
    pub fn new(
        client: Client<T>,
        username: impl Into<String>,
        tileset_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            username: username.into(),
            tileset_id: tileset_id.into(),
        }
    }

    /// Path of the tileset resource: `tilesets/v1/{username}.{tileset_id}`.
    fn tileset_path(&self) -> String {
        format!(
            "{}/{}/{}.{}",
            API_NAME, API_VERSION, self.username, self.tileset_id
        )
    }

    /// Uploads a line-delimited GeoJSON file as a tileset source.
    pub fn upload_source(&self, source: &Path) -> Result<UploadResponse, Error> {
        let path = format!(
            "{}/{}/sources/{}/{}",
            API_NAME, API_VERSION, self.username, self.tileset_id
        );

        tracing::info!(
            username = %self.username,
            tileset = %self.tileset_id,
            file = %source.display(),
            "uploading tileset source"
        );

        let body = self.client.upload_file(&path, "file", source)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Creates the tileset from a recipe JSON file.
    pub fn create(&self, recipe: &Path) -> Result<ApiMessage, Error> {
        let data = std::fs::read(recipe)?;
        self.client.post_json(&self.tileset_path(), Some(data))
    }

    /// Queues a publish job for the tileset.
    pub fn publish(&self) -> Result<PublishResponse, Error> {
        let path = format!("{}/publish", self.tileset_path());
        let publish: PublishResponse = self.client.post_json(&path, None)?;

        tracing::info!(job_id = %publish.job_id, "tileset publish queued");
        Ok(publish)
    }

    /// Fetches the status of the most recent job.
    pub fn status(&self) -> Result<StatusResponse, Error> {
        let path = format!("{}/status", self.tileset_path());
        self.client.get_json(&path, &[])
    }

    /// Polls the job status at a fixed interval until it reaches a
    /// terminal state, then returns the final response.
    ///
    /// There is no timeout or backoff; publishing large tilesets can take
    /// a while. A failed job is not an `Err` here, callers branch on
    /// [`StatusResponse::status`].
    pub fn wait_for_job(&self, poll_interval: Duration) -> Result<StatusResponse, Error> {
        loop {
            let response = self.status()?;
            if response.status.is_terminal() {
                tracing::info!(status = %response.status, "tileset job finished");
                return Ok(response);
            }

            tracing::debug!(status = %response.status, "tileset job still running");
            thread::sleep(poll_interval);
        }
    }
}
