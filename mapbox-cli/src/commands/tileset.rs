//! Tileset workflow commands: upload, create, publish, status.

use std::path::Path;

use mapbox::client::Client;
use mapbox::tileset::{JobStatus, TilesetClient, DEFAULT_POLL_INTERVAL};

use crate::error::CliError;

fn tileset_client(token: &str, username: &str, tileset_id: &str) -> Result<TilesetClient, CliError> {
    let client = Client::new(token)?;
    Ok(TilesetClient::new(client, username, tileset_id))
}

/// Upload a line-delimited GeoJSON source file.
pub fn upload(
    token: &str,
    username: &str,
    tileset_id: &str,
    source: &Path,
) -> Result<(), CliError> {
    let tileset = tileset_client(token, username, tileset_id)?;
    let response = tileset.upload_source(source)?;

    println!("Uploaded {} file(s), {} bytes", response.files, response.file_size);
    println!("Source: {}", response.id);
    Ok(())
}

/// Create the tileset from a recipe file.
pub fn create(
    token: &str,
    username: &str,
    tileset_id: &str,
    recipe: &Path,
) -> Result<(), CliError> {
    let tileset = tileset_client(token, username, tileset_id)?;
    let message = tileset.create(recipe)?;

    if message.message.is_empty() {
        println!("Tileset {}.{} created", username, tileset_id);
    } else {
        println!("{}", message.message);
    }
    Ok(())
}

/// Publish the tileset, optionally waiting for the job to finish.
pub fn publish(
    token: &str,
    username: &str,
    tileset_id: &str,
    wait: bool,
) -> Result<(), CliError> {
    let tileset = tileset_client(token, username, tileset_id)?;
    let response = tileset.publish()?;

    println!("Publish queued, job {}", response.job_id);

    if wait {
        println!("Awaiting job completion. This may take some time...");
        let status = tileset.wait_for_job(DEFAULT_POLL_INTERVAL)?;
        match status.status {
            JobStatus::Success => println!("Job complete"),
            JobStatus::Failed => println!("Job failed"),
            other => println!("Job ended with status {}", other),
        }
    }
    Ok(())
}

/// Print the status of the most recent job.
pub fn status(token: &str, username: &str, tileset_id: &str) -> Result<(), CliError> {
    let tileset = tileset_client(token, username, tileset_id)?;
    let response = tileset.status()?;

    println!("Tileset: {}", response.id);
    println!("Latest job: {}", response.latest_job);
    println!("Status: {}", response.status);
    Ok(())
}
