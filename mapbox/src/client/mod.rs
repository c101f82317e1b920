//! Base API client
//!
//! Wraps auth-token injection, GET/POST, multipart upload, and the mapping
//! of rate-limit and authorization statuses onto named errors. Resource
//! clients ([`crate::tileset`], [`crate::raster`]) build on this.

mod http;
mod types;

pub use http::{HttpTransport, RawResponse, ReqwestTransport};
pub use types::{ApiMessage, Error};

#[cfg(test)]
pub use http::tests::MockTransport;

use std::env;
use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

/// Mapbox API base URL.
pub const BASE_URL: &str = "https://api.mapbox.com";

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "MAPBOX_TOKEN";

const STATUS_RATE_LIMIT_EXCEEDED: u16 = 429;
const STATUS_UNAUTHORIZED: u16 = 401;

/// Characters escaped in query keys and values. The usual token alphabet
/// (alphanumerics, `.`, `-`, `_`) passes through unchanged.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?');

/// Base Mapbox API client.
///
/// Holds the access token and the HTTP transport; every request gets the
/// token appended as the `access_token` query parameter.
///
/// # Example
///
/// ```no_run
/// use mapbox::client::Client;
///
/// let client = Client::new("pk.my-token")?;
/// let body = client.get("tilesets/v1/user.id/status", &[])?;
/// # Ok::<(), mapbox::client::Error>(())
/// ```
pub struct Client<T: HttpTransport = ReqwestTransport> {
    token: String,
    base_url: String,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Creates a client with the default reqwest transport.
    ///
    /// Fails with [`Error::MissingToken`] when the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        Self::with_transport(token, ReqwestTransport::new()?)
    }

    /// Creates a client from the `MAPBOX_TOKEN` environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let token = env::var(TOKEN_ENV).map_err(|_| Error::MissingToken)?;
        Self::new(token)
    }
}

impl<T: HttpTransport> Client<T> {
    /// Creates a client over the given transport.
    pub fn with_transport(token: impl Into<String>, transport: T) -> Result<Self, Error> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::MissingToken);
        }

        Ok(Self {
            token,
            base_url: BASE_URL.to_string(),
            transport,
        })
    }

    /// Overrides the API base URL. Used to point tests at a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The underlying HTTP transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds a full request URL with the access token and any extra
    /// query parameters appended, percent-encoding the values.
    fn url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{}?access_token={}",
            self.base_url,
            path.trim_start_matches('/'),
            utf8_percent_encode(&self.token, QUERY_ESCAPE)
        );
        for (key, value) in query {
            url.push('&');
            url.push_str(&utf8_percent_encode(key, QUERY_ESCAPE).to_string());
            url.push('=');
            url.push_str(&utf8_percent_encode(value, QUERY_ESCAPE).to_string());
        }
        url
    }

    /// Maps a raw response to its body, turning rate-limit and auth
    /// statuses into their named errors and extracting API messages from
    /// other failures where the body allows.
    fn check(&self, response: RawResponse) -> Result<Vec<u8>, Error> {
        match response.status {
            STATUS_RATE_LIMIT_EXCEEDED => Err(Error::RateLimitExceeded),
            STATUS_UNAUTHORIZED => Err(Error::Unauthorized),
            status if response.is_success() => {
                tracing::debug!(status = status, "API request succeeded");
                Ok(response.body)
            }
            status => {
                tracing::warn!(status = status, "API request failed");
                match serde_json::from_slice::<ApiMessage>(&response.body) {
                    Ok(message) if !message.message.is_empty() => Err(Error::Api(message.message)),
                    _ => Err(Error::UnexpectedStatus(status)),
                }
            }
        }
    }

    /// GET a resource, returning the raw body.
    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, Error> {
        let response = self.transport.get(&self.url(path, query))?;
        self.check(response)
    }

    /// GET a resource and decode its JSON body.
    pub fn get_json<D: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<D, Error> {
        let body = self.get(path, query)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// POST a JSON body (or an empty request), returning the raw body.
    pub fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>, Error> {
        let response = self.transport.post(&self.url(path, &[]), body)?;
        self.check(response)
    }

    /// POST a JSON body and decode the JSON response.
    pub fn post_json<D: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<D, Error> {
        let body = self.post(path, body)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Upload a local file as a multipart form field.
    pub fn upload_file(&self, path: &str, field: &str, file: &Path) -> Result<Vec<u8>, Error> {
        let data = std::fs::read(file)?;
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(field)
            .to_string();

        let response = self
            .transport
            .post_file(&self.url(path, &[]), field, &file_name, data)?;
        self.check(response)
    }
}
