//! HTTP transport abstraction for testability
//!
//! The [`HttpTransport`] trait is the seam between the API client and the
//! network: the real implementation wraps a blocking `reqwest` client,
//! while tests inject canned responses through a mock.

use super::types::Error;

/// Raw response from the transport: status plus body bytes.
///
/// Status interpretation (sentinel mapping, message extraction) is the
/// client's job, not the transport's, so error bodies pass through intact.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx success range.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for synchronous HTTP operations against the API.
pub trait HttpTransport: Send + Sync {
    /// Performs an HTTP GET request.
    fn get(&self, url: &str) -> Result<RawResponse, Error>;

    /// Performs an HTTP POST request. A body, when present, is sent as
    /// `application/json`.
    fn post(&self, url: &str, body: Option<Vec<u8>>) -> Result<RawResponse, Error>;

    /// Performs a multipart/form-data POST with a single file field.
    fn post_file(
        &self,
        url: &str,
        field: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<RawResponse, Error>;
}

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("mapbox-rs/", env!("CARGO_PKG_VERSION"));

/// Real HTTP transport implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a new transport with default configuration.
    pub fn new() -> Result<Self, Error> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new transport with a custom request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn read(response: reqwest::blocking::Response) -> Result<RawResponse, Error> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| Error::Http(format!("Failed to read response: {}", e)))?;

        tracing::trace!(status = status, bytes = body.len(), "HTTP response read");

        Ok(RawResponse { status, body })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<RawResponse, Error> {
        tracing::trace!(url = url, "HTTP GET request starting");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        Self::read(response)
    }

    fn post(&self, url: &str, body: Option<Vec<u8>>) -> Result<RawResponse, Error> {
        tracing::trace!(url = url, "HTTP POST request starting");

        let mut request = self.client.post(url);
        if let Some(data) = body {
            request = request.header("Content-Type", "application/json").body(data);
        }

        let response = request
            .send()
            .map_err(|e| Error::Http(format!("POST request failed: {}", e)))?;

        Self::read(response)
    }

    fn post_file(
        &self,
        url: &str,
        field: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<RawResponse, Error> {
        tracing::trace!(
            url = url,
            field = field,
            bytes = data.len(),
            "HTTP multipart upload starting"
        );

        let part = reqwest::blocking::multipart::Part::bytes(data).file_name(file_name.to_string());
        let form = reqwest::blocking::multipart::Form::new().part(field.to_string(), part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(|e| Error::Http(format!("Upload request failed: {}", e)))?;

        Self::read(response)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock transport returning canned responses in order, recording the
    /// URLs it was asked for.
    pub struct MockTransport {
        responses: Mutex<Vec<RawResponse>>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MockTransport {
        /// A mock that replies to every request with the same response.
        pub fn always(status: u16, body: Vec<u8>) -> Self {
            Self {
                responses: Mutex::new(vec![RawResponse { status, body }]),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// A mock that replies with the given responses in sequence,
        /// repeating the last one once exhausted.
        pub fn sequence(responses: Vec<RawResponse>) -> Self {
            assert!(!responses.is_empty(), "sequence needs at least one response");
            let mut ordered = responses;
            ordered.reverse();
            Self {
                responses: Mutex::new(ordered),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn reply(&self, url: &str) -> RawResponse {
            self.requests.lock().unwrap().push(url.to_string());
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 {
                responses.pop().unwrap()
            } else {
                responses[0].clone()
            }
        }

        /// URLs requested so far.
        pub fn requested(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpTransport for MockTransport {
        fn get(&self, url: &str) -> Result<RawResponse, Error> {
            Ok(self.reply(url))
        }

        fn post(&self, url: &str, _body: Option<Vec<u8>>) -> Result<RawResponse, Error> {
            Ok(self.reply(url))
        }

        fn post_file(
            &self,
            url: &str,
            _field: &str,
            _file_name: &str,
            _data: Vec<u8>,
        ) -> Result<RawResponse, Error> {
            Ok(self.reply(url))
        }
    }

    #[test]
    fn test_mock_transport_replays_sequence() {
        let mock = MockTransport::sequence(vec![
            RawResponse {
                status: 200,
                body: b"first".to_vec(),
            },
            RawResponse {
                status: 404,
                body: b"second".to_vec(),
            },
        ]);

        assert_eq!(mock.get("http://example.com/a").unwrap().body, b"first");
        assert_eq!(mock.get("http://example.com/b").unwrap().status, 404);
        // Last response repeats
        assert_eq!(mock.get("http://example.com/c").unwrap().status, 404);
        assert_eq!(mock.requested().len(), 3);
    }

    #[test]
    fn test_raw_response_is_success() {
        let ok = RawResponse {
            status: 204,
            body: vec![],
        };
        let bad = RawResponse {
            status: 400,
            body: vec![],
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }
}
