//! Tileset API response types
//!
//! Flat DTOs mirroring the JSON payloads of the tilesets endpoints.

use std::fmt;

use serde::Deserialize;

/// Response from the source upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub files: u64,
    #[serde(default)]
    pub source_size: u64,
    pub id: String,
}

/// Response from the publish endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "jobId")]
    pub job_id: String,
}

/// Response from the status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub id: String,
    #[serde(default)]
    pub latest_job: String,
    pub status: JobStatus,
}

/// Status of an asynchronous tileset processing job.
///
/// `success` and `failed` are terminal; the in-flight vocabulary is not
/// pinned by the API, so unrecognized statuses map to [`JobStatus::Unknown`]
/// and keep the poll loop going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether the job has reached a terminal state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Success => "success",
            JobStatus::Failed => "failed",
            JobStatus::Unknown => "unknown",
        };
        write!(f, "{}", status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_decodes() {
        let body = r#"{"id":"user.tiles","latest_job":"abc123","status":"processing"}"#;
        let status: StatusResponse = serde_json::from_str(body).unwrap();
        assert_eq!(status.id, "user.tiles");
        assert_eq!(status.latest_job, "abc123");
        assert_eq!(status.status, JobStatus::Processing);
        assert!(!status.status.is_terminal());
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        let body = r#"{"id":"user.tiles","status":"warming_up"}"#;
        let status: StatusResponse = serde_json::from_str(body).unwrap();
        assert_eq!(status.status, JobStatus::Unknown);
        assert!(!status.status.is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Success.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Queued.is_terminal());
    }

    #[test]
    fn test_publish_response_wire_name() {
        let body = r#"{"message":"Processing user.tiles","jobId":"job-1"}"#;
        let publish: PublishResponse = serde_json::from_str(body).unwrap();
        assert_eq!(publish.job_id, "job-1");
    }

    #[test]
    fn test_upload_response_decodes() {
        let body = r#"{"file_size":1024,"files":1,"source_size":1024,"id":"mapbox://tileset-source/user/src"}"#;
        let upload: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(upload.file_size, 1024);
        assert_eq!(upload.files, 1);
    }
}
