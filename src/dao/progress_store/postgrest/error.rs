//! Error types shared by the PostgREST storage implementation.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`PostgrestError`] failures.
pub type PostgrestResult<T> = Result<T, PostgrestError>;

/// Failures that can occur while interacting with PostgREST.
#[derive(Debug, Error)]
pub enum PostgrestError {
    /// Required environment variable is missing.
    #[error("missing PostgREST environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build PostgREST client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent or the connection dropped.
    #[error("failed to send PostgREST request to `{path}`")]
    RequestSend {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// PostgREST answered with a non-success status.
    #[error("unexpected PostgREST response status {status} for `{path}`: {detail}")]
    RequestStatus {
        path: String,
        status: StatusCode,
        detail: String,
    },
    /// Response payload could not be decoded.
    #[error("failed to decode PostgREST response for `{path}`")]
    DecodeResponse {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    /// More than one row matched a filter expected to select at most one.
    #[error("expected at most one row in `{path}`, found {count}")]
    MultipleRows { path: String, count: usize },
}

/// Error body returned by PostgREST on rejected requests.
#[derive(Debug, Default, Deserialize)]
pub struct PostgrestErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl PostgrestErrorBody {
    /// Render the body as a single diagnostic line.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(code) = &self.code {
            parts.push(format!("[{code}]"));
        }
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        if let Some(details) = &self.details {
            parts.push(format!("({details})"));
        }
        if parts.is_empty() {
            "no error body".into()
        } else {
            parts.join(" ")
        }
    }
}

impl From<PostgrestError> for StorageError {
    fn from(err: PostgrestError) -> Self {
        match err {
            PostgrestError::RequestStatus { status, .. } if status.is_client_error() => {
                StorageError::query(err.to_string())
            }
            PostgrestError::MultipleRows { .. } => StorageError::query(err.to_string()),
            other => StorageError::transport(other.to_string(), other),
        }
    }
}
