//! Error taxonomy for a single run.
//!
//! [`ConfigError`] is the only fatal error: it aborts before any network call.
//! Every [`PipelineError`] is caught at the stage boundary in
//! [`crate::pipeline`], logged, and recorded in the run report.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or missing startup configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("KEYWORD is not set (pass --keyword or export KEYWORD)")]
    MissingKeyword,

    #[error("HTTP timeout must be greater than zero seconds")]
    InvalidTimeout,
}

/// A recoverable failure of one pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Transport failure or non-2xx status from the search API.
    #[error("search API request to {endpoint} failed (status: {status:?}): {message}")]
    ApiConnection {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    /// The search API answered, but without the field we need.
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("image download from {url} failed (status: {status:?}): {message}")]
    Download {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("could not write {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The webhook answered with anything other than 200.
    #[error("webhook rejected the message with status {status}: {body}")]
    Notification { status: u16, body: String },

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl PipelineError {
    /// Short stage-independent label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::ApiConnection { .. } => "api_connection",
            PipelineError::MalformedResponse { .. } => "malformed_response",
            PipelineError::Download { .. } => "download",
            PipelineError::Persistence { .. } => "persistence",
            PipelineError::Notification { .. } => "notification",
            PipelineError::HttpClient(_) => "http_client",
        }
    }
}
