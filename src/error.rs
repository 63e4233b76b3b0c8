//! Error types for contribs
//!
//! Defines an error enum covering the failure modes of the fetch pipeline.
//! Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Result type alias for contribs operations
pub type Result<T> = std::result::Result<T, ContribsError>;

/// Error type for contribs operations
///
/// Per-item fetch failures (one repository's branch list, one branch's
/// commit list) never appear here: the pipeline degrades those to empty
/// results locally. The variants below are the failures a caller can see.
#[derive(Error, Debug)]
pub enum ContribsError {
    /// Configuration errors (missing credentials, empty login)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication errors (credential probe rejected)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// GitHub API errors (non-2xx responses other than 401)
    #[error("GitHub API error: {0}")]
    Api(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
