//! Error types for gatepost-github

use gatepost_core::DecorationError;
use thiserror::Error;

/// Errors that can occur talking to the GitHub REST API
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Transport-level failure (connect, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(String),

    /// GitHub answered with a non-success status
    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Connection settings missing or malformed
    #[error("Invalid GitHub configuration: {0}")]
    Config(String),

    /// IO error (reading the event payload)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        GitHubError::Http(err.to_string())
    }
}

impl From<GitHubError> for DecorationError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Config(message) => DecorationError::Config(message),
            other => DecorationError::Host(other.to_string()),
        }
    }
}

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, GitHubError>;
