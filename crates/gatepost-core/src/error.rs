//! Error types for gatepost-core

use thiserror::Error;

/// Errors that can escape a decoration pass.
///
/// Only fetch and delete failures reach the caller. Posting failures are
/// logged by the collaborator that owns the post and never surface here.
#[derive(Error, Debug)]
pub enum DecorationError {
    /// The code host rejected or failed a fetch/delete request
    #[error("Code host request failed: {0}")]
    Host(String),

    /// Collaborator configuration is missing or malformed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for decoration operations
pub type DecorationResult<T> = std::result::Result<T, DecorationError>;
