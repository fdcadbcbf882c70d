//! Gatepost GitHub - pull request collaborators over the GitHub REST API
//!
//! Provides `GitHubClient`, which implements the gatepost `ReviewService`
//! and `CommentService` traits for one pull request, and `GitHubConfig`,
//! which reads the connection settings from a GitHub Actions environment.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::GitHubClient;
pub use config::{parse_pull_number, pull_number_from_event, GitHubConfig, DEFAULT_API_URL};
pub use error::{GitHubError, Result};
