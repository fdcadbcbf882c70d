//! GitHub connection settings.
//!
//! Inside a GitHub Actions job everything comes from the standard
//! environment: `GITHUB_API_URL`, `GITHUB_REPOSITORY`, `GITHUB_TOKEN` and the
//! event payload at `GITHUB_EVENT_PATH`. `GATEPOST_PULL_REQUEST` overrides
//! the pull request number taken from the payload.

use std::path::Path;

use serde::Deserialize;

use crate::error::{GitHubError, Result};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Where and as whom to decorate.
#[derive(Clone)]
pub struct GitHubConfig {
    /// REST API base URL, without trailing slash
    pub api_url: String,
    /// Repository owner (user or organisation)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request being decorated
    pub pull_number: u64,
    /// Token with pull-request write access
    pub token: String,
}

impl std::fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("pull_number", &self.pull_number)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitHubConfig {
    /// Build a config from a `owner/repo` slug.
    pub fn new(api_url: &str, repository: &str, pull_number: u64, token: &str) -> Result<Self> {
        let (owner, repo) = split_repository(repository)?;
        if token.trim().is_empty() {
            return Err(GitHubError::Config("GitHub token is empty".to_string()));
        }
        Ok(GitHubConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            owner,
            repo,
            pull_number,
            token: token.to_string(),
        })
    }

    /// Read the config from the GitHub Actions environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the config through `lookup`, keyed by environment variable name.
    ///
    /// `GATEPOST_PULL_REQUEST` wins over the event payload at `GITHUB_EVENT_PATH`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| GitHubError::Config(format!("{} is not set", name)))
        };

        let api_url = lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let repository = required("GITHUB_REPOSITORY")?;
        let token = required("GITHUB_TOKEN")?;

        let pull_number = match lookup("GATEPOST_PULL_REQUEST") {
            Some(raw) => parse_pull_number(&raw)?,
            None => pull_number_from_event(Path::new(&required("GITHUB_EVENT_PATH")?))?,
        };

        Self::new(&api_url, &repository, pull_number, &token)
    }

    /// `{api_url}/repos/{owner}/{repo}`
    pub fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.api_url, self.owner, self.repo)
    }
}

fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(GitHubError::Config(format!(
            "Repository must be 'owner/repo', got '{}'",
            repository
        ))),
    }
}

/// Parse a pull request number given on the command line or environment.
pub fn parse_pull_number(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| GitHubError::Config(format!("Invalid pull request number: '{}'", raw)))
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestRef>,
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PullRequestRef {
    number: u64,
}

/// Pull request number from a GitHub Actions event payload file.
///
/// Uses `pull_request.number`, falling back to the top-level `number`
/// that `issue_comment`-style events carry.
pub fn pull_number_from_event(path: &Path) -> Result<u64> {
    let raw = std::fs::read_to_string(path)?;
    let payload: EventPayload = serde_json::from_str(&raw)?;

    payload
        .pull_request
        .map(|pr| pr.number)
        .or(payload.number)
        .ok_or_else(|| {
            GitHubError::Config(format!(
                "Event payload {} does not reference a pull request",
                path.display()
            ))
        })
}
