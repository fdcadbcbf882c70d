//! GitHub REST client
//!
//! Thin wrapper over `reqwest` scoped to one pull request. Implements the
//! gatepost `ReviewService` and `CommentService` collaborators:
//! - Review annotations live under `/pulls/{n}/comments`
//! - Conversation comments live under `/issues/{n}/comments`
//! - Only artifacts carrying a gatepost marker are ever listed for deletion

use async_trait::async_trait;
use gatepost_core::{
    emit_post_failed, is_marked_annotation, is_marked_comment, mark_comment, ArtifactRef,
    CommentService, DecorationResult, ReviewService, VerdictTag,
};
use reqwest::{header, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::GitHubConfig;
use crate::error::{GitHubError, Result};
use crate::models::{CreateComment, CreateReview, IssueComment, ReviewComment};

/// Page size for list endpoints (GitHub maximum).
pub const PER_PAGE: usize = 100;

const API_VERSION: &str = "2022-11-28";

/// GitHub client bound to a single pull request.
pub struct GitHubClient {
    config: GitHubConfig,
    http_client: reqwest::Client,
}

impl GitHubClient {
    /// Create a new client with auth and API headers preset.
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            header::HeaderValue::from_static(API_VERSION),
        );
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| GitHubError::Config("GitHub token is not a valid header".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("gatepost/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(GitHubClient {
            config,
            http_client,
        })
    }

    fn pull_url(&self, suffix: &str) -> String {
        format!(
            "{}/pulls/{}/{}",
            self.config.repo_url(),
            self.config.pull_number,
            suffix
        )
    }

    fn issue_url(&self, suffix: &str) -> String {
        format!(
            "{}/issues/{}/{}",
            self.config.repo_url(),
            self.config.pull_number,
            suffix
        )
    }

    /// Review comments (line annotations) on the pull request.
    pub async fn list_review_comments(&self) -> Result<Vec<ReviewComment>> {
        self.get_all_pages(&self.pull_url("comments")).await
    }

    /// Conversation comments on the pull request.
    pub async fn list_issue_comments(&self) -> Result<Vec<IssueComment>> {
        self.get_all_pages(&self.issue_url("comments")).await
    }

    pub async fn delete_review_comment(&self, id: u64) -> Result<()> {
        let url = format!("{}/pulls/comments/{}", self.config.repo_url(), id);
        self.delete(&url).await
    }

    pub async fn delete_issue_comment(&self, id: u64) -> Result<()> {
        let url = format!("{}/issues/comments/{}", self.config.repo_url(), id);
        self.delete(&url).await
    }

    pub async fn create_review(&self, body: &str, verdict: VerdictTag) -> Result<()> {
        let payload = CreateReview {
            event: verdict,
            body,
        };
        self.post_json(&self.pull_url("reviews"), &payload).await
    }

    pub async fn create_issue_comment(&self, body: &str) -> Result<()> {
        let payload = CreateComment { body };
        self.post_json(&self.issue_url("comments"), &payload).await
    }

    async fn get_all_pages<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let response = self
                .http_client
                .get(url)
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()
                .await?;
            let batch: Vec<T> = check_status(response).await?.json().await?;
            let fetched = batch.len();
            items.extend(batch);

            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }

        debug!(url = %url, pages = page, count = items.len(), "Listed GitHub items");
        Ok(items)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let response = self.http_client.delete(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(url = %url, "Already deleted");
            return Ok(());
        }
        check_status(response).await?;
        Ok(())
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        let response = self.http_client.post(url).json(body).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GitHubError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ReviewService for GitHubClient {
    async fn posted_review_annotations(&self) -> DecorationResult<Vec<ArtifactRef>> {
        let comments = self.list_review_comments().await?;
        Ok(comments
            .into_iter()
            .filter(|c| is_marked_annotation(&c.body))
            .map(|c| ArtifactRef::new(c.id))
            .collect())
    }

    async fn delete_review_annotations(&self, artifacts: &[ArtifactRef]) -> DecorationResult<()> {
        for artifact in artifacts {
            self.delete_review_comment(artifact.id).await?;
        }
        info!(count = artifacts.len(), "Deleted previous review annotations");
        Ok(())
    }

    async fn post_review(&self, body: &str, verdict: VerdictTag) {
        match self.create_review(body, verdict).await {
            Ok(()) => info!(verdict = %verdict, "Posted pull request review"),
            Err(e) => emit_post_failed("review", &e),
        }
    }
}

#[async_trait]
impl CommentService for GitHubClient {
    async fn posted_comments(&self) -> DecorationResult<Vec<ArtifactRef>> {
        let comments = self.list_issue_comments().await?;
        Ok(comments
            .into_iter()
            .filter(|c| c.body.as_deref().is_some_and(is_marked_comment))
            .map(|c| ArtifactRef::new(c.id))
            .collect())
    }

    async fn delete_comments(&self, artifacts: &[ArtifactRef]) -> DecorationResult<()> {
        for artifact in artifacts {
            self.delete_issue_comment(artifact.id).await?;
        }
        info!(count = artifacts.len(), "Deleted previous conversation comments");
        Ok(())
    }

    async fn post_comment(&self, body: &str) {
        match self.create_issue_comment(&mark_comment(body)).await {
            Ok(()) => info!("Posted pull request comment"),
            Err(e) => emit_post_failed("comment", &e),
        }
    }
}
