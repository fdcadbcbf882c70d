//! GitHub REST payloads used by the collaborators.

use gatepost_core::VerdictTag;
use serde::{Deserialize, Serialize};

/// A pull request review comment (line annotation).
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewComment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
}

/// A pull request conversation (issue) comment.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/pulls/{n}/reviews`.
#[derive(Debug, Serialize)]
pub struct CreateReview<'a> {
    pub event: VerdictTag,
    pub body: &'a str,
}

/// Body of `POST /repos/{owner}/{repo}/issues/{n}/comments`.
#[derive(Debug, Serialize)]
pub struct CreateComment<'a> {
    pub body: &'a str,
}
