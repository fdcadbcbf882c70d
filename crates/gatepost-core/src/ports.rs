//! Collaborator traits for the code host.
//!
//! The decision logic only ever talks to the host through these traits:
//! - `ReviewService`: formal reviews and review-level annotations
//! - `CommentService`: plain conversation comments
//!
//! Fetch and delete calls return errors to the caller. Post calls do not:
//! an implementation must log its own posting failures and return normally.

use async_trait::async_trait;

use crate::domain::{ArtifactRef, VerdictTag};
use crate::error::DecorationResult;

/// Formal reviews and the annotations attached to them.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Review annotations left on the pull request by earlier runs.
    async fn posted_review_annotations(&self) -> DecorationResult<Vec<ArtifactRef>>;

    /// Delete every annotation in `artifacts`.
    async fn delete_review_annotations(&self, artifacts: &[ArtifactRef]) -> DecorationResult<()>;

    /// Create one review. Failures are logged, never returned.
    async fn post_review(&self, body: &str, verdict: VerdictTag);
}

/// Plain pull request conversation comments.
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Conversation comments left on the pull request by earlier runs.
    async fn posted_comments(&self) -> DecorationResult<Vec<ArtifactRef>>;

    /// Delete every comment in `artifacts`.
    async fn delete_comments(&self, artifacts: &[ArtifactRef]) -> DecorationResult<()>;

    /// Create one comment. Failures are logged, never returned.
    async fn post_comment(&self, body: &str);
}
