//! Decoration orchestration: purge stale artifacts, then post.

use std::sync::Arc;

use tracing::{info, Instrument};

use crate::domain::{DecorationConfig, DecorationRequest, PostAction, VerdictTag};
use crate::error::DecorationResult;
use crate::obs::{decoration_span, emit_artifacts_purged, emit_decoration_skipped};
use crate::ports::{CommentService, ReviewService};
use crate::poster::ConversationPoster;

/// Top-level decorator for one pull request.
///
/// Holds the host collaborators; configuration is supplied per call.
pub struct Decorator {
    reviews: Arc<dyn ReviewService>,
    comments: Arc<dyn CommentService>,
    poster: ConversationPoster,
}

impl Decorator {
    pub fn new(reviews: Arc<dyn ReviewService>, comments: Arc<dyn CommentService>) -> Self {
        let poster = ConversationPoster::new(reviews.clone(), comments.clone());
        Decorator {
            reviews,
            comments,
            poster,
        }
    }

    /// Run one decoration pass.
    ///
    /// Steps:
    /// - Skip everything (no fetch, no delete, no post) when posting is disabled
    /// - Fetch previous review annotations and comments concurrently
    /// - Delete each set that is non-empty, annotations first
    /// - Hand the request to the poster exactly once
    ///
    /// Fetch and delete errors propagate; nothing is posted after one.
    pub async fn decorate(
        &self,
        config: &DecorationConfig,
        request: &DecorationRequest,
    ) -> DecorationResult<PostAction> {
        self.run(config, request)
            .instrument(decoration_span(request))
            .await
    }

    /// Publish the fixed "nothing analyzed" decoration, treated as a passed gate.
    pub async fn decorate_nothing_analyzed(
        &self,
        config: &DecorationConfig,
        message: &str,
    ) -> DecorationResult<PostAction> {
        self.decorate(config, &DecorationRequest::nothing_analyzed(message))
            .await
    }

    async fn run(
        &self,
        config: &DecorationConfig,
        request: &DecorationRequest,
    ) -> DecorationResult<PostAction> {
        if !config.post_to_conversation {
            emit_decoration_skipped();
            return Ok(PostAction::Skipped);
        }

        let (annotations, comments) = futures::try_join!(
            self.reviews.posted_review_annotations(),
            self.comments.posted_comments()
        )?;
        info!(
            annotations = annotations.len(),
            comments = comments.len(),
            "Fetched previous decoration artifacts"
        );

        if !annotations.is_empty() {
            self.reviews.delete_review_annotations(&annotations).await?;
            emit_artifacts_purged("review_annotations", annotations.len());
        }
        if !comments.is_empty() {
            self.comments.delete_comments(&comments).await?;
            emit_artifacts_purged("comments", comments.len());
        }

        let verdict = downstream_verdict(request);
        Ok(self
            .poster
            .post_to_conversation(config, request.gate_failed, &request.body, verdict)
            .await)
    }
}

/// Verdict the orchestrator asks the poster for.
///
/// A caller override wins. Otherwise a run with a gate defaults to
/// request-changes (the poster flips it to approve when the gate passed),
/// and a run without a gate leaves the verdict unset.
fn downstream_verdict(request: &DecorationRequest) -> Option<VerdictTag> {
    request
        .explicit_verdict
        .or(request.has_quality_gate.then_some(VerdictTag::RequestChanges))
}
