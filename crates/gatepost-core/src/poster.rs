//! Conversation poster: review or comment, and which verdict.
//!
//! The decision is split into two pure functions so the rules can be tested
//! without any collaborator:
//! - [`resolve_verdict`] applies the request-changes override
//! - [`plan_post`] walks the posting decision table
//!
//! [`ConversationPoster`] then performs at most one collaborator call.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DecorationConfig, PostAction, VerdictTag};
use crate::obs::emit_decoration_posted;
use crate::ports::{CommentService, ReviewService};

/// Final verdict for a formal review.
///
/// Without an explicit verdict the review is a neutral comment. An explicit
/// request-changes is only honoured when the gate actually failed; a gate
/// that exists but passed flips it to approve. Any other explicit verdict is
/// used as given.
pub fn resolve_verdict(gate_failed: bool, explicit_verdict: Option<VerdictTag>) -> VerdictTag {
    match explicit_verdict {
        None => VerdictTag::Comment,
        Some(VerdictTag::RequestChanges) if !gate_failed => VerdictTag::Approve,
        Some(verdict) => verdict,
    }
}

/// Decide what to publish. First matching rule wins:
///
/// | Config | Action |
/// |---|---|
/// | `post_to_conversation == false` | nothing |
/// | `pull_request_approval == false` | plain comment |
/// | otherwise | review with [`resolve_verdict`] |
pub fn plan_post(
    config: &DecorationConfig,
    gate_failed: bool,
    explicit_verdict: Option<VerdictTag>,
) -> PostAction {
    if !config.post_to_conversation {
        return PostAction::Skipped;
    }
    if !config.pull_request_approval {
        return PostAction::Comment;
    }
    PostAction::Review(resolve_verdict(gate_failed, explicit_verdict))
}

/// Publishes the decoration artifact through the host collaborators.
#[derive(Clone)]
pub struct ConversationPoster {
    reviews: Arc<dyn ReviewService>,
    comments: Arc<dyn CommentService>,
}

impl ConversationPoster {
    pub fn new(reviews: Arc<dyn ReviewService>, comments: Arc<dyn CommentService>) -> Self {
        ConversationPoster { reviews, comments }
    }

    /// Post a review or a comment according to [`plan_post`].
    ///
    /// Issues exactly one collaborator call, or none when posting is
    /// disabled. Calling this twice posts twice.
    pub async fn post_to_conversation(
        &self,
        config: &DecorationConfig,
        gate_failed: bool,
        body: &str,
        explicit_verdict: Option<VerdictTag>,
    ) -> PostAction {
        let action = plan_post(config, gate_failed, explicit_verdict);
        debug!(
            gate_failed = gate_failed,
            explicit_verdict = ?explicit_verdict,
            action = %action,
            "Planned conversation post"
        );

        match action {
            PostAction::Skipped => {}
            PostAction::Comment => self.comments.post_comment(body).await,
            PostAction::Review(verdict) => self.reviews.post_review(body, verdict).await,
        }

        emit_decoration_posted(action);
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{HostCall, RecordingHost};

    const APPROVAL: DecorationConfig = DecorationConfig {
        post_to_conversation: true,
        pull_request_approval: true,
    };

    const COMMENT_ONLY: DecorationConfig = DecorationConfig {
        post_to_conversation: true,
        pull_request_approval: false,
    };

    const DISABLED: DecorationConfig = DecorationConfig {
        post_to_conversation: false,
        pull_request_approval: true,
    };

    fn poster(host: &Arc<RecordingHost>) -> ConversationPoster {
        ConversationPoster::new(host.clone(), host.clone())
    }

    #[test]
    fn test_resolve_verdict_defaults_to_comment() {
        assert_eq!(resolve_verdict(false, None), VerdictTag::Comment);
        assert_eq!(resolve_verdict(true, None), VerdictTag::Comment);
    }

    #[test]
    fn test_resolve_verdict_request_changes_needs_failed_gate() {
        assert_eq!(
            resolve_verdict(true, Some(VerdictTag::RequestChanges)),
            VerdictTag::RequestChanges
        );
        assert_eq!(
            resolve_verdict(false, Some(VerdictTag::RequestChanges)),
            VerdictTag::Approve
        );
    }

    #[test]
    fn test_resolve_verdict_keeps_other_explicit_verdicts() {
        for gate_failed in [true, false] {
            assert_eq!(
                resolve_verdict(gate_failed, Some(VerdictTag::Approve)),
                VerdictTag::Approve
            );
            assert_eq!(
                resolve_verdict(gate_failed, Some(VerdictTag::Comment)),
                VerdictTag::Comment
            );
        }
    }

    #[test]
    fn test_plan_post_disabled_wins_over_everything() {
        for gate_failed in [true, false] {
            for explicit in [None, Some(VerdictTag::RequestChanges)] {
                assert_eq!(
                    plan_post(&DISABLED, gate_failed, explicit),
                    PostAction::Skipped
                );
            }
        }
    }

    #[test]
    fn test_plan_post_without_approval_is_always_comment() {
        for gate_failed in [true, false] {
            for explicit in [
                None,
                Some(VerdictTag::Approve),
                Some(VerdictTag::RequestChanges),
                Some(VerdictTag::Comment),
            ] {
                assert_eq!(
                    plan_post(&COMMENT_ONLY, gate_failed, explicit),
                    PostAction::Comment
                );
            }
        }
    }

    #[test]
    fn test_plan_post_with_approval_reviews() {
        assert_eq!(
            plan_post(&APPROVAL, true, Some(VerdictTag::RequestChanges)),
            PostAction::Review(VerdictTag::RequestChanges)
        );
        assert_eq!(
            plan_post(&APPROVAL, false, Some(VerdictTag::RequestChanges)),
            PostAction::Review(VerdictTag::Approve)
        );
        assert_eq!(
            plan_post(&APPROVAL, true, None),
            PostAction::Review(VerdictTag::Comment)
        );
    }

    #[tokio::test]
    async fn test_poster_disabled_makes_no_calls() {
        let host = Arc::new(RecordingHost::new());
        let action = poster(&host)
            .post_to_conversation(&DISABLED, true, "body", Some(VerdictTag::RequestChanges))
            .await;

        assert_eq!(action, PostAction::Skipped);
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_poster_comment_mode_posts_one_comment() {
        let host = Arc::new(RecordingHost::new());
        poster(&host)
            .post_to_conversation(&COMMENT_ONLY, true, "body", Some(VerdictTag::RequestChanges))
            .await;

        assert_eq!(
            host.calls(),
            vec![HostCall::PostComment {
                body: "body".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_poster_review_mode_posts_one_review() {
        let host = Arc::new(RecordingHost::new());
        poster(&host)
            .post_to_conversation(&APPROVAL, false, "body", Some(VerdictTag::RequestChanges))
            .await;

        assert_eq!(
            host.calls(),
            vec![HostCall::PostReview {
                body: "body".to_string(),
                verdict: VerdictTag::Approve,
            }]
        );
    }

    #[tokio::test]
    async fn test_poster_is_not_idempotent() {
        let host = Arc::new(RecordingHost::new());
        let poster = poster(&host);
        poster
            .post_to_conversation(&COMMENT_ONLY, false, "body", None)
            .await;
        poster
            .post_to_conversation(&COMMENT_ONLY, false, "body", None)
            .await;

        assert_eq!(host.posts().len(), 2);
    }
}
