//! In-memory code host fake (testing only)
//!
//! `RecordingHost` implements both `ReviewService` and `CommentService`,
//! starts from a seeded set of previously posted artifacts, and records
//! every call in the order it was made.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{ArtifactRef, VerdictTag};
use crate::error::{DecorationError, DecorationResult};
use crate::ports::{CommentService, ReviewService};

/// One call received by the fake host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    FetchReviewAnnotations,
    FetchComments,
    DeleteReviewAnnotations(Vec<ArtifactRef>),
    DeleteComments(Vec<ArtifactRef>),
    PostReview { body: String, verdict: VerdictTag },
    PostComment { body: String },
}

impl HostCall {
    pub fn is_fetch(&self) -> bool {
        matches!(self, HostCall::FetchReviewAnnotations | HostCall::FetchComments)
    }

    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            HostCall::DeleteReviewAnnotations(_) | HostCall::DeleteComments(_)
        )
    }

    pub fn is_post(&self) -> bool {
        matches!(self, HostCall::PostReview { .. } | HostCall::PostComment { .. })
    }
}

/// Which host operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    FetchReviewAnnotations,
    FetchComments,
    DeleteReviewAnnotations,
    DeleteComments,
}

#[derive(Debug, Default)]
struct HostState {
    annotations: Vec<ArtifactRef>,
    comments: Vec<ArtifactRef>,
    calls: Vec<HostCall>,
    fail_on: Vec<FailOn>,
}

/// Recording fake for both host collaborators.
#[derive(Debug, Default)]
pub struct RecordingHost {
    state: Mutex<HostState>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed annotations that an earlier run left behind.
    pub fn with_annotations(self, ids: &[u64]) -> Self {
        self.lock().annotations = ids.iter().copied().map(ArtifactRef::new).collect();
        self
    }

    /// Seed conversation comments that an earlier run left behind.
    pub fn with_comments(self, ids: &[u64]) -> Self {
        self.lock().comments = ids.iter().copied().map(ArtifactRef::new).collect();
        self
    }

    /// Make one operation return a host error.
    pub fn failing_on(self, op: FailOn) -> Self {
        self.lock().fail_on.push(op);
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    /// Only the post calls received so far.
    pub fn posts(&self) -> Vec<HostCall> {
        self.calls().into_iter().filter(HostCall::is_post).collect()
    }

    /// Annotations still present on the fake pull request.
    pub fn remaining_annotations(&self) -> Vec<ArtifactRef> {
        self.lock().annotations.clone()
    }

    /// Comments still present on the fake pull request.
    pub fn remaining_comments(&self) -> Vec<ArtifactRef> {
        self.lock().comments.clone()
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: HostCall, op: Option<FailOn>) -> DecorationResult<()> {
        let mut state = self.lock();
        state.calls.push(call);
        match op {
            Some(op) if state.fail_on.contains(&op) => Err(DecorationError::Host(format!(
                "injected failure on {:?}",
                op
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ReviewService for RecordingHost {
    async fn posted_review_annotations(&self) -> DecorationResult<Vec<ArtifactRef>> {
        self.record(
            HostCall::FetchReviewAnnotations,
            Some(FailOn::FetchReviewAnnotations),
        )?;
        Ok(self.lock().annotations.clone())
    }

    async fn delete_review_annotations(&self, artifacts: &[ArtifactRef]) -> DecorationResult<()> {
        self.record(
            HostCall::DeleteReviewAnnotations(artifacts.to_vec()),
            Some(FailOn::DeleteReviewAnnotations),
        )?;
        self.lock().annotations.retain(|a| !artifacts.contains(a));
        Ok(())
    }

    async fn post_review(&self, body: &str, verdict: VerdictTag) {
        let call = HostCall::PostReview {
            body: body.to_string(),
            verdict,
        };
        self.record(call, None).ok();
    }
}

#[async_trait]
impl CommentService for RecordingHost {
    async fn posted_comments(&self) -> DecorationResult<Vec<ArtifactRef>> {
        self.record(HostCall::FetchComments, Some(FailOn::FetchComments))?;
        Ok(self.lock().comments.clone())
    }

    async fn delete_comments(&self, artifacts: &[ArtifactRef]) -> DecorationResult<()> {
        self.record(
            HostCall::DeleteComments(artifacts.to_vec()),
            Some(FailOn::DeleteComments),
        )?;
        self.lock().comments.retain(|c| !artifacts.contains(c));
        Ok(())
    }

    async fn post_comment(&self, body: &str) {
        let call = HostCall::PostComment {
            body: body.to_string(),
        };
        self.record(call, None).ok();
    }
}
