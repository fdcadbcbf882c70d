//! Domain values for a single decoration pass.

use serde::{Deserialize, Serialize};

use crate::summary::nothing_analyzed_body;

/// Stance a posted review takes toward the changes.
///
/// Serialises to the review event names the code host expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictTag {
    Approve,
    RequestChanges,
    Comment,
}

impl VerdictTag {
    /// Review event string (`APPROVE`, `REQUEST_CHANGES`, `COMMENT`).
    pub fn as_event(&self) -> &'static str {
        match self {
            VerdictTag::Approve => "APPROVE",
            VerdictTag::RequestChanges => "REQUEST_CHANGES",
            VerdictTag::Comment => "COMMENT",
        }
    }
}

impl std::fmt::Display for VerdictTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_event())
    }
}

/// Host-assigned identifier of a previously posted annotation or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub id: u64,
}

impl ArtifactRef {
    pub fn new(id: u64) -> Self {
        ArtifactRef { id }
    }
}

impl std::fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Everything one analysis run asks the decorator to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationRequest {
    /// Whether a quality gate was evaluated for this run.
    pub has_quality_gate: bool,

    /// Whether the gate failed. Meaningless without a gate.
    pub gate_failed: bool,

    /// Pre-rendered summary text.
    pub body: String,

    /// Caller override of the verdict the orchestrator would pick.
    pub explicit_verdict: Option<VerdictTag>,
}

impl DecorationRequest {
    /// A run that produced no quality gate.
    pub fn without_gate(body: impl Into<String>) -> Self {
        DecorationRequest {
            has_quality_gate: false,
            gate_failed: false,
            body: body.into(),
            explicit_verdict: None,
        }
    }

    /// A run with an evaluated quality gate.
    pub fn with_gate(body: impl Into<String>, gate_failed: bool) -> Self {
        DecorationRequest {
            has_quality_gate: true,
            gate_failed,
            body: body.into(),
            explicit_verdict: None,
        }
    }

    /// A run where nothing was analyzed; treated as a passed gate.
    pub fn nothing_analyzed(message: &str) -> Self {
        Self::with_gate(nothing_analyzed_body(message), false)
    }

    /// Override the verdict handed to the poster.
    pub fn with_verdict(mut self, verdict: VerdictTag) -> Self {
        self.explicit_verdict = Some(verdict);
        self
    }
}

/// Read-only decoration settings for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationConfig {
    /// Post anything at all to the pull request conversation.
    pub post_to_conversation: bool,

    /// Post a formal review with a verdict instead of a plain comment.
    pub pull_request_approval: bool,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        DecorationConfig {
            post_to_conversation: true,
            pull_request_approval: false,
        }
    }
}

/// What the poster decided to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "verdict", rename_all = "snake_case")]
pub enum PostAction {
    /// Posting to the conversation is disabled.
    Skipped,
    /// A plain conversation comment.
    Comment,
    /// A formal review carrying the given verdict.
    Review(VerdictTag),
}

impl std::fmt::Display for PostAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostAction::Skipped => f.write_str("skipped"),
            PostAction::Comment => f.write_str("comment"),
            PostAction::Review(verdict) => write!(f, "review({})", verdict),
        }
    }
}
