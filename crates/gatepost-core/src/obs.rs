//! Structured observability hooks for decoration passes.
//!
//! This module provides:
//! - A pass-scoped tracing span via [`decoration_span`]
//! - Emission functions for the key steps of a pass: skip, purge, post, post failure
//!
//! Events are emitted at `info!` level unless noted. Filtering follows `RUST_LOG`.

use tracing::{error, info, Span};

use crate::domain::{DecorationRequest, PostAction};

/// Span covering one decoration pass.
///
/// Attach it to the pass future with `tracing::Instrument` so every event
/// emitted by the collaborators is tagged with the gate state.
///
/// # Example
///
/// ```ignore
/// decorator.run(...).instrument(decoration_span(&request)).await
/// ```
pub fn decoration_span(request: &DecorationRequest) -> Span {
    tracing::info_span!(
        "gatepost.decoration",
        has_quality_gate = request.has_quality_gate,
        gate_failed = request.gate_failed,
    )
}

/// Emit event: pass skipped because posting to the conversation is disabled.
pub fn emit_decoration_skipped() {
    info!(
        event = "decoration.skipped",
        reason = "post_to_conversation disabled"
    );
}

/// Emit event: artifacts of one kind removed before posting.
///
/// `kind` is `"review_annotations"` or `"comments"`.
pub fn emit_artifacts_purged(kind: &str, count: usize) {
    info!(event = "decoration.artifacts_purged", kind = %kind, count = count);
}

/// Emit event: the poster published (or skipped) its artifact.
pub fn emit_decoration_posted(action: PostAction) {
    info!(event = "decoration.posted", action = %action);
}

/// Emit event: a post to the code host failed and was swallowed (error level).
pub fn emit_post_failed(kind: &str, err: &dyn std::fmt::Display) {
    error!(event = "decoration.post_failed", kind = %kind, error = %err);
}
