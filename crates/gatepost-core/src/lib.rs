//! Gatepost Core - quality gate decoration for pull requests
//!
//! Decides how a quality gate outcome is published on a pull request:
//! - Clears the review annotations and comments earlier runs left behind
//! - Chooses between a formal review and a plain conversation comment
//! - Resolves the review verdict (approve, request changes, comment)
//!
//! The code host is reached only through the `ReviewService` and
//! `CommentService` traits; `gatepost-github` provides the GitHub REST
//! implementation and `fakes` an in-memory one.

pub mod domain;
pub mod error;
pub mod fakes;
pub mod obs;
pub mod orchestrator;
pub mod ports;
pub mod poster;
pub mod summary;
pub mod telemetry;

pub use domain::{ArtifactRef, DecorationConfig, DecorationRequest, PostAction, VerdictTag};
pub use error::{DecorationError, DecorationResult};
pub use obs::{
    decoration_span, emit_artifacts_purged, emit_decoration_posted, emit_decoration_skipped,
    emit_post_failed,
};
pub use orchestrator::Decorator;
pub use ports::{CommentService, ReviewService};
pub use poster::{plan_post, resolve_verdict, ConversationPoster};
pub use summary::{
    is_marked_annotation, is_marked_comment, mark_comment, nothing_analyzed_body,
    ANNOTATION_MARKER, COMMENT_MARKER,
};
pub use telemetry::init_tracing;
