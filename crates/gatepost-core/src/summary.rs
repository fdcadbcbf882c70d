//! Markers and fixed bodies for artifacts posted by gatepost.
//!
//! Full summary rendering belongs to the analysis tool; this module only
//! owns the hidden markers used to recognise our own artifacts on later
//! runs, plus the body of the "nothing analyzed" review.

/// Hidden marker carried by review-level annotations we post.
pub const ANNOTATION_MARKER: &str = "<!-- gatepost:annotation -->";

/// Hidden marker carried by conversation comments we post.
pub const COMMENT_MARKER: &str = "<!-- gatepost:comment -->";

/// Heading shown on top of the fixed review bodies.
pub const QUALITY_GATE_TITLE: &str = "<h1>Quality Gate</h1>";

/// Append the conversation-comment marker unless the body already has it.
pub fn mark_comment(body: &str) -> String {
    if is_marked_comment(body) {
        body.to_string()
    } else {
        format!("{}\n\n{}", body, COMMENT_MARKER)
    }
}

/// Whether a conversation comment body was posted by gatepost.
pub fn is_marked_comment(body: &str) -> bool {
    body.contains(COMMENT_MARKER)
}

/// Whether a review annotation body was posted by gatepost.
pub fn is_marked_annotation(body: &str) -> bool {
    body.contains(ANNOTATION_MARKER)
}

/// Body of the review posted when the analysis had nothing to look at.
pub fn nothing_analyzed_body(message: &str) -> String {
    format!(
        "{}\n\n### :heavy_check_mark: Passed \n\n{}",
        QUALITY_GATE_TITLE, message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_analyzed_body_layout() {
        assert_eq!(
            nothing_analyzed_body("message"),
            "<h1>Quality Gate</h1>\n\n### :heavy_check_mark: Passed \n\nmessage"
        );
    }

    #[test]
    fn test_mark_comment_is_idempotent() {
        let once = mark_comment("summary");
        assert!(is_marked_comment(&once));
        assert!(once.starts_with("summary"));
        assert_eq!(mark_comment(&once), once);
    }

    #[test]
    fn test_markers_are_distinct() {
        assert!(!is_marked_annotation(&mark_comment("summary")));
        assert!(is_marked_annotation(&format!("warning {}", ANNOTATION_MARKER)));
    }
}
