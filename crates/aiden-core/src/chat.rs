//! Templated chat replies
//!
//! There is no language understanding here: every reply echoes the question
//! against a preview of the treaty context.

/// Context used before a summary exists
pub const DEFAULT_CONTEXT: &str = "a mid-layer catastrophe treaty with 50M attachment.";

/// Characters of context quoted in a reply
pub const CONTEXT_PREVIEW_CHARS: usize = 80;

/// Closing phrase of every reply
pub const REPLY_TAIL: &str =
    "may improve ROI and balance tail risk under hurricane and hail scenarios.";

/// Reply to `user_text` given the treaty `context`.
///
/// Context is cut to [`CONTEXT_PREVIEW_CHARS`] characters (not bytes).
#[must_use]
pub fn respond(user_text: &str, context: &str) -> String {
    let preview: String = context.chars().take(CONTEXT_PREVIEW_CHARS).collect();
    format!(
        "Considering {preview}..., {} {REPLY_TAIL}",
        user_text.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_question_and_ends_with_tail() {
        let reply = respond("lower attachment", "a mid-layer treaty...");
        assert!(reply.contains("lower attachment"));
        assert!(reply.ends_with(REPLY_TAIL));
    }

    #[test]
    fn lowercases_question() {
        let reply = respond("Split Into TWO Layers?", DEFAULT_CONTEXT);
        assert!(reply.contains("split into two layers?"));
    }

    #[test]
    fn truncates_context_by_characters() {
        let context = "é".repeat(100);
        let reply = respond("q", &context);
        let expected = format!("Considering {}...,", "é".repeat(80));
        assert!(reply.starts_with(&expected));
    }

    #[test]
    fn short_context_kept_whole() {
        assert_eq!(
            respond("Raise limit", "short"),
            format!("Considering short..., raise limit {REPLY_TAIL}")
        );
    }

    #[test]
    fn deterministic() {
        assert_eq!(respond("a", "b"), respond("a", "b"));
    }
}
