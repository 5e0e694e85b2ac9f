//! Comment body rendering.
//!
//! Templates are plain markdown with two placeholders:
//! - `{assignee}`: the handle to mention, always rendered with a leading `@`.
//! - `{date}`: the due date as stored on the project item.
//!
//! Any other braces are left alone.

/// Placeholder replaced by the mentioned handle.
pub const ASSIGNEE_PLACEHOLDER: &str = "{assignee}";

/// Placeholder replaced by the due date.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Render a comment body from `template`.
///
/// Every occurrence of each placeholder is replaced. `assignee` may be given
/// with or without its leading `@`.
pub fn render_comment(template: &str, assignee: &str, date: &str) -> String {
    let handle = mention(assignee);

    template.replace(ASSIGNEE_PLACEHOLDER, &handle).replace(DATE_PLACEHOLDER, date)
}

fn mention(assignee: &str) -> String {
    if assignee.starts_with('@') { assignee.to_string() } else { format!("@{assignee}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let body = render_comment("Reminder for {assignee}, due {date}", "alice", "2024-05-02");
        assert_eq!(body, "Reminder for @alice, due 2024-05-02");
    }

    #[test]
    fn test_render_existing_at_is_kept() {
        let template = "Hey {assignee}! Due {date}.";

        assert_eq!(render_comment(template, "@alice", "2024-05-02"), render_comment(template, "alice", "2024-05-02"));
        assert_eq!(render_comment(template, "@alice", "2024-05-02"), "Hey @alice! Due 2024-05-02.");
    }

    #[test]
    fn test_render_replaces_all_occurrences() {
        let body = render_comment("{assignee} {assignee} / {date} {date}", "bob", "tomorrow");
        assert_eq!(body, "@bob @bob / tomorrow tomorrow");
    }

    #[test]
    fn test_render_missing_placeholders() {
        assert_eq!(render_comment("Nothing to see here", "bob", "2024-05-02"), "Nothing to see here");

        // A template without `{date}` never reflects the date.
        let body = render_comment("ping {assignee}", "bob", "2024-05-02");
        assert_eq!(body, "ping @bob");
        assert!(!body.contains("2024"));
    }

    #[test]
    fn test_render_unknown_placeholders_untouched() {
        let body = render_comment("{assignee} {title} {Date} {date}", "bob", "d");
        assert_eq!(body, "@bob {title} {Date} d");
    }

    #[test]
    fn test_render_multiline_markdown() {
        let template = "### Heads up\n\n{assignee}, this issue is due **{date}**.\n";
        let body = render_comment(template, "carol", "2024-12-31");
        assert_eq!(body, "### Heads up\n\n@carol, this issue is due **2024-12-31**.\n");
    }
}
