use crate::config::Comments;
use crate::util::html::escape_html;

pub const UTTERANCES_CLIENT: &str = "https://utteranc.es/client.js";

/// Script tag loading the utterances widget. The widget replaces the tag with
/// its iframe, so it goes where the comments should appear.
pub fn comments_script(comments: &Comments) -> String {
    format!(
        r#"<script src="{}" repo="{}" issue-term="{}" label="{}" theme="{}" crossorigin="anonymous" async></script>"#,
        UTTERANCES_CLIENT,
        escape_html(&comments.repo),
        escape_html(&comments.issue_term),
        escape_html(&comments.label),
        escape_html(&comments.theme),
    )
}
