//! Render a pull request and its discussion as an editable text document.
//!
//! The output opens with a synthetic null-commit header so generic text
//! editors apply their diff/commit-message highlighting to it, followed by
//! PR metadata, the wrapped discussion, the top-level marker pair, and the
//! inline-commenting instructions. The diff body itself is appended by the
//! caller after this prelude.

use crate::model::{DiscussionComment, PullRequestInfo};
use crate::wrap::wrap;
use crate::{TOP_LEVEL_END_MARKER, TOP_LEVEL_START_MARKER};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

/// Timestamp format used throughout the rendered header.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_time(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Write the reviewable prelude for `pr` and its discussion to `out`.
///
/// The caller appends the commit log and unified diff afterwards; parsing
/// the concatenation with [`crate::parse_review`] recovers whatever the
/// user typed into it.
pub fn render_prelude<W: Write>(
    out: &mut W,
    pr: &PullRequestInfo,
    discussion: &[DiscussionComment],
) -> io::Result<()> {
    // Null commit header: fools filetype detection into git-commit mode.
    writeln!(out, "commit 0000000000000000000000000000000000000000")?;
    writeln!(out, "Author: {}", pr.author)?;
    writeln!(out, "Date:   {}", format_time(&pr.created_at))?;
    writeln!(out, "Title:  {}", pr.title)?;
    writeln!(out, "State:  {}", pr.state)?;
    if let Some(merged_at) = &pr.merged_at {
        writeln!(out, "Merged: {}", format_time(merged_at))?;
    }
    if let Some(closed_at) = &pr.closed_at {
        writeln!(out, "Closed: {}", format_time(closed_at))?;
    }
    writeln!(out, "URL:    {}", pr.html_url)?;

    writeln!(out, "\nCreated by {} ({})", pr.author, format_time(&pr.created_at))?;
    write_body(out, pr.body.as_deref())?;

    for comment in discussion {
        writeln!(
            out,
            "\nComment by {} ({})",
            comment.author,
            format_time(&comment.created_at)
        )?;
        write_body(out, comment.body.as_deref())?;
    }

    writeln!(out)?;
    write!(
        out,
        "
# Add top-level review comments by typing between the marker lines below.
# Don't modify the markers!
# Approve this PR by typing \"APPROVE\" on a line by itself.
# Request changes on this PR by typing \"DENY\" on a line by itself.

{TOP_LEVEL_START_MARKER}
{TOP_LEVEL_END_MARKER}

# Add ordinary review comments by typing on a new line below the line of the
# diff you'd like to comment on. Comments may not begin with the special
# characters <space>, +, -, @, or *.
#
# Pre-existing comments are prefixed with *.

"
    )?;
    Ok(())
}

/// Write a trimmed, tab-indented, wrapped text body, or nothing when the
/// body is empty.
fn write_body<W: Write>(out: &mut W, body: Option<&str>) -> io::Result<()> {
    if let Some(text) = body {
        let text = text.trim();
        if !text.is_empty() {
            writeln!(out, "\n\t{}", wrap(text, "\t"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_review;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample_pr() -> PullRequestInfo {
        PullRequestInfo {
            number: 42,
            author: "octocat".to_string(),
            title: "Add frobnicator".to_string(),
            state: "open".to_string(),
            body: Some("This adds the frobnicator.\r\n\r\nSee the linked issue.".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
            merged_at: None,
            closed_at: None,
            html_url: "https://github.com/acme/widgets/pull/42".to_string(),
            base_sha: "base000".to_string(),
            head_sha: "head000".to_string(),
        }
    }

    fn render_to_string(pr: &PullRequestInfo, discussion: &[DiscussionComment]) -> String {
        let mut buf = Vec::new();
        render_prelude(&mut buf, pr, discussion).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_lines() {
        let doc = render_to_string(&sample_pr(), &[]);
        let mut lines = doc.lines();
        assert_eq!(
            lines.next(),
            Some("commit 0000000000000000000000000000000000000000")
        );
        assert_eq!(lines.next(), Some("Author: octocat"));
        assert_eq!(lines.next(), Some("Date:   2024-03-01 12:30:00"));
        assert_eq!(lines.next(), Some("Title:  Add frobnicator"));
        assert_eq!(lines.next(), Some("State:  open"));
        assert_eq!(
            lines.next(),
            Some("URL:    https://github.com/acme/widgets/pull/42")
        );
    }

    #[test]
    fn test_merged_and_closed_lines() {
        let mut pr = sample_pr();
        pr.state = "closed".to_string();
        pr.merged_at = Some(Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap());
        pr.closed_at = Some(Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 1).unwrap());
        let doc = render_to_string(&pr, &[]);
        assert!(doc.contains("\nMerged: 2024-03-02 09:00:00\n"));
        assert!(doc.contains("\nClosed: 2024-03-02 09:00:01\n"));
    }

    #[test]
    fn test_body_is_indented_and_crlf_normalized() {
        let doc = render_to_string(&sample_pr(), &[]);
        assert!(doc.contains("\n\tThis adds the frobnicator.\n\t\n\tSee the linked issue.\n"));
    }

    #[test]
    fn test_discussion_comments_rendered_in_order() {
        let discussion = vec![
            DiscussionComment {
                author: "alice".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap(),
                body: Some("First!".to_string()),
            },
            DiscussionComment {
                author: "bob".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap(),
                body: None,
            },
        ];
        let doc = render_to_string(&sample_pr(), &discussion);
        let alice = doc.find("Comment by alice (2024-03-01 13:00:00)").unwrap();
        let bob = doc.find("Comment by bob (2024-03-01 14:00:00)").unwrap();
        assert!(alice < bob);
        assert!(doc.contains("\n\tFirst!\n"));
    }

    #[test]
    fn test_markers_are_adjacent() {
        let doc = render_to_string(&sample_pr(), &[]);
        let pair = format!("{TOP_LEVEL_START_MARKER}\n{TOP_LEVEL_END_MARKER}\n");
        assert!(doc.contains(&pair));
    }

    #[test]
    fn test_round_trip_of_unedited_render() {
        // Rendering with no discussion and an empty diff, then parsing the
        // unmodified output, yields a draft with no inline comments and an
        // empty (content-free) top-level region.
        let doc = render_to_string(&sample_pr(), &[]);
        let draft = parse_review(&doc);
        assert!(draft.comments.is_empty());
        assert_eq!(draft.body, Some(String::new()));
        assert_eq!(
            draft.commit_id,
            Some("0000000000000000000000000000000000000000".to_string())
        );
        assert!(!draft.has_content());
    }
}
