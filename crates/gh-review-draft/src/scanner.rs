//! Single-pass scanner that recovers a review draft from an edited document.
//!
//! The document mixes free-form prose, diff hunk lines, pre-existing
//! comments, and newly typed comment lines, with no delimiters beyond a
//! leading-character convention. Every physical line is classified into
//! exactly one role; classification priority is load-bearing and must not
//! be reordered (a line can look like both a file header and comment text).

use crate::model::{DraftComment, ReviewDraft};
use crate::{TOP_LEVEL_END_MARKER, TOP_LEVEL_START_MARKER};
use regex::Regex;
use std::sync::OnceLock;

/// Prefix of a per-file diff header.
const DIFF_HEADER: &str = "diff --git ";

/// Prefix of a hunk header.
const HUNK_HEADER: &str = "@@";

fn commit_header(line: &str) -> Option<&str> {
    static COMMIT_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = COMMIT_REGEX.get_or_init(|| Regex::new(r"^commit (.*)$").unwrap());
    re.captures(line).map(|caps| caps.get(1).unwrap().as_str())
}

fn file_header(line: &str) -> Option<&str> {
    static FILE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = FILE_REGEX.get_or_init(|| Regex::new(r"^\+\+\+ b/(.*)$").unwrap());
    re.captures(line).map(|caps| caps.get(1).unwrap().as_str())
}

/// Parse an edited review document into a [`ReviewDraft`].
///
/// Parsing is total: every line is classified best-effort and whatever was
/// accumulated is returned; there is no "invalid document" outcome.
/// Documented edge cases:
///
/// - An unterminated top-level region leaves `body` unset; partially typed
///   top-level text is discarded, not truncated into a body.
/// - Comment text before the first hunk has nothing to anchor to and is
///   silently dropped.
/// - With several `commit` headers in one document, the last hash wins.
pub fn parse_review(text: &str) -> ReviewDraft {
    let mut draft = ReviewDraft::default();

    // Scanner state: current file, diff-line counter for the active hunk
    // run, whether a hunk has opened since the last commit/diff header,
    // and the byte range of the top-level region / active comment.
    let mut file = String::new();
    let mut position: u32 = 0;
    let mut in_hunk = false;
    let mut region_start: Option<usize> = None;
    let mut comment_start: Option<usize> = None;

    let mut off = 0;
    for raw in text.split_inclusive('\n') {
        let line_start = off;
        off += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        // Tolerate CRLF-terminated lines in pasted diff bodies.
        let line = line.strip_suffix('\r').unwrap_or(line);

        // Top-level region boundaries outrank every other classification.
        if line == TOP_LEVEL_START_MARKER {
            region_start = Some(off);
            comment_start = None;
            continue;
        }
        if line == TOP_LEVEL_END_MARKER {
            // A stray end marker with no open region sets nothing; the body
            // stays unset unless a region was actually captured.
            if let Some(start) = region_start.take() {
                draft.body = Some(text[start..line_start].to_string());
            }
            comment_start = None;
            continue;
        }
        if region_start.is_some() {
            // Everything inside the region is absorbed silently. Reaching
            // end of input here means the region never closes and the body
            // stays unset.
            continue;
        }

        if let Some(hash) = commit_header(line) {
            in_hunk = false;
            draft.commit_id = Some(hash.to_string());
            comment_start = None;
            continue;
        }

        if line.starts_with(DIFF_HEADER) {
            in_hunk = false;
            comment_start = None;
            continue;
        }

        if let Some(path) = file_header(line) {
            // The file changes; the position counter keeps running until
            // the next hunk header resets it.
            file = path.to_string();
            comment_start = None;
            continue;
        }

        if !in_hunk {
            // Gate closed: nothing is anchorable until a hunk header opens
            // it. The header itself zeroes the counter.
            if line.starts_with(HUNK_HEADER) {
                in_hunk = true;
                position = 0;
            }
            comment_start = None;
            continue;
        }

        match line.as_bytes().first() {
            // Diff content: context, added, removed, or a subsequent hunk
            // header within the same run. All count toward the position.
            Some(b'+' | b'-' | b' ' | b'@') => {
                position += 1;
                comment_start = None;
            }
            // Pre-existing comment echoed back for context; never
            // re-submitted and never counted.
            Some(b'*') => {
                comment_start = None;
            }
            // Anything else, blank lines included, is comment text.
            _ => {
                let start = *comment_start.get_or_insert_with(|| {
                    draft.comments.push(DraftComment {
                        path: file.clone(),
                        position,
                        body: String::new(),
                    });
                    line_start
                });
                // Extend the active comment to the end of this line,
                // keeping its original line breaks.
                if let Some(comment) = draft.comments.last_mut() {
                    comment.body = text[start..off].to_string();
                }
            }
        }
    }

    draft
}
